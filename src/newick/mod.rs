//! Newick lexical layer.
//!
//! This module provides the [Scanner], which turns a buffer into
//! [Lexeme]s without building any tree structure.
//!
//! # Format
//! The scanner understands the following subset of the Newick grammar:
//! * `tree ::= vertex ';'`
//! * `vertex ::= '(' vertex (',' vertex)* ')' token | token`
//! * `token ::= [label] [':' branch_length]`
//!
//! Furthermore:
//! * Internal vertices may have any number of children (polytomies)
//! * Whitespace may occur between elements and is not part of a token
//! * Quoted labels and `[...]` comments are not recognised; their bytes
//!   simply become part of the surrounding token

pub(crate) mod defs;
pub mod scanner;

pub use scanner::{Lexeme, Scanner, TokenSpan};
