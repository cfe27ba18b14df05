//! Low-level byte handling for the Newick scanner.
//!
//! This module provides the byte sources the scan runs over, the
//! [ByteParser] used to walk them and the [ParsingError] reported for
//! structurally malformed input.

pub mod byte_parser;
pub mod byte_source;
pub mod parsing_error;

pub use byte_parser::{ByteParser, ConsumeMode};
pub use parsing_error::{ParsingError, ParsingErrorType};
