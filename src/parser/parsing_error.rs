//! Error types for scanning Newick input.
//!
//! This module provides [ParsingError] and [ParsingErrorType] for representing
//! and reporting structural errors found while scanning a tree. Taxa that are
//! not found are not errors; see [Extraction](crate::extract::Extraction).

use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use thiserror::Error;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================$=
/// Error types that can occur while scanning a Newick tree.
#[derive(Error, PartialEq, Debug, Clone)]
pub enum ParsingErrorType {
    #[error("IO error - {0}")]
    IoError(String),
    #[error("Unexpected end of input, input should terminate with ';'")]
    UnexpectedEOF,
    #[error("Closing ')' without matching '('")]
    UnbalancedClose,
    #[error("Tree terminated with {0} unclosed '('")]
    UnclosedGroup(usize),
    #[error("Node must begin with '(' or a label, but '(' follows a complete node")]
    MisplacedGroup,
    #[error("No taxa requested")]
    NoTaxaRequested,
    #[error("Taxon tag does not compile to a pattern - {0}")]
    InvalidTaxonTag(String),
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================$=
/// Parsing error with contextual information (position and following bytes).
#[derive(Error, Debug)]
#[error("{kind} at position {position}{}", render_context(.context))]
pub struct ParsingError {
    kind: ParsingErrorType,
    position: usize,
    context: String,
}

fn render_context(context: &str) -> String {
    if context.is_empty() {
        String::new()
    } else {
        format!("\n  Context (next {} bytes): {}", context.len(), context)
    }
}

impl ParsingError {
    /// Error at the cursor of `parser`.
    pub fn from_parser<S: ByteSource>(kind: ParsingErrorType, parser: &ByteParser<S>) -> Self {
        Self {
            kind,
            position: parser.position(),
            context: parser.lookahead(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Error at a delimiter the scanner already stepped over.
    pub fn at_offset<S: ByteSource>(
        kind: ParsingErrorType,
        parser: &ByteParser<S>,
        offset: usize,
    ) -> Self {
        Self {
            kind,
            position: offset,
            context: parser
                .slice_as_str(offset, offset + DEFAULT_CONTEXT_LENGTH)
                .into_owned(),
        }
    }

    pub fn unexpected_eof<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::UnexpectedEOF, parser)
    }

    pub fn unbalanced_close<S: ByteSource>(parser: &ByteParser<S>, offset: usize) -> Self {
        Self::at_offset(ParsingErrorType::UnbalancedClose, parser, offset)
    }

    /// `;` reached while `open` groups are still open.
    pub fn unclosed_group<S: ByteSource>(parser: &ByteParser<S>, open: usize) -> Self {
        Self::from_parser(ParsingErrorType::UnclosedGroup(open), parser)
    }

    pub fn misplaced_group<S: ByteSource>(parser: &ByteParser<S>, offset: usize) -> Self {
        Self::at_offset(ParsingErrorType::MisplacedGroup, parser, offset)
    }

    /// Error not tied to a place in the input.
    pub fn without_context(kind: ParsingErrorType) -> Self {
        Self {
            kind,
            position: 0,
            context: String::new(),
        }
    }

    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    /// Byte offset the error refers to.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl From<std::io::Error> for ParsingError {
    fn from(err: std::io::Error) -> Self {
        Self::without_context(ParsingErrorType::IoError(err.to_string()))
    }
}
