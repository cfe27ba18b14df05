//! Lexical scanning of Newick strings.
//!
//! The [Scanner] walks a [ByteParser] and reports [Lexeme]s. It never builds
//! labels or vertices: a token is only a [TokenSpan] into the buffer.

use crate::newick::defs::{
    BRANCH_LENGTH_SEPARATOR, CLOSE_GROUP, NEWICK_TOKEN_DELIMITERS, OPEN_GROUP, SEPARATOR,
    TERMINATOR,
};
use crate::parser::byte_parser::{ByteParser, ConsumeMode, is_whitespace};
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;

// =#========================================================================#=
// TOKEN SPAN
// =#========================================================================$=
/// Location of a free-text token `label[:branch_length]` in the buffer,
/// excluding surrounding whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    /// Offset of the first byte of the token
    pub start: usize,
    /// Offset one past the last byte of the token
    pub end: usize,
}

impl TokenSpan {
    /// Number of bytes covered by the token.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the token is empty, e.g. an anonymous internal vertex.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The bytes of the token.
    pub fn text<'p, S: ByteSource>(&self, parser: &'p ByteParser<S>) -> &'p [u8] {
        parser.slice(self.start, self.end)
    }

    /// The label part of the token, i.e. without any `:branch_length`.
    pub fn label<'p, S: ByteSource>(&self, parser: &'p ByteParser<S>) -> &'p [u8] {
        let text = self.text(parser);
        match text.iter().position(|&b| b == BRANCH_LENGTH_SEPARATOR) {
            Some(colon) => &text[..colon],
            None => text,
        }
    }
}

// =#========================================================================#=
// LEXEME
// =#========================================================================$=
/// The lexical classes of a Newick string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme {
    /// `(` at the given offset
    Open(usize),
    /// `)` at the given offset
    Close(usize),
    /// `,`
    Separator,
    /// `;`
    Terminator,
    /// Maximal run of bytes not in `(),;`
    Token(TokenSpan),
}

// =#========================================================================#=
// SCANNER
// =#========================================================================$=
/// Produces the [Lexeme]s of a Newick string one at a time.
///
/// # Example
/// ```
/// use cladecut::newick::{Lexeme, Scanner};
/// use cladecut::parser::ByteParser;
///
/// let mut scanner = Scanner::new(ByteParser::for_str("(Moa_ott7:2.5)Dinornithidae_ott8;"));
/// assert_eq!(scanner.next_lexeme().unwrap(), Lexeme::Open(0));
/// let Lexeme::Token(leaf) = scanner.next_lexeme().unwrap() else { panic!() };
/// assert_eq!(leaf.text(scanner.parser()), b"Moa_ott7:2.5");
/// assert_eq!(scanner.next_lexeme().unwrap(), Lexeme::Close(13));
/// let label = scanner.read_token().unwrap();
/// assert_eq!(label.label(scanner.parser()), b"Dinornithidae_ott8");
/// assert_eq!(scanner.next_lexeme().unwrap(), Lexeme::Terminator);
/// ```
pub struct Scanner<S: ByteSource> {
    parser: ByteParser<S>,
}

impl<S: ByteSource> Scanner<S> {
    /// Creates a scanner positioned at the start of the given parser's input.
    pub fn new(parser: ByteParser<S>) -> Self {
        Self { parser }
    }

    /// Access to the underlying [ByteParser], e.g. to slice out tokens.
    pub fn parser(&self) -> &ByteParser<S> {
        &self.parser
    }

    /// Current offset into the buffer.
    pub fn position(&self) -> usize {
        self.parser.position()
    }

    /// Reads the next lexical unit, skipping whitespace in front of it.
    ///
    /// # Errors
    /// [UnexpectedEOF](crate::parser::ParsingErrorType::UnexpectedEOF) if the
    /// input ends before a `;` was seen.
    pub fn next_lexeme(&mut self) -> Result<Lexeme, ParsingError> {
        self.parser.skip_whitespace();
        let offset = self.parser.position();
        let lexeme = match self.parser.peek() {
            None => return Err(ParsingError::unexpected_eof(&self.parser)),
            Some(OPEN_GROUP) => Lexeme::Open(offset),
            Some(CLOSE_GROUP) => Lexeme::Close(offset),
            Some(SEPARATOR) => Lexeme::Separator,
            Some(TERMINATOR) => Lexeme::Terminator,
            Some(_) => return Ok(Lexeme::Token(self.read_token()?)),
        };
        self.parser.next_byte();
        Ok(lexeme)
    }

    /// Reads a (possibly empty) token up to, but excluding, the next delimiter.
    ///
    /// Used directly after a `)` to read the label of the group just closed,
    /// which may be empty.
    ///
    /// # Errors
    /// [UnexpectedEOF](crate::parser::ParsingErrorType::UnexpectedEOF) if no
    /// `,`, `(`, `)` or `;` follows the token.
    pub fn read_token(&mut self) -> Result<TokenSpan, ParsingError> {
        self.parser.skip_whitespace();
        let start = self.parser.position();
        if self
            .parser
            .consume_until_any(NEWICK_TOKEN_DELIMITERS, ConsumeMode::Exclusive)
            .is_none()
        {
            return Err(ParsingError::unexpected_eof(&self.parser));
        }

        let mut end = self.parser.position();
        while end > start && is_whitespace(self.parser.slice(end - 1, end)[0]) {
            end -= 1;
        }

        Ok(TokenSpan { start, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParsingErrorType;

    fn lexemes(input: &str) -> Result<Vec<Lexeme>, ParsingError> {
        let mut scanner = Scanner::new(ByteParser::for_str(input));
        let mut out = Vec::new();
        loop {
            let lexeme = scanner.next_lexeme()?;
            out.push(lexeme);
            if lexeme == Lexeme::Terminator {
                return Ok(out);
            }
        }
    }

    #[test]
    fn test_lexeme_sequence() {
        let lexemes = lexemes("(A,B)C;").unwrap();
        assert_eq!(
            lexemes,
            vec![
                Lexeme::Open(0),
                Lexeme::Token(TokenSpan { start: 1, end: 2 }),
                Lexeme::Separator,
                Lexeme::Token(TokenSpan { start: 3, end: 4 }),
                Lexeme::Close(4),
                Lexeme::Token(TokenSpan { start: 5, end: 6 }),
                Lexeme::Terminator,
            ]
        );
    }

    #[test]
    fn test_whitespace_is_not_part_of_token() {
        let mut scanner = Scanner::new(ByteParser::for_str("(\n  Tui_ott5:1.0 \n,"));
        assert_eq!(scanner.next_lexeme().unwrap(), Lexeme::Open(0));
        let Lexeme::Token(token) = scanner.next_lexeme().unwrap() else {
            panic!("expected token");
        };
        assert_eq!(token.text(scanner.parser()), b"Tui_ott5:1.0");
        assert_eq!(token.label(scanner.parser()), b"Tui_ott5");
    }

    #[test]
    fn test_empty_label_after_close() {
        let mut scanner = Scanner::new(ByteParser::for_str("),"));
        assert_eq!(scanner.next_lexeme().unwrap(), Lexeme::Close(0));
        let token = scanner.read_token().unwrap();
        assert!(token.is_empty());
        assert_eq!(scanner.next_lexeme().unwrap(), Lexeme::Separator);
    }

    #[test]
    fn test_token_running_into_eof() {
        let err = lexemes("(A,B)C").unwrap_err();
        assert_eq!(err.kind(), &ParsingErrorType::UnexpectedEOF);
        assert_eq!(err.position(), 6);
    }

    #[test]
    fn test_eof_before_delimiter() {
        let err = lexemes("(A,B)").unwrap_err();
        assert_eq!(err.kind(), &ParsingErrorType::UnexpectedEOF);
    }
}
