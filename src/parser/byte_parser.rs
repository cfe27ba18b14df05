//! Cursor over a [ByteSource] with the few primitives the Newick
//! [Scanner](crate::newick::Scanner) needs: peeking, delimiter search and
//! slicing back into the buffer.

use crate::parser::byte_source::{ByteSource, InMemoryByteSource, SliceByteSource};
use std::borrow::Cow;
use std::io::{self, Read};
use std::path::Path;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// Walks an input byte by byte.
///
/// Nothing is copied while walking: a token found by
/// [consume_until_any](Self::consume_until_any) is known by the offsets
/// before and after the call and retrieved later via [slice](Self::slice).
///
/// # Example
/// ```
/// use cladecut::parser::byte_parser::{ByteParser, ConsumeMode};
///
/// let mut parser = ByteParser::for_str("(Kea_ott1:0.5,Kaka_ott2);");
/// assert_eq!(parser.next_byte(), Some(b'('));
/// let start = parser.position();
/// assert_eq!(parser.consume_until_any(b"(),;", ConsumeMode::Exclusive), Some(b','));
/// assert_eq!(parser.slice(start, parser.position()), b"Kea_ott1:0.5");
/// ```
pub struct ByteParser<S: ByteSource> {
    source: S,
}

impl ByteParser<InMemoryByteSource> {
    /// Reads a whole file into memory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        InMemoryByteSource::from_file(path).map(Self::new)
    }

    /// Reads `reader` (e.g. stdin) to its end.
    pub fn from_reader<R: Read>(reader: R) -> io::Result<Self> {
        InMemoryByteSource::from_reader(reader).map(Self::new)
    }
}

impl<'a> ByteParser<SliceByteSource<'a>> {
    /// Borrows `input` without copying.
    pub fn for_bytes(input: &'a [u8]) -> Self {
        Self::new(SliceByteSource::new(input))
    }

    pub fn for_str(input: &'a str) -> Self {
        Self::for_bytes(input.as_bytes())
    }
}

impl<S: ByteSource> ByteParser<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.source.peek()
    }

    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        self.source.next_byte()
    }

    /// Moves past spaces, tabs and line breaks.
    pub fn skip_whitespace(&mut self) {
        let skipped = self
            .source
            .remaining()
            .iter()
            .take_while(|&&b| is_whitespace(b))
            .count();
        self.advance(skipped);
    }

    /// Moves the cursor to the first occurrence of any of `targets`.
    ///
    /// # Arguments
    /// * `targets` - The delimiters to stop at
    /// * `mode` - Whether the found delimiter is consumed as well
    ///
    /// # Returns
    /// The delimiter found, or `None` if the input ended first (the cursor
    /// is then at EOF).
    pub fn consume_until_any(&mut self, targets: &[u8], mode: ConsumeMode) -> Option<u8> {
        let remaining = self.source.remaining();
        let search = remaining
            .iter()
            .position(|b| targets.contains(b))
            .map(|offset| (offset, remaining[offset]));
        let Some((offset, found)) = search else {
            self.source.set_position(self.len());
            return None;
        };
        match mode {
            ConsumeMode::Inclusive => self.advance(offset + 1),
            ConsumeMode::Exclusive => self.advance(offset),
        }
        Some(found)
    }

    #[inline]
    fn advance(&mut self, n: usize) {
        self.source.set_position(self.source.position() + n);
    }

    pub fn is_eof(&self) -> bool {
        self.source.is_eof()
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.source.position()
    }

    pub fn set_position(&mut self, pos: usize) {
        self.source.set_position(pos);
    }

    /// Size of the whole input in bytes.
    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.len() == 0
    }

    /// The input bytes in `start..end`, clamped to the input.
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &[u8] {
        self.source.slice(start, end)
    }

    /// Like [slice](Self::slice), decoded lossily as UTF-8.
    pub fn slice_as_str(&self, start: usize, end: usize) -> Cow<'_, str> {
        String::from_utf8_lossy(self.slice(start, end))
    }

    /// Up to `k` bytes following the cursor, for error messages.
    pub fn lookahead(&self, k: usize) -> String {
        let pos = self.position();
        self.slice_as_str(pos, pos.saturating_add(k)).into_owned()
    }
}

/// Whitespace as understood between Newick elements.
#[inline(always)]
pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// What [ByteParser::consume_until_any] does with the delimiter it finds.
///
/// # Examples
/// ```
/// use cladecut::parser::byte_parser::{ByteParser, ConsumeMode};
///
/// let mut parser = ByteParser::for_str("Kakapo_ott3:1.0,Kea_ott4");
///
/// // Exclusive: stop in front of the delimiter, e.g. to leave it for the scanner
/// parser.consume_until_any(b",", ConsumeMode::Exclusive);
/// assert_eq!(parser.peek(), Some(b','));
///
/// // Inclusive: step over it
/// parser.set_position(0);
/// parser.consume_until_any(b",", ConsumeMode::Inclusive);
/// assert_eq!(parser.peek(), Some(b'K'));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConsumeMode {
    Inclusive,
    Exclusive,
}
