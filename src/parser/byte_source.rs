//! Byte sources the scanner runs over.
//!
//! The subtree scan reports every token and every matched clade as an offset
//! range and only copies bytes once a result is assembled, so a source must
//! keep the whole input addressable. [BufferSource] does so for any byte
//! container; two aliases name the cases in use:
//! - [InMemoryByteSource] owns its bytes (files, stdin)
//! - [SliceByteSource] borrows them (strings already held by the caller)

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

// =#========================================================================#=
// BYTE SOURCE (Trait)
// =#========================================================================T=
/// A fully addressable input with a read cursor.
///
/// Implementors provide the buffer and the cursor; peeking, consuming and
/// slicing are derived from those.
pub trait ByteSource {
    /// All bytes of the input.
    fn bytes(&self) -> &[u8];

    /// Offset of the cursor.
    fn position(&self) -> usize;

    /// Moves the cursor; offsets past the end mean EOF.
    fn set_position(&mut self, pos: usize);

    fn len(&self) -> usize {
        self.bytes().len()
    }

    fn is_eof(&self) -> bool {
        self.position() >= self.len()
    }

    /// The byte under the cursor, `None` at EOF.
    #[inline(always)]
    fn peek(&self) -> Option<u8> {
        self.bytes().get(self.position()).copied()
    }

    /// The byte under the cursor, advancing past it.
    #[inline(always)]
    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.set_position(self.position() + 1);
        Some(byte)
    }

    /// The bytes in `start..end`, clamped to the input.
    #[inline]
    fn slice(&self, start: usize, end: usize) -> &[u8] {
        let bytes = self.bytes();
        let end = end.min(bytes.len());
        &bytes[start.min(end)..end]
    }

    /// The bytes from the cursor to the end of the input.
    #[inline]
    fn remaining(&self) -> &[u8] {
        self.slice(self.position(), self.len())
    }
}

// =#========================================================================#=
// BUFFER SOURCE
// =#========================================================================$=
/// A [ByteSource] over any container of bytes.
#[derive(Debug, Clone)]
pub struct BufferSource<B> {
    buffer: B,
    pos: usize,
}

/// Source owning its bytes.
pub type InMemoryByteSource = BufferSource<Vec<u8>>;

/// Source borrowing its bytes, so a caller holding a (possibly
/// multi-gigabyte) tree string does not have to copy it to scan it.
pub type SliceByteSource<'a> = BufferSource<&'a [u8]>;

impl<B: AsRef<[u8]>> BufferSource<B> {
    pub fn new(buffer: B) -> Self {
        Self { buffer, pos: 0 }
    }
}

impl InMemoryByteSource {
    /// Reads the entire file into memory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Reads `reader` (e.g. stdin) to its end.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        Ok(Self::new(buffer))
    }
}

impl<B: AsRef<[u8]>> ByteSource for BufferSource<B> {
    #[inline(always)]
    fn bytes(&self) -> &[u8] {
        self.buffer.as_ref()
    }

    #[inline(always)]
    fn position(&self) -> usize {
        self.pos
    }

    #[inline(always)]
    fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_is_clamped() {
        let source = SliceByteSource::new(b"(A,B);");
        assert_eq!(source.slice(1, 4), b"A,B");
        assert_eq!(source.slice(4, 100), b");");
        assert_eq!(source.slice(10, 12), b"");
    }

    #[test]
    fn test_remaining_follows_cursor() {
        let mut source = InMemoryByteSource::new(b"(Kea,Kaka);".to_vec());
        source.set_position(5);
        assert_eq!(source.remaining(), b"Kaka);");
        source.set_position(40);
        assert_eq!(source.remaining(), b"");
    }

    #[test]
    fn test_eof() {
        let mut source = SliceByteSource::new(b"ab");
        assert!(!source.is_eof());
        assert_eq!(source.next_byte(), Some(b'a'));
        assert_eq!(source.next_byte(), Some(b'b'));
        assert!(source.is_eof());
        assert_eq!(source.next_byte(), None);
    }

    #[test]
    fn test_from_reader() {
        let source = InMemoryByteSource::from_reader(io::Cursor::new("(Moa);")).unwrap();
        assert_eq!(source.len(), 6);
        assert_eq!(source.peek(), Some(b'('));
    }
}
