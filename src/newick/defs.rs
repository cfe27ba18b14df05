//! Constants and definitions for scanning Newick strings.

/// Open-group delimiter
pub(crate) const OPEN_GROUP: u8 = b'(';

/// Close-group delimiter
pub(crate) const CLOSE_GROUP: u8 = b')';

/// Sibling separator
pub(crate) const SEPARATOR: u8 = b',';

/// Tree terminator
pub(crate) const TERMINATOR: u8 = b';';

/// Bytes that end a free-text token (`label[:branch_length]`)
pub(crate) const NEWICK_TOKEN_DELIMITERS: &[u8] = b"(),;";

/// Separator between a label and its branch length
pub(crate) const BRANCH_LENGTH_SEPARATOR: u8 = b':';
