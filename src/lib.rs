//! Cladecut extracts the smallest clade spanning a set of taxa from a very
//! large phylogenetic tree in Newick format.
//!
//! Trees such as the Open Tree of Life synthesis have millions of leaves, so
//! instead of parsing into a tree model, the extractor makes a single pass
//! over the raw text. It tracks nesting depth on an explicit stack,
//! recognises taxon labels by their `<Name>_ott<id>` convention and fuses
//! matched sibling subtrees as their common ancestors close.
//! Core functionality provided:
//! - Extraction: [SubtreeExtractor] with the result as [Extraction]
//!   (found / taxa missing / disjoint clades), plus [ScanStats] diagnostics.
//! - Expand mode: a single taxon naming an internal vertex yields its whole
//!   clade; several taxa yield only the matched tokens joined by the minimal
//!   topology connecting them. See [ExpandMode].
//! - Lexical layer: a [Scanner](newick::Scanner) reporting tokens as offsets
//!   into the buffer, never copying.
//! - CLI: the `cladecut` binary, see [cli].
//!
//! Limitations:
//! - Quoted labels, comments and NHX annotations are not interpreted
//! - One tree per input; the scan stops at the first `;`
//! - The whole input is held in memory
//!
//! # Usage patterns
//! 1. [extract_subtree_str] and [extract_subtree_file] use default settings.
//! 2. Configure a [SubtreeExtractor] for control over expand mode, label tag
//!    and polytomy reporting.
//!
//! ## Example Default Configuration
//!
//! ```
//! use cladecut::extract_subtree_str;
//!
//! let tree = "(((Kea_ott1,Kaka_ott2)Nestor_ott3,Kakapo_ott4)Strigopoidea_ott5,Kiwi_ott6);";
//! let extraction = extract_subtree_str(tree, ["Kea", "Kakapo"]).unwrap();
//! assert_eq!(extraction.newick(), Some("(Kea_ott1,Kakapo_ott4)Strigopoidea_ott5;"));
//! ```
//!
//! ## Example Extractor Configuration
//!
//! ```
//! use cladecut::extract::{ExpandMode, SubtreeExtractor};
//! use cladecut::parser::ByteParser;
//!
//! let tree = "((Kea_ncbi1,Kaka_ncbi2)Nestor_ncbi3,Kakapo_ncbi4);";
//! let extractor = SubtreeExtractor::new(["Nestor"])
//!     .with_taxon_tag("_ncbi")
//!     .with_expand_mode(ExpandMode::Collapsed);
//! let (extraction, stats) = extractor.extract(ByteParser::for_str(tree))?;
//! assert_eq!(extraction.newick(), Some("Nestor_ncbi3;"));
//! assert_eq!(stats.groups_closed, 1);
//! # Ok::<(), cladecut::parser::ParsingError>(())
//! ```

pub mod cli;
pub mod extract;
pub mod newick;
pub mod parser;

pub use crate::extract::{ExpandMode, Extraction, ScanStats, SubtreeExtractor};
use crate::parser::parsing_error::ParsingError;
use std::path::Path;

// ============================================================================
// Quick Extraction API
// ============================================================================
/// Extracts the subtree spanning `taxa` from a Newick string using default
/// settings.
///
/// See [`extract::extract_str`] for full documentation.
pub fn extract_subtree_str<I, T>(newick: &str, taxa: I) -> Result<Extraction, ParsingError>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    extract::extract_str(newick, taxa)
}

/// Extracts the subtree spanning `taxa` from a Newick file using default
/// settings.
///
/// See [`extract::extract_file`] for full documentation.
pub fn extract_subtree_file<P, I, T>(path: P, taxa: I) -> Result<Extraction, ParsingError>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    extract::extract_file(path, taxa)
}
