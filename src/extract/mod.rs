//! Extraction of the smallest subtree spanning a set of taxa.
//!
//! The extraction is a single pass over the buffer driven by the Newick
//! [Scanner](crate::newick::Scanner). Instead of building a tree, it tracks
//! nesting depth on a [DepthStack] and keeps the matched parts of the tree
//! as [FoundSpan]s, which are fused whenever two or more of them turn out to
//! be siblings. Memory use is therefore bounded by the input plus the
//! extracted text, independent of the number of vertices.
//!
//! # Quick API
//! * [`extract_str`] - extracts from a string with default settings
//! * [`extract_file`] - extracts from a file with default settings
//!
//! # Full API
//! Configure a [SubtreeExtractor] and call
//! [`extract`](SubtreeExtractor::extract) with a
//! [ByteParser](crate::parser::ByteParser).

pub mod depth;
pub mod extractor;
pub mod outcome;
pub mod span;
pub mod stats;
pub mod taxon;

pub use depth::DepthStack;
pub use extractor::{DEFAULT_POLYTOMY_REPORT_THRESHOLD, ExpandMode, SubtreeExtractor};
pub use outcome::Extraction;
pub use span::{FoundSpan, LiveSpans, SpanOrigin};
pub use stats::ScanStats;
pub use taxon::{DEFAULT_TAXON_TAG, TargetSet, TaxonPattern};

use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;
use std::path::Path;

// ============================================================================
// QUICK EXTRACTION API (pub)
// ============================================================================
/// Extracts the subtree spanning `taxa` from a Newick string, using default
/// settings (expand mode derived from the number of taxa, `_ott` tag).
///
/// # Example
/// ```
/// use cladecut::extract::{Extraction, extract_str};
///
/// let tree = "((Kea_ott1:1,Kaka_ott2:1)Nestor_ott3:2,Kakapo_ott4:3);";
/// assert_eq!(
///     extract_str(tree, ["Nestor"])?,
///     Extraction::Found("(Kea_ott1:1,Kaka_ott2:1)Nestor_ott3:2;".to_string())
/// );
/// # Ok::<(), cladecut::parser::ParsingError>(())
/// ```
pub fn extract_str<I, T>(newick: &str, taxa: I) -> Result<Extraction, ParsingError>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let (extraction, _) = SubtreeExtractor::new(taxa).extract(ByteParser::for_str(newick))?;
    Ok(extraction)
}

/// Reads a file containing one Newick tree into memory and extracts the
/// subtree spanning `taxa`, using default settings.
///
/// # Example
/// ```no_run
/// use cladecut::extract::extract_file;
///
/// let extraction = extract_file("labelled_supertree.tre", ["Apterygidae"])?;
/// if let Some(newick) = extraction.newick() {
///     println!("{newick}");
/// }
/// # Ok::<(), cladecut::parser::ParsingError>(())
/// ```
pub fn extract_file<P, I, T>(path: P, taxa: I) -> Result<Extraction, ParsingError>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let parser = ByteParser::from_file(path)?;
    let (extraction, _) = SubtreeExtractor::new(taxa).extract(parser)?;
    Ok(extraction)
}
