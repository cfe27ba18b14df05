//! Result of an extraction.

use crate::extract::span::LiveSpans;
use crate::extract::taxon::TargetSet;
use crate::newick::defs::TERMINATOR;
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;

/// Outcome of a scan that did not hit malformed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// All taxa were found and merged into one clade; the Newick string
    /// is terminated by `;`.
    Found(String),
    /// Some taxa never occurred in the tree; listed in request order.
    NotFound { missing: Vec<String> },
    /// All taxa were found but ended up in several clades that could not
    /// be merged, e.g. because the input is a forest. Each clade is a
    /// complete Newick string terminated by `;`.
    Disjoint { clades: Vec<String> },
}

impl Extraction {
    /// Builds the outcome from the state at the end of a scan.
    pub(crate) fn resolve<S: ByteSource>(
        targets: &TargetSet,
        spans: &LiveSpans,
        parser: &ByteParser<S>,
    ) -> Self {
        if !targets.is_empty() {
            return Extraction::NotFound {
                missing: targets.outstanding(),
            };
        }

        let mut clades: Vec<String> = spans
            .iter()
            .map(|span| terminated(span.text(parser)))
            .collect();

        if clades.len() == 1 {
            Extraction::Found(clades.remove(0))
        } else {
            Extraction::Disjoint { clades }
        }
    }

    /// Whether a single clade was extracted.
    pub fn is_found(&self) -> bool {
        matches!(self, Extraction::Found(_))
    }

    /// The extracted Newick string, if any.
    pub fn newick(&self) -> Option<&str> {
        match self {
            Extraction::Found(newick) => Some(newick),
            _ => None,
        }
    }

    /// Consumes the outcome and returns the extracted Newick string, if any.
    pub fn into_newick(self) -> Option<String> {
        match self {
            Extraction::Found(newick) => Some(newick),
            _ => None,
        }
    }
}

fn terminated(text: &[u8]) -> String {
    let mut newick = String::from_utf8_lossy(text).into_owned();
    newick.push(TERMINATOR as char);
    newick
}
