//! Diagnostics collected while scanning.

use std::fmt;

/// Counters of a single scan.
///
/// The scan stops as soon as the answer is known, so all counts refer to
/// the scanned prefix of the input ([bytes_scanned](Self::bytes_scanned)).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Offset at which the scan stopped
    pub bytes_scanned: usize,
    /// Tokens read, including the (possibly empty) labels of closed groups
    pub tokens: usize,
    /// Tokens whose label follows the `<name><tag><id>` convention
    pub taxon_tokens: usize,
    /// Groups closed, i.e. internal vertices passed
    pub groups_closed: usize,
    /// Deepest nesting seen
    pub max_depth: usize,
    /// Closed groups with more than two children
    pub polytomies: usize,
    /// Children of the largest polytomy, 0 if there is none
    pub largest_polytomy: usize,
    /// Number of times sibling spans were fused
    pub fusions: usize,
}

impl ScanStats {
    /// Registers a closed group with the given number of children.
    pub(crate) fn record_group(&mut self, children: usize) {
        self.groups_closed += 1;
        if children > 2 {
            self.polytomies += 1;
            self.largest_polytomy = self.largest_polytomy.max(children);
        }
    }
}

impl fmt::Display for ScanStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scanned {} bytes: {} tokens ({} taxa), {} groups, max depth {}, {} polytomies (largest {}), {} fusions",
            self.bytes_scanned,
            self.tokens,
            self.taxon_tokens,
            self.groups_closed,
            self.max_depth,
            self.polytomies,
            self.largest_polytomy,
            self.fusions
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_group() {
        let mut stats = ScanStats::default();
        stats.record_group(2);
        stats.record_group(5);
        stats.record_group(3);
        assert_eq!(stats.groups_closed, 3);
        assert_eq!(stats.polytomies, 2);
        assert_eq!(stats.largest_polytomy, 5);
    }
}
