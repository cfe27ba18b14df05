//! The subtree extractor and its single-pass scan.

use crate::extract::depth::{DepthStack, OpenGroup};
use crate::extract::outcome::Extraction;
use crate::extract::span::{FoundSpan, LiveSpans};
use crate::extract::stats::ScanStats;
use crate::extract::taxon::{DEFAULT_TAXON_TAG, TargetSet, TaxonPattern};
use crate::newick::{Lexeme, Scanner, TokenSpan};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::{ParsingError, ParsingErrorType};
use regex::CaptureLocations;
use tracing::{debug, info, trace};

/// Groups with at least this many separators (one fewer than children) are
/// logged individually
pub const DEFAULT_POLYTOMY_REPORT_THRESHOLD: usize = 50;

// =#========================================================================#=
// EXPAND MODE
// =#========================================================================$=
/// What a match on a taxon token yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandMode {
    /// A match on the label of an internal vertex yields the whole clade,
    /// from its `(` to the end of the label.
    Expand,
    /// A match yields only the token itself (label and branch length),
    /// whether it labels a leaf or an internal vertex. If taxa were found
    /// below a matched internal label, the label stays their parent, so a
    /// single found child yields `(child)label` rather than the child alone.
    Collapsed,
}

impl ExpandMode {
    /// Mode used when none is configured: a single taxon is expanded into
    /// its clade, several taxa are kept collapsed.
    ///
    /// # Examples
    /// ```
    /// use cladecut::extract::ExpandMode;
    ///
    /// assert_eq!(ExpandMode::default_for(1), ExpandMode::Expand);
    /// assert_eq!(ExpandMode::default_for(2), ExpandMode::Collapsed);
    /// ```
    pub fn default_for(num_taxa: usize) -> Self {
        if num_taxa == 1 {
            ExpandMode::Expand
        } else {
            ExpandMode::Collapsed
        }
    }
}

// =#========================================================================#=
// SUBTREE EXTRACTOR
// =#========================================================================$=
/// Extracts the smallest subtree spanning a set of taxa from a Newick tree
/// in one pass, without building a tree.
///
/// # Configuration
/// * [`with_expand_mode(mode)`](Self::with_expand_mode)
///     - otherwise [ExpandMode::default_for] the number of taxa
/// * [`with_taxon_tag(tag)`](Self::with_taxon_tag)
///     - discriminator between name and id in labels, default `_ott`
/// * [`with_polytomy_report_threshold(n)`](Self::with_polytomy_report_threshold)
///     - groups with at least `n` separators are logged, default 50
///
/// # Algorithm
/// The scan keeps a stack of open `(` offsets and a list of found spans,
/// each tagged with its depth. A token naming an outstanding taxon becomes a
/// span. When a group closes, all spans directly below it move up one level;
/// if there are two or more of them, they are fused into
/// `(span,span,...)label`. The scan stops once every taxon was found and at
/// most one span is left.
///
/// # Example
/// ```
/// use cladecut::extract::{Extraction, SubtreeExtractor};
/// use cladecut::parser::ByteParser;
///
/// let input = "((Kea_ott1:1,Kaka_ott2:1)Nestor_ott3:2,Kakapo_ott4:3);";
/// let extractor = SubtreeExtractor::new(["Kea", "Kaka"]);
/// let (extraction, _stats) = extractor.extract(ByteParser::for_str(input)).unwrap();
/// assert_eq!(
///     extraction,
///     Extraction::Found("(Kea_ott1:1,Kaka_ott2:1)Nestor_ott3:2;".to_string())
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SubtreeExtractor {
    targets: TargetSet,
    expand_mode: Option<ExpandMode>,
    taxon_tag: String,
    polytomy_report_threshold: usize,
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl SubtreeExtractor {
    /// Creates an extractor for the given taxon names with default settings.
    pub fn new<I, T>(taxa: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            targets: TargetSet::new(taxa),
            expand_mode: None,
            taxon_tag: DEFAULT_TAXON_TAG.to_string(),
            polytomy_report_threshold: DEFAULT_POLYTOMY_REPORT_THRESHOLD,
        }
    }

    /// Sets the expand mode explicitly.
    pub fn with_expand_mode(mut self, mode: ExpandMode) -> Self {
        self.expand_mode = Some(mode);
        self
    }

    /// Sets the tag separating a taxon name from its numeric id.
    pub fn with_taxon_tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.taxon_tag = tag.into();
        self
    }

    /// Sets the number of separators from which on a group is logged, i.e.
    /// groups with more than `threshold` children.
    pub fn with_polytomy_report_threshold(mut self, threshold: usize) -> Self {
        self.polytomy_report_threshold = threshold;
        self
    }

    /// The expand mode a scan will use.
    pub fn expand_mode(&self) -> ExpandMode {
        self.expand_mode
            .unwrap_or_else(|| ExpandMode::default_for(self.targets.num_requested()))
    }

    /// Whether a closed group with `children` children is logged as a
    /// large polytomy.
    pub fn reports_polytomy(&self, children: usize) -> bool {
        children > self.polytomy_report_threshold
    }
}

// ============================================================================
// API Extraction (pub)
// ============================================================================
impl SubtreeExtractor {
    /// Scans the tree held by `parser` and extracts the subtree spanning
    /// the requested taxa.
    ///
    /// # Returns
    /// * `Ok((Extraction, ScanStats))` - The outcome, which may also be that
    ///   taxa are missing, together with scan diagnostics
    /// * `Err(ParsingError)` - If the input is structurally malformed, no
    ///   taxa were requested or the taxon tag does not compile
    pub fn extract<S: ByteSource>(
        &self,
        parser: ByteParser<S>,
    ) -> Result<(Extraction, ScanStats), ParsingError> {
        if self.targets.num_requested() == 0 {
            return Err(ParsingError::without_context(
                ParsingErrorType::NoTaxaRequested,
            ));
        }

        let pattern = TaxonPattern::new(&self.taxon_tag).map_err(|err| {
            ParsingError::without_context(ParsingErrorType::InvalidTaxonTag(err.to_string()))
        })?;
        let mode = self.expand_mode();
        debug!(taxa = self.targets.num_requested(), ?mode, "starting scan");

        let mut session = ScanSession {
            config: self,
            mode,
            locations: pattern.capture_locations(),
            pattern,
            scanner: Scanner::new(parser),
            depth: DepthStack::new(),
            targets: self.targets.clone(),
            spans: LiveSpans::new(),
            stats: ScanStats::default(),
        };
        session.run()?;

        let extraction =
            Extraction::resolve(&session.targets, &session.spans, session.scanner.parser());
        info!("{}", session.stats);
        Ok((extraction, session.stats))
    }
}

// =#========================================================================#=
// SCAN SESSION
// =#========================================================================$=
/// Mutable state of one scan.
struct ScanSession<'c, S: ByteSource> {
    config: &'c SubtreeExtractor,
    mode: ExpandMode,
    pattern: TaxonPattern,
    locations: CaptureLocations,
    scanner: Scanner<S>,
    depth: DepthStack,
    targets: TargetSet,
    spans: LiveSpans,
    stats: ScanStats,
}

impl<S: ByteSource> ScanSession<'_, S> {
    /// Scans until all taxa are merged into at most one span or the tree ends.
    fn run(&mut self) -> Result<(), ParsingError> {
        // Whether a vertex may begin here: at the start, after `(` and after `,`
        let mut expect_vertex = true;

        while !(self.targets.is_empty() && self.spans.len() < 2) {
            match self.scanner.next_lexeme()? {
                Lexeme::Open(offset) => {
                    if !expect_vertex {
                        return Err(ParsingError::misplaced_group(
                            self.scanner.parser(),
                            offset,
                        ));
                    }
                    self.depth.push(offset);
                }
                Lexeme::Token(token) => {
                    self.visit_leaf(token);
                    expect_vertex = false;
                }
                Lexeme::Separator => {
                    self.depth.count_sibling();
                    expect_vertex = true;
                }
                Lexeme::Close(offset) => {
                    let group = self.depth.pop().ok_or_else(|| {
                        ParsingError::unbalanced_close(self.scanner.parser(), offset)
                    })?;
                    let label = self.scanner.read_token()?;
                    self.close_group(group, label);
                    expect_vertex = false;
                }
                Lexeme::Terminator => {
                    if !self.depth.is_empty() {
                        return Err(ParsingError::unclosed_group(
                            self.scanner.parser(),
                            self.depth.depth(),
                        ));
                    }
                    break;
                }
            }
        }

        self.stats.bytes_scanned = self.scanner.position();
        self.stats.max_depth = self.depth.max_depth();
        Ok(())
    }

    /// A token not preceded by `)`: a leaf.
    fn visit_leaf(&mut self, token: TokenSpan) {
        if self.take_taxon(token) {
            self.spans
                .push(FoundSpan::token(token, self.depth.depth()));
        }
    }

    /// A `)` followed by its (possibly empty) label; the group is already
    /// popped, so the current depth is the parent's.
    fn close_group(&mut self, group: OpenGroup, label: TokenSpan) {
        let depth = self.depth.depth();

        self.stats.record_group(group.children);
        if self.config.reports_polytomy(group.children) {
            debug!(
                label = %String::from_utf8_lossy(label.label(self.scanner.parser())),
                children = group.children,
                offset = group.start,
                "large polytomy"
            );
        }

        let label_matched = self.take_taxon(label);
        let children = self.spans.promote(depth);
        if !children.is_empty() {
            trace!(depth, promoted = children.len(), "promoted spans");
        }

        match (self.mode, label_matched, children.len()) {
            // The clade subsumes whatever was found inside it
            (ExpandMode::Expand, true, _) => {
                self.spans
                    .replace(&children, FoundSpan::slice(group.start, label.end, depth));
            }
            (ExpandMode::Collapsed, true, 0) => {
                self.spans.push(FoundSpan::token(label, depth));
            }
            // A matched label keeps its found descendants attached, even a single one
            (ExpandMode::Collapsed, true, _) | (_, false, 2..) => {
                self.spans
                    .fuse(&children, label, depth, self.scanner.parser());
                self.stats.fusions += 1;
            }
            _ => {}
        }
    }

    /// Counts the token and, if it names an outstanding taxon, takes that
    /// taxon out of the target set.
    fn take_taxon(&mut self, token: TokenSpan) -> bool {
        self.stats.tokens += 1;

        let Ok(text) = std::str::from_utf8(token.text(self.scanner.parser())) else {
            return false;
        };
        let Some(name) = self.pattern.name_with(text, &mut self.locations) else {
            return false;
        };
        self.stats.taxon_tokens += 1;

        if self.targets.take(name) {
            debug!(
                taxon = name,
                offset = token.start,
                depth = self.depth.depth(),
                remaining = self.targets.num_outstanding(),
                "found taxon"
            );
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(input: &str, taxa: &[&str], mode: Option<ExpandMode>) -> Extraction {
        let mut extractor = SubtreeExtractor::new(taxa.iter().copied());
        if let Some(mode) = mode {
            extractor = extractor.with_expand_mode(mode);
        }
        extractor.extract(ByteParser::for_str(input)).unwrap().0
    }

    #[test]
    fn test_default_mode_follows_number_of_taxa() {
        assert_eq!(SubtreeExtractor::new(["A"]).expand_mode(), ExpandMode::Expand);
        assert_eq!(
            SubtreeExtractor::new(["A", "B"]).expand_mode(),
            ExpandMode::Collapsed
        );
        // Duplicates collapse before the default is derived
        assert_eq!(SubtreeExtractor::new(["A", "A"]).expand_mode(), ExpandMode::Expand);
        assert_eq!(
            SubtreeExtractor::new(["A"])
                .with_expand_mode(ExpandMode::Collapsed)
                .expand_mode(),
            ExpandMode::Collapsed
        );
    }

    #[test]
    fn test_polytomy_threshold_counts_separators() {
        let extractor = SubtreeExtractor::new(["A"]);
        assert!(!extractor.reports_polytomy(DEFAULT_POLYTOMY_REPORT_THRESHOLD));
        assert!(extractor.reports_polytomy(DEFAULT_POLYTOMY_REPORT_THRESHOLD + 1));

        let extractor = extractor.with_polytomy_report_threshold(2);
        assert!(!extractor.reports_polytomy(2));
        assert!(extractor.reports_polytomy(3));
    }

    #[test]
    fn test_no_taxa() {
        let err = SubtreeExtractor::new(Vec::<String>::new())
            .extract(ByteParser::for_str("(A_ott1,B_ott2);"))
            .unwrap_err();
        assert_eq!(err.kind(), &ParsingErrorType::NoTaxaRequested);
    }

    #[test]
    fn test_collapsed_label_with_single_found_child() {
        let input = "(((A_ott1,B_ott2)C_ott3,D_ott4)E_ott5,F_ott6);";
        let outcome = extract(input, &["A", "E"], Some(ExpandMode::Collapsed));
        assert_eq!(outcome.newick(), Some("(A_ott1)E_ott5;"));
    }

    #[test]
    fn test_collapsed_label_with_found_children() {
        let input = "(((A_ott1,B_ott2)C_ott3,D_ott4)E_ott5,F_ott6);";
        let outcome = extract(input, &["A", "D", "E"], None);
        assert_eq!(outcome.newick(), Some("(A_ott1,D_ott4)E_ott5;"));
    }

    #[test]
    fn test_expand_absorbs_found_descendants() {
        let input = "(((A_ott1,B_ott2)C_ott3,D_ott4)E_ott5,F_ott6);";
        let outcome = extract(input, &["A", "C"], Some(ExpandMode::Expand));
        assert_eq!(outcome.newick(), Some("(A_ott1,B_ott2)C_ott3;"));
    }

    #[test]
    fn test_stats() {
        let input = "((A_ott1,B_ott2,C_ott3)D_ott4,(E_ott5,F)G,H_ott8);";
        let (_, stats) = SubtreeExtractor::new(["Z"])
            .extract(ByteParser::for_str(input))
            .unwrap();
        assert_eq!(stats.bytes_scanned, input.len());
        assert_eq!(stats.tokens, 9);
        assert_eq!(stats.taxon_tokens, 6);
        assert_eq!(stats.groups_closed, 3);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.polytomies, 2);
        assert_eq!(stats.largest_polytomy, 3);
        assert_eq!(stats.fusions, 0);
    }
}
