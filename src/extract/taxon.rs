//! Taxon name extraction and the set of outstanding target taxa.

use regex::{CaptureLocations, Regex};
use std::collections::HashSet;

/// Default discriminator tag between a name and its Open Tree of Life id
pub const DEFAULT_TAXON_TAG: &str = "_ott";

// =#========================================================================#=
// TAXON PATTERN
// =#========================================================================$=
/// Recognises taxon labels of the form `<Name><tag><digits>[:<branch length>]`,
/// e.g. `Apteryx_haastii_ott558519:1.2` with tag `_ott`.
///
/// The label is matched against `^(\w*)<tag>\d*(:[\d.]*)?`, so the name is
/// the longest prefix of word characters that is directly followed by the
/// tag. Whatever follows the tag is not required to match.
///
/// # Examples
/// ```
/// use cladecut::extract::TaxonPattern;
///
/// let pattern = TaxonPattern::new("_ott").unwrap();
/// assert_eq!(pattern.canonical_name("Apteryx_haastii_ott558519:1.2"), Some("Apteryx_haastii"));
/// assert_eq!(pattern.canonical_name("Apterygidae_ott3181"), Some("Apterygidae"));
/// assert_eq!(pattern.canonical_name("mrcaott12ott34"), None);
/// assert_eq!(pattern.canonical_name(":0.5"), None);
/// ```
#[derive(Debug, Clone)]
pub struct TaxonPattern {
    tag: String,
    regex: Regex,
}

impl TaxonPattern {
    /// Compiles the pattern for `tag`, which is matched literally.
    pub fn new(tag: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!(r"^(\w*){}\d*(:[\d.]*)?", regex::escape(tag)))?;
        Ok(Self {
            tag: tag.to_string(),
            regex,
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Scratch space for [name_with](Self::name_with), reusable across tokens.
    pub fn capture_locations(&self) -> CaptureLocations {
        self.regex.capture_locations()
    }

    /// The canonical name in `token`, or `None` for anonymous vertices and
    /// labels without the tag.
    pub fn canonical_name<'t>(&self, token: &'t str) -> Option<&'t str> {
        self.name_with(token, &mut self.capture_locations())
    }

    /// Like [canonical_name](Self::canonical_name), with caller-provided
    /// capture storage.
    pub fn name_with<'t>(
        &self,
        token: &'t str,
        locations: &mut CaptureLocations,
    ) -> Option<&'t str> {
        if !token.contains(self.tag.as_str()) {
            return None;
        }
        self.regex.captures_read(locations, token)?;
        let (start, end) = locations.get(1)?;
        Some(&token[start..end])
    }
}

// =#========================================================================#=
// TARGET SET
// =#========================================================================$=
/// The taxon names a scan is looking for.
///
/// Shrinks as taxa are found and never regrows. Remembers the order in which
/// names were requested, so missing names are reported in that order.
#[derive(Debug, Clone, Default)]
pub struct TargetSet {
    requested: Vec<String>,
    outstanding: HashSet<String>,
}

impl TargetSet {
    /// Creates a target set; duplicate names are collapsed.
    pub fn new<I, T>(taxa: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut set = Self::default();
        for taxon in taxa {
            let taxon = taxon.into();
            if set.outstanding.insert(taxon.clone()) {
                set.requested.push(taxon);
            }
        }
        set
    }

    /// Removes `name` from the outstanding taxa.
    ///
    /// # Returns
    /// `true` if `name` was still outstanding, `false` otherwise
    pub fn take(&mut self, name: &str) -> bool {
        self.outstanding.remove(name)
    }

    /// Whether `name` is still outstanding.
    pub fn contains(&self, name: &str) -> bool {
        self.outstanding.contains(name)
    }

    /// Whether every requested taxon has been found.
    pub fn is_empty(&self) -> bool {
        self.outstanding.is_empty()
    }

    /// Number of taxa not yet found.
    pub fn num_outstanding(&self) -> usize {
        self.outstanding.len()
    }

    /// Number of distinct taxa requested.
    pub fn num_requested(&self) -> usize {
        self.requested.len()
    }

    /// The distinct requested taxa, in request order.
    pub fn requested(&self) -> &[String] {
        &self.requested
    }

    /// The taxa not yet found, in request order.
    pub fn outstanding(&self) -> Vec<String> {
        self.requested
            .iter()
            .filter(|taxon| self.outstanding.contains(taxon.as_str()))
            .cloned()
            .collect()
    }
}
