//! Data Model Definition
use serde::{Deserialize, Serialize};
use std::fmt;

/// Joins morphemes inside a prefix or suffix run.
pub const MORPHEME_JOINER: char = '+';

/// Separates prefix run, stem and suffix run in the delimited form.
pub const FIELD_DELIMITER: char = ';';

/// A word decomposed into a prefix run, a stem and a suffix run.
///
/// The stem is never empty. Concatenating prefixes, stem and suffixes gives
/// back the segmented word.
///
/// Equality, hashing and the cache key all follow the formatted form
/// `p1+p2+;stem;+s1+s2` (see [`Segmentation::key`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segmentation {
  /// Prefix morphemes, outermost first
  prefixes: Vec<String>,

  /// Stem
  stem: String,

  /// Suffix morphemes, innermost first
  suffixes: Vec<String>,
}

/// A segmentation together with its model score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSegmentation {
  /// The scored segmentation
  pub segmentation: Segmentation,

  /// Weighted feature sum, always finite
  pub score: f64,
}

/// How a chosen segmentation is rendered in segmenter output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  /// `w+l+;ktAb;+hm`: runs delimited by `;`
  #[default]
  Delimited,

  /// `w+l+ktAb+hm`: delimiters removed, joiners collapsed and trimmed
  Joined,
}

/// Implementation block for Segmentation
impl Segmentation {
  /// Constructor for Segmentation
  pub fn new(
    prefixes: impl IntoIterator<Item = impl Into<String>>,
    stem: impl Into<String>,
    suffixes: impl IntoIterator<Item = impl Into<String>>,
  ) -> Self {
    Self {
      prefixes: prefixes.into_iter().map(Into::into).collect(),
      stem: stem.into(),
      suffixes: suffixes.into_iter().map(Into::into).collect(),
    }
  }

  /// The whole word as a stem, with empty runs.
  pub fn bare(word: impl Into<String>) -> Self {
    Self {
      prefixes: Vec::new(),
      stem: word.into(),
      suffixes: Vec::new(),
    }
  }

  /// Prefix morphemes, outermost first.
  pub fn prefixes(&self) -> &[String] {
    &self.prefixes
  }

  /// The stem.
  pub fn stem(&self) -> &str {
    &self.stem
  }

  /// Suffix morphemes, innermost first.
  pub fn suffixes(&self) -> &[String] {
    &self.suffixes
  }

  /// The suffix morpheme right after the stem, if any.
  pub fn first_suffix(&self) -> Option<&str> {
    self.suffixes.first().map(String::as_str)
  }

  /// Number of characters in the stem.
  pub fn stem_len(&self) -> usize {
    self.stem.chars().count()
  }

  /// Formatted prefix run: every morpheme followed by a joiner (`w+l+`).
  ///
  /// This is the key of the prefix probability tables. Empty run → `""`.
  pub fn prefix_key(&self) -> String {
    let mut key = String::new();
    for prefix in &self.prefixes {
      key.push_str(prefix);
      key.push(MORPHEME_JOINER);
    }
    key
  }

  /// Formatted suffix run: every morpheme preceded by a joiner (`+h+m`).
  ///
  /// This is the key of the suffix probability tables. Empty run → `""`.
  pub fn suffix_key(&self) -> String {
    let mut key = String::new();
    for suffix in &self.suffixes {
      key.push(MORPHEME_JOINER);
      key.push_str(suffix);
    }
    key
  }

  /// Cache and equality key: `prefix_key;stem;suffix_key`.
  pub fn key(&self) -> String {
    format!(
      "{}{FIELD_DELIMITER}{}{FIELD_DELIMITER}{}",
      self.prefix_key(),
      self.stem,
      self.suffix_key()
    )
  }

  /// The word this segmentation was built from.
  pub fn surface(&self) -> String {
    let mut surface = String::with_capacity(self.stem.len() * 2);
    self.prefixes.iter().for_each(|p| surface.push_str(p));
    surface.push_str(&self.stem);
    self.suffixes.iter().for_each(|s| surface.push_str(s));
    surface
  }

  /// Renders the segmentation for segmenter output.
  pub fn render(&self, format: OutputFormat) -> String {
    match format {
      OutputFormat::Delimited => tidy_joiners(&self.key()),
      OutputFormat::Joined => {
        let joined: String = self.key().chars().filter(|&c| c != FIELD_DELIMITER).collect();
        tidy_joiners(&joined)
      }
    }
  }
}

impl fmt::Display for Segmentation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.key())
  }
}

/// Collapses runs of joiners into one and trims joiners at both ends.
///
/// `"+w++l+"` → `"w+l"`
pub fn tidy_joiners(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  let mut previous_was_joiner = false;
  for c in text.chars() {
    if c == MORPHEME_JOINER {
      if previous_was_joiner {
        continue;
      }
      previous_was_joiner = true;
    } else {
      previous_was_joiner = false;
    }
    out.push(c);
  }
  out.trim_matches(MORPHEME_JOINER).to_string()
}

/// Counters of one `LineSegmenter` run
///
/// Every processed token lands in exactly one of the three buckets, so
/// `cache_hits + computed + passthrough == total` once the run completes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentReport {
  /// Number of tokens processed
  pub total: usize,
  /// Tokens answered from the segmentation cache
  pub cache_hits: usize,
  /// Tokens segmented by enumeration, scoring and selection
  pub computed: usize,
  /// Tokens emitted unchanged because no candidate was produced
  pub passthrough: usize,
}

impl SegmentReport {
  /// Record a cache hit
  pub fn record_cache_hit(&mut self) {
    self.total += 1;
    self.cache_hits += 1;
  }

  /// Record a freshly computed segmentation
  pub fn record_computed(&mut self) {
    self.total += 1;
    self.computed += 1;
  }

  /// Record a token emitted unchanged
  pub fn record_passthrough(&mut self) {
    self.total += 1;
    self.passthrough += 1;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn wl_ktab_hm() -> Segmentation {
    Segmentation::new(["w", "l"], "ktAb", ["hm"])
  }

  #[test]
  fn keys_follow_run_layout() {
    let seg = wl_ktab_hm();

    assert_eq!(seg.prefix_key(), "w+l+");
    assert_eq!(seg.suffix_key(), "+hm");
    assert_eq!(seg.key(), "w+l+;ktAb;+hm");
    assert_eq!(seg.to_string(), seg.key());
  }

  #[test]
  fn bare_segmentation_has_empty_runs() {
    let seg = Segmentation::bare("ktAb");

    assert!(seg.prefixes().is_empty());
    assert!(seg.suffixes().is_empty());
    assert_eq!(seg.key(), ";ktAb;");
    assert_eq!(seg.first_suffix(), None);
  }

  #[test]
  fn surface_concatenates_runs() {
    assert_eq!(wl_ktab_hm().surface(), "wlktAbhm");
    assert_eq!(wl_ktab_hm().stem_len(), 4);
  }

  #[test]
  fn render_delimited_and_joined() {
    let seg = wl_ktab_hm();
    assert_eq!(seg.render(OutputFormat::Delimited), "w+l+;ktAb;+hm");
    assert_eq!(seg.render(OutputFormat::Joined), "w+l+ktAb+hm");

    let bare = Segmentation::bare("ktAb");
    assert_eq!(bare.render(OutputFormat::Joined), "ktAb");
  }

  #[test]
  fn tidy_joiners_collapses_and_trims() {
    assert_eq!(tidy_joiners("+w++l+"), "w+l");
    assert_eq!(tidy_joiners("w+++ktAb"), "w+ktAb");
    assert_eq!(tidy_joiners("+++"), "");
    assert_eq!(tidy_joiners(""), "");
  }

  #[test]
  fn equal_segmentations_share_keys() {
    let a = Segmentation::new(["w"], "ktb", Vec::<String>::new());
    let b = Segmentation::new(vec!["w".to_string()], "ktb".to_string(), Vec::<&str>::new());
    assert_eq!(a, b);
    assert_eq!(a.key(), b.key());
  }

  #[test]
  fn report_buckets_add_up() {
    let mut report = SegmentReport::default();
    report.record_cache_hit();
    report.record_computed();
    report.record_computed();
    report.record_passthrough();

    assert_eq!(report.total, 4);
    assert_eq!(report.cache_hits + report.computed + report.passthrough, report.total);
  }
}
