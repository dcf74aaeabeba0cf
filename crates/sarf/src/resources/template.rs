//! Morphological template matching.

use crate::resources::script::Script;

/// Decides whether a stem fits a known root pattern.
///
/// - `Send + Sync`: shared by every segmentation of a service
/// - Pure: the same stem always yields the same answer
pub trait TemplateMatcher: Send + Sync {
  /// The template `stem` fits, or `None` when it fits none.
  fn fit_template(&self, stem: &str) -> Option<String>;

  /// Whether `stem` fits any known template.
  fn matches_known_template(&self, stem: &str) -> bool {
    self.fit_template(stem).is_some()
  }
}

impl<F> TemplateMatcher for F
where
  F: Fn(&str) -> Option<String> + Send + Sync,
{
  fn fit_template(&self, stem: &str) -> Option<String> {
    self(stem)
  }
}

/// Matcher that knows no templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTemplates;

impl TemplateMatcher for NoTemplates {
  fn fit_template(&self, _stem: &str) -> Option<String> {
    None
  }
}

/// Matches stems against root-slot patterns such as `mfEwl` or `fEAl`.
///
/// A pattern letter that is one of the script's root slots (f, E, l in
/// Buckwalter) matches any stem letter; every other pattern letter must
/// appear verbatim. Stem and pattern must have the same length. Patterns are
/// tried in insertion order and the first match is returned.
#[derive(Debug, Clone)]
pub struct PatternTemplateMatcher {
  slots: [char; 3],
  patterns: Vec<Vec<char>>,
}

impl PatternTemplateMatcher {
  /// Builds a matcher for `script` with the given patterns.
  pub fn new<I, S>(script: &Script, patterns: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    Self {
      slots: script.template_slots(),
      patterns: patterns.into_iter().map(|p| p.as_ref().chars().collect()).collect(),
    }
  }

  /// Number of patterns.
  pub fn len(&self) -> usize {
    self.patterns.len()
  }

  /// Whether the matcher has no patterns.
  pub fn is_empty(&self) -> bool {
    self.patterns.is_empty()
  }

  fn fits(&self, pattern: &[char], stem: &[char]) -> bool {
    pattern.len() == stem.len()
      && pattern.iter().zip(stem).all(|(p, s)| self.slots.contains(p) || p == s)
  }
}

impl TemplateMatcher for PatternTemplateMatcher {
  fn fit_template(&self, stem: &str) -> Option<String> {
    let stem: Vec<char> = stem.chars().collect();
    self.patterns.iter().find(|p| self.fits(p, &stem)).map(|p| p.iter().collect())
  }
}
