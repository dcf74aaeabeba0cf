//! Segmentation of a token sequence.
//!
//! Each token goes through the cache first. On a miss its candidates come
//! from the known-segmentations table when it lists the word, otherwise from
//! partition enumeration; the best-ranked candidate is rendered and cached.

use tracing::debug;

use crate::config::SarfConfig;
use crate::models::{
  FIELD_DELIMITER, MORPHEME_JOINER, OutputFormat, ScoredSegmentation, SegmentReport, Segmentation,
};
use crate::resources::{MorphemeResources, TemplateMatcher};
use crate::segmenter::cache::SegmentationCache;
use crate::segmenter::classifier::SegmentationClassifier;
use crate::segmenter::partition::PartitionEnumerator;
use crate::segmenter::scorer::SegmentationScorer;
use crate::segmenter::selector::SegmentationSelector;

/// How a token was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
  CacheHit,
  Computed,
  Passthrough,
}

/// Segments tokens with one resource bundle, matcher and configuration.
#[derive(Clone, Copy)]
pub struct LineSegmenter<'a> {
  resources: &'a MorphemeResources,
  classifier: SegmentationClassifier<'a>,
  enumerator: PartitionEnumerator<'a>,
  scorer: SegmentationScorer<'a>,
  selector: SegmentationSelector<'a>,
  output: OutputFormat,
}

impl<'a> LineSegmenter<'a> {
  /// Segmenter wired from `config`.
  pub fn new(
    resources: &'a MorphemeResources,
    matcher: &'a dyn TemplateMatcher,
    config: &'a SarfConfig,
  ) -> Self {
    let scorer = SegmentationScorer::new(resources, matcher, config.coefficients());
    Self {
      resources,
      classifier: SegmentationClassifier::new(resources),
      enumerator: PartitionEnumerator::new(resources, config.max_word_length()),
      scorer,
      selector: SegmentationSelector::new(scorer, config.top_k()),
      output: config.output_format(),
    }
  }

  /// Scorer used for ranking.
  pub fn scorer(&self) -> &SegmentationScorer<'a> {
    &self.scorer
  }

  /// Candidate segmentations of `word`.
  ///
  /// A word listed in the known-segmentations table takes its candidates
  /// from there (each entry re-classified); any other word is enumerated.
  pub fn candidates(&self, word: &str) -> Vec<Segmentation> {
    let word = strip_markers(word);

    match self.resources.known_segmentations(&word) {
      Some(known) => {
        let mut candidates: Vec<Segmentation> = Vec::with_capacity(known.len());
        for entry in known {
          let joined = entry.replace(FIELD_DELIMITER, "");
          let groups: Vec<&str> = joined.split(MORPHEME_JOINER).collect();
          if let Some(segmentation) = self.classifier.classify(&groups) {
            if !candidates.contains(&segmentation) {
              candidates.push(segmentation);
            }
          }
        }
        candidates
      }
      None => self.enumerator.enumerate(&word),
    }
  }

  /// Best-ranked segmentations of `word`, highest score first. Bypasses the cache.
  pub fn rank(&self, word: &str) -> Vec<ScoredSegmentation> {
    self.selector.select(self.candidates(word))
  }

  /// Rendered segmentation of one word, through `cache`.
  pub fn segment_word(&self, cache: &mut SegmentationCache, word: &str) -> String {
    self.segment_token(cache, word).0
  }

  /// Rendered segmentation of every token, in input order.
  pub fn segment<I, S>(&self, cache: &mut SegmentationCache, tokens: I) -> Vec<String>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    self.segment_with_report(cache, tokens).0
  }

  /// Like [`segment`](Self::segment), plus counters of how each token was answered.
  pub fn segment_with_report<I, S>(
    &self,
    cache: &mut SegmentationCache,
    tokens: I,
  ) -> (Vec<String>, SegmentReport)
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut report = SegmentReport::default();
    let outputs: Vec<String> = tokens
      .into_iter()
      .map(|token| {
        let (rendered, outcome) = self.segment_token(cache, token.as_ref());
        match outcome {
          Outcome::CacheHit => report.record_cache_hit(),
          Outcome::Computed => report.record_computed(),
          Outcome::Passthrough => report.record_passthrough(),
        }
        rendered
      })
      .collect();

    (outputs, report)
  }

  fn segment_token(&self, cache: &mut SegmentationCache, token: &str) -> (String, Outcome) {
    let word = strip_markers(token);

    if let Some(hit) = cache.get(&word) {
      debug!(word = %word, output = hit, "Cache hit");
      return (hit.to_string(), Outcome::CacheHit);
    }

    let candidates = self.candidates(&word);
    let candidate_count = candidates.len();

    let Some(best) = self.selector.best(candidates) else {
      debug!(word = %word, "No candidates; emitting word unchanged");
      return (word, Outcome::Passthrough);
    };

    let rendered = best.segmentation.render(self.output);
    debug!(
      word = %word,
      candidates = candidate_count,
      segmentation = %best.segmentation,
      score = best.score,
      "Word segmented"
    );
    cache.insert(word, rendered.clone());
    (rendered, Outcome::Computed)
  }
}

/// `token` without join markers or field delimiters.
fn strip_markers(token: &str) -> String {
  token.chars().filter(|&c| c != MORPHEME_JOINER && c != FIELD_DELIMITER).collect()
}
