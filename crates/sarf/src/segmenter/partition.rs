//! Enumeration of candidate segmentations of a word.
//!
//! Starting from the fully split word (one group per character), new
//! groupings are produced by merging exactly one adjacent pair of groups.
//! Each grouping is classified on the spot; a grouping is only expanded
//! further when its classification has not been seen yet, which collapses
//! the many merge orders that lead to the same segmentation.

use std::collections::HashSet;

use tracing::trace;

use crate::models::Segmentation;
use crate::resources::MorphemeResources;
use crate::segmenter::classifier::SegmentationClassifier;

/// Produces the distinct candidate segmentations of a word.
#[derive(Debug, Clone, Copy)]
pub struct PartitionEnumerator<'r> {
  resources: &'r MorphemeResources,
  classifier: SegmentationClassifier<'r>,
  max_word_length: usize,
}

/// Segmentations collected for one word, in discovery order.
#[derive(Debug, Default)]
struct Collector {
  /// Keys of every classification reached so far (admitted or not)
  seen: HashSet<String>,
  /// Keys of admitted candidates
  admitted_keys: HashSet<String>,
  /// Admitted candidates
  admitted: Vec<Segmentation>,
}

impl Collector {
  /// Records a classification; returns `true` the first time it is reached.
  fn reach(&mut self, key: String) -> bool {
    self.seen.insert(key)
  }

  fn admit(&mut self, segmentation: Segmentation, key: String) {
    if self.admitted_keys.insert(key) {
      self.admitted.push(segmentation);
    }
  }
}

impl<'r> PartitionEnumerator<'r> {
  /// Enumerator over `resources` with the given length cutoff.
  pub fn new(resources: &'r MorphemeResources, max_word_length: usize) -> Self {
    Self {
      resources,
      classifier: SegmentationClassifier::new(resources),
      max_word_length,
    }
  }

  /// Candidate segmentations of `word`, without duplicates, in discovery order.
  ///
  /// - Empty word → no candidates.
  /// - Longer than the cutoff → the whole word as a bare stem.
  /// - Candidates whose stem is a single character are dropped, unless the
  ///   word itself is a single character.
  /// - Words opening with `ll`, `wll` or `fll` are enumerated a second time
  ///   with the article's alef restored (`lAl…`), and both results are merged.
  pub fn enumerate(&self, word: &str) -> Vec<Segmentation> {
    if word.chars().count() > self.max_word_length {
      return vec![Segmentation::bare(word)];
    }

    let mut collector = Collector::default();

    self.enumerate_spelling(word, &mut collector);
    if let Some(restored) = self.resources.script().restore_article_alef(word) {
      self.enumerate_spelling(&restored, &mut collector);
    }

    trace!(word, candidates = collector.admitted.len(), "Partitions enumerated");
    collector.admitted
  }

  fn enumerate_spelling(&self, spelling: &str, collector: &mut Collector) {
    let length = spelling.chars().count();
    if length == 0 {
      return;
    }

    if length > self.max_word_length {
      let bare = Segmentation::bare(spelling);
      let key = bare.key();
      collector.admit(bare, key);
      return;
    }

    let groups: Vec<String> = spelling.chars().map(String::from).collect();
    if let Some(full) = self.classifier.classify(&groups) {
      let key = full.key();
      if collector.reach(key.clone()) {
        self.consider(full, key, length, collector);
      }
    }
    self.expand(&groups, length, collector);
  }

  /// Every grouping one merge away from `groups`, depth first.
  fn expand(&self, groups: &[String], word_length: usize, collector: &mut Collector) {
    for i in 0..groups.len().saturating_sub(1) {
      let mut merged = Vec::with_capacity(groups.len() - 1);
      merged.extend_from_slice(&groups[..i]);
      merged.push(format!("{}{}", groups[i], groups[i + 1]));
      merged.extend_from_slice(&groups[i + 2..]);

      let Some(segmentation) = self.classifier.classify(&merged) else {
        continue;
      };
      let key = segmentation.key();
      if !collector.reach(key.clone()) {
        continue;
      }

      self.consider(segmentation, key, word_length, collector);
      if merged.len() > 1 {
        self.expand(&merged, word_length, collector);
      }
    }
  }

  fn consider(
    &self,
    segmentation: Segmentation,
    key: String,
    word_length: usize,
    collector: &mut Collector,
  ) {
    if segmentation.stem_len() != 1 || word_length == 1 {
      collector.admit(segmentation, key);
    }
  }
}
