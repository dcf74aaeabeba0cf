//! Ranking of scored candidates.

use std::cmp::Ordering;

use crate::models::{ScoredSegmentation, Segmentation};
use crate::segmenter::scorer::SegmentationScorer;

/// Keeps the `top_k` best-scoring candidates of a word.
#[derive(Clone, Copy)]
pub struct SegmentationSelector<'a> {
  scorer: SegmentationScorer<'a>,
  top_k: usize,
}

impl<'a> SegmentationSelector<'a> {
  /// Selector ranking with `scorer` and keeping at most `top_k` candidates.
  pub fn new(scorer: SegmentationScorer<'a>, top_k: usize) -> Self {
    Self { scorer, top_k }
  }

  /// Candidates ranked by descending score, at most `top_k` of them.
  ///
  /// Equal scores keep the order the candidates were given in.
  pub fn select(&self, candidates: Vec<Segmentation>) -> Vec<ScoredSegmentation> {
    let mut scored: Vec<ScoredSegmentation> = candidates
      .into_iter()
      .map(|segmentation| {
        let score = self.scorer.score(&segmentation);
        ScoredSegmentation {
          segmentation,
          score,
        }
      })
      .collect();

    // sort_by is stable
    scored.sort_by(|a, b| descending(a.score, b.score));
    scored.truncate(self.top_k);
    scored
  }

  /// The best candidate, if any.
  pub fn best(&self, candidates: Vec<Segmentation>) -> Option<ScoredSegmentation> {
    self.select(candidates).into_iter().next()
  }
}

fn descending(a: f64, b: f64) -> Ordering {
  b.total_cmp(&a)
}
