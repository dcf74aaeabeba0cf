//! Turns a grouping of a word into a (prefix run, stem, suffix run) triple.

use crate::models::Segmentation;
use crate::resources::MorphemeResources;

/// Classifies groupings against the valid prefix and suffix morpheme sets.
#[derive(Debug, Clone, Copy)]
pub struct SegmentationClassifier<'r> {
  resources: &'r MorphemeResources,
}

impl<'r> SegmentationClassifier<'r> {
  /// Classifier over the morpheme sets of `resources`.
  pub fn new(resources: &'r MorphemeResources) -> Self {
    Self { resources }
  }

  /// Classifies a grouping (contiguous pieces of one word, in order).
  ///
  /// 1. The prefix run is the longest leading sequence of valid prefixes.
  ///    If every group qualifies, the last one is left for the stem.
  /// 2. The suffix run is the longest trailing sequence of valid suffixes
  ///    (or placeholder groups) that does not reach into the prefix run.
  /// 3. When nothing is left between the runs, the suffix run gives up its
  ///    first group to the stem.
  /// 4. A trailing future-tense prefix (`s`) is folded into the stem unless
  ///    the stem opens with a person prefix letter.
  ///
  /// Empty groups are ignored. Returns `None` only if nothing is left.
  pub fn classify<S: AsRef<str>>(&self, groups: &[S]) -> Option<Segmentation> {
    let groups: Vec<&str> = groups.iter().map(AsRef::as_ref).filter(|g| !g.is_empty()).collect();
    let n = groups.len();
    if n == 0 {
      return None;
    }

    let script = self.resources.script();
    let placeholder = script.placeholder();

    let mut prefix_end = groups.iter().take_while(|g| self.resources.is_valid_prefix(g)).count();
    if prefix_end == n {
      prefix_end = n - 1;
    }

    let mut suffix_start = n;
    while suffix_start > prefix_end {
      let group = groups[suffix_start - 1];
      if self.resources.is_valid_suffix(group) || is_single(group, placeholder) {
        suffix_start -= 1;
      } else {
        break;
      }
    }
    if suffix_start == prefix_end {
      suffix_start += 1;
    }

    let mut prefixes: Vec<String> = groups[..prefix_end].iter().map(|g| g.to_string()).collect();
    let mut stem: String = groups[prefix_end..suffix_start].concat();
    let suffixes: Vec<String> = groups[suffix_start..].iter().map(|g| g.to_string()).collect();

    let future = script.future_prefix();
    let folds_future = prefixes.last().is_some_and(|p| is_single(p, future))
      && !stem.chars().next().is_some_and(|c| script.is_person_prefix(c));
    if folds_future {
      prefixes.pop();
      stem.insert(0, future);
    }

    Some(Segmentation::new(prefixes, stem, suffixes))
  }
}

fn is_single(group: &str, c: char) -> bool {
  let mut chars = group.chars();
  chars.next() == Some(c) && chars.next().is_none()
}
