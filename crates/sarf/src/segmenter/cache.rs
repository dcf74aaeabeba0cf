//! Per-word memo of rendered segmentations.
//!
//! The cache is owned by one segmentation session and lives until the caller
//! clears it. With [`CachePolicy::Lru`] the least recently used word is
//! evicted once the capacity is reached; [`CachePolicy::Unbounded`] never
//! evicts.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Retention policy of a [`SegmentationCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum CachePolicy {
  /// Keep every word until the cache is cleared
  #[default]
  Unbounded,
  /// Keep at most `capacity` words, evicting the least recently used
  Lru {
    /// Maximum number of cached words (≥ 1)
    capacity: usize,
  },
}

#[derive(Debug, Clone)]
struct Entry {
  rendered: String,
  last_used: u64,
}

/// Word → rendered segmentation.
#[derive(Debug, Clone, Default)]
pub struct SegmentationCache {
  policy: CachePolicy,
  entries: HashMap<String, Entry>,
  /// Recency order (tick → word), only maintained under an LRU policy
  recency: BTreeMap<u64, String>,
  tick: u64,
  hits: u64,
  misses: u64,
}

impl SegmentationCache {
  /// Empty cache with the given policy.
  pub fn new(policy: CachePolicy) -> Self {
    Self {
      policy,
      ..Self::default()
    }
  }

  /// Retention policy.
  pub fn policy(&self) -> CachePolicy {
    self.policy
  }

  /// Rendered segmentation of `word`, if cached. Counts a hit or a miss.
  pub fn get(&mut self, word: &str) -> Option<&str> {
    let tick = self.next_tick();
    let lru = self.is_lru();

    match self.entries.get_mut(word) {
      Some(entry) => {
        self.hits += 1;
        if lru {
          self.recency.remove(&entry.last_used);
          self.recency.insert(tick, word.to_string());
        }
        entry.last_used = tick;
        Some(entry.rendered.as_str())
      }
      None => {
        self.misses += 1;
        None
      }
    }
  }

  /// Whether `word` is cached. Does not touch recency or counters.
  pub fn contains(&self, word: &str) -> bool {
    self.entries.contains_key(word)
  }

  /// Caches the rendered segmentation of `word`, replacing any earlier one.
  pub fn insert(&mut self, word: impl Into<String>, rendered: impl Into<String>) {
    let word = word.into();
    let tick = self.next_tick();

    if let CachePolicy::Lru { capacity } = self.policy {
      if let Some(previous) = self.entries.get(&word) {
        self.recency.remove(&previous.last_used);
      } else {
        while self.entries.len() >= capacity.max(1) {
          let Some((_, oldest)) = self.recency.pop_first() else {
            break;
          };
          self.entries.remove(&oldest);
        }
      }
      self.recency.insert(tick, word.clone());
    }

    self.entries.insert(
      word,
      Entry {
        rendered: rendered.into(),
        last_used: tick,
      },
    );
  }

  /// Number of cached words.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Whether nothing is cached.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Lookups answered from the cache.
  pub fn hits(&self) -> u64 {
    self.hits
  }

  /// Lookups that found nothing.
  pub fn misses(&self) -> u64 {
    self.misses
  }

  /// Drops every entry and resets the counters.
  pub fn clear(&mut self) {
    self.entries.clear();
    self.recency.clear();
    self.tick = 0;
    self.hits = 0;
    self.misses = 0;
  }

  fn is_lru(&self) -> bool {
    matches!(self.policy, CachePolicy::Lru { .. })
  }

  fn next_tick(&mut self) -> u64 {
    self.tick += 1;
    self.tick
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  // ─── Unbounded ────────────────────────────────────────────────────────────

  #[test]
  fn returns_what_was_inserted() {
    let mut cache = SegmentationCache::new(CachePolicy::Unbounded);
    cache.insert("wlktAbhm", "w+l+;ktAb;+hm");

    assert_eq!(cache.get("wlktAbhm"), Some("w+l+;ktAb;+hm"));
    assert_eq!(cache.get("ktAb"), None);
    assert_eq!((cache.hits(), cache.misses()), (1, 1));
  }

  #[test]
  fn unbounded_never_evicts() {
    let mut cache = SegmentationCache::default();
    for i in 0..1_000 {
      cache.insert(format!("w{i}"), format!("s{i}"));
    }

    assert_eq!(cache.len(), 1_000);
    assert_eq!(cache.get("w0"), Some("s0"));
  }

  #[test]
  fn insert_replaces_existing_entry() {
    let mut cache = SegmentationCache::default();
    cache.insert("ktAb", ";ktAb;");
    cache.insert("ktAb", ";ktA;+b");

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get("ktAb"), Some(";ktA;+b"));
  }

  #[test]
  fn clear_resets_everything() {
    let mut cache = SegmentationCache::new(CachePolicy::Lru { capacity: 2 });
    cache.insert("a", "a");
    cache.get("a");
    cache.get("b");
    cache.clear();

    assert!(cache.is_empty());
    assert_eq!((cache.hits(), cache.misses()), (0, 0));
    assert!(!cache.contains("a"));
  }

  // ─── LRU ──────────────────────────────────────────────────────────────────

  #[test]
  fn lru_evicts_least_recently_used() {
    let mut cache = SegmentationCache::new(CachePolicy::Lru { capacity: 2 });
    cache.insert("a", "1");
    cache.insert("b", "2");
    cache.get("a");
    cache.insert("c", "3");

    assert!(cache.contains("a"));
    assert!(!cache.contains("b"));
    assert!(cache.contains("c"));
    assert_eq!(cache.len(), 2);
  }

  #[test]
  fn lru_reinsert_does_not_evict() {
    let mut cache = SegmentationCache::new(CachePolicy::Lru { capacity: 2 });
    cache.insert("a", "1");
    cache.insert("b", "2");
    cache.insert("a", "1'");

    assert_eq!(cache.len(), 2);
    assert!(cache.contains("b"));
    assert_eq!(cache.get("a"), Some("1'"));

    // "b" is now the oldest
    cache.insert("c", "3");
    assert!(!cache.contains("b"));
  }

  #[test]
  fn policy_deserializes_from_tagged_json() {
    let lru: CachePolicy = serde_json::from_str(r#"{"policy":"lru","capacity":8}"#).unwrap();
    let unbounded: CachePolicy = serde_json::from_str(r#"{"policy":"unbounded"}"#).unwrap();

    assert_eq!(lru, CachePolicy::Lru { capacity: 8 });
    assert_eq!(unbounded, CachePolicy::Unbounded);
  }
}
