// crates/sarf/src/service.rs

//! SarfService: integration facade of the sarf crate.
//!
//! - Configuration (SarfConfig), validated once at init
//! - Resource bundle (MorphemeResources), shared read-only
//! - Template matcher, shared read-only
//! - Segmentation cache, the only mutable state, behind a `Mutex`
//!
//! Callers outside the crate only need to deal with this struct.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

use crate::config::SarfConfig;
use crate::errors::SarfResult;
use crate::models::{ScoredSegmentation, SegmentReport};
use crate::resources::{MorphemeResources, ResourceManager, TemplateMatcher};
use crate::segmenter::{LineSegmenter, ScoreBreakdown, SegmentationCache};

/// Integration facade of the sarf crate.
///
/// `Send + Sync`: one service can segment from several threads at once;
/// they share the cache.
pub struct SarfService {
  /// Validated configuration
  config: SarfConfig,

  /// Resource bundle
  resources: Arc<MorphemeResources>,

  /// Template matcher
  matcher: Arc<dyn TemplateMatcher>,

  /// Word → rendered segmentation memo
  cache: Mutex<SegmentationCache>,
}

impl SarfService {
  /// Initialization (config validation + cache construction)
  ///
  /// # Processing Flow
  /// 1. Validate the configuration
  /// 2. Build an empty cache with the configured policy
  ///
  /// # Errors
  /// - Invalid configuration (`ConfigError`)
  pub fn init(
    config: SarfConfig,
    resources: Arc<MorphemeResources>,
    matcher: Arc<dyn TemplateMatcher>,
  ) -> SarfResult<Self> {
    // ConfigError converts into SarfError through #[from]
    config.validate()?;

    let cache = SegmentationCache::new(config.cache_policy());

    info!(
      script = ?resources.script().kind(),
      max_word_length = config.max_word_length(),
      top_k = config.top_k(),
      cache = ?config.cache_policy(),
      "SarfService initialized"
    );

    Ok(Self {
      config,
      resources,
      matcher,
      cache: Mutex::new(cache),
    })
  }

  /// Initialization with the bundle loaded by `manager`
  ///
  /// # Errors
  /// - Invalid configuration (`ConfigError`)
  /// - Resource bundle that cannot be read or fails validation (`ResourceError`)
  pub fn from_manager(
    config: SarfConfig,
    manager: &ResourceManager,
    matcher: Arc<dyn TemplateMatcher>,
  ) -> SarfResult<Self> {
    config.validate()?;
    let resources = manager.load()?;
    Self::init(config, resources, matcher)
  }

  /// Returns the configuration.
  pub fn config(&self) -> &SarfConfig {
    &self.config
  }

  /// Returns the resource bundle.
  pub fn resources(&self) -> &Arc<MorphemeResources> {
    &self.resources
  }

  /// Segments every token, in input order.
  pub fn segment<I, S>(&self, tokens: I) -> Vec<String>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    self.segment_with_report(tokens).0
  }

  /// Segments every token and reports how each one was answered.
  pub fn segment_with_report<I, S>(&self, tokens: I) -> (Vec<String>, SegmentReport)
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut cache = self.lock_cache();
    self.segmenter().segment_with_report(&mut cache, tokens)
  }

  /// Segments one word.
  pub fn segment_word(&self, word: &str) -> String {
    let mut cache = self.lock_cache();
    self.segmenter().segment_word(&mut cache, word)
  }

  /// Ranked segmentations of `word`, highest score first (at most `top_k`).
  ///
  /// Always computed; the cache is neither read nor written.
  pub fn top_segmentations(&self, word: &str) -> Vec<ScoredSegmentation> {
    self.segmenter().rank(word)
  }

  /// Feature breakdown of the best segmentation of `word`.
  ///
  /// `None` when the word has no candidates (empty word).
  pub fn explain(&self, word: &str) -> Option<(ScoredSegmentation, ScoreBreakdown)> {
    let segmenter = self.segmenter();
    let best = segmenter.rank(word).into_iter().next()?;
    let breakdown = segmenter.scorer().explain(&best.segmentation);
    Some((best, breakdown))
  }

  /// Drops every cached segmentation.
  pub fn reset_cache(&self) {
    let mut cache = self.lock_cache();
    let dropped = cache.len();
    cache.clear();
    info!(dropped, "Segmentation cache reset");
  }

  /// Number of cached words.
  pub fn cached_words(&self) -> usize {
    self.lock_cache().len()
  }

  fn segmenter(&self) -> LineSegmenter<'_> {
    LineSegmenter::new(&self.resources, self.matcher.as_ref(), &self.config)
  }

  /// The cache only holds memoized values, so a poisoned lock is still usable.
  fn lock_cache(&self) -> MutexGuard<'_, SegmentationCache> {
    self.cache.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl std::fmt::Debug for SarfService {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SarfService")
      .field("config", &self.config)
      .field("cached_words", &self.cached_words())
      .finish_non_exhaustive()
  }
}
