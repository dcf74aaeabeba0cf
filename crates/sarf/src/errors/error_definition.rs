//! Error definitions

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors related to the segmenter configuration (`SarfConfig`)
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum ConfigError {
  /// segmenter.max_word_length < 1
  #[error("segmenter.max_word_length must be at least 1: actual={actual}")]
  InvalidMaxWordLength {
    /// Actually specified value
    actual: usize,
  },

  /// segmenter.top_k < 1
  #[error("segmenter.top_k must be at least 1: actual={actual}")]
  InvalidTopK {
    /// Actually specified value
    actual: usize,
  },

  /// cache.capacity < 1 while cache.policy is "lru"
  #[error("cache.capacity must be at least 1 for the lru policy: actual={actual}")]
  InvalidCacheCapacity {
    /// Actually specified value
    actual: usize,
  },

  /// A scoring coefficient is NaN or infinite
  #[error("scoring.coefficients[{index}] must be finite: actual={value}")]
  NonFiniteCoefficient {
    /// Position of the coefficient (0-based)
    index: usize,
    /// Offending value
    value: f64,
  },

  /// The JSON configuration document could not be parsed
  #[error("failed to parse the configuration: {0}")]
  Parse(Arc<serde_json::Error>),
}

/// Errors related to the morpheme resource bundle.
///
/// Any of these means the bundle cannot be used: scoring with it would push
/// every candidate onto the miss-penalty path. They surface before any word
/// is segmented.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum ResourceError {
  /// A required table is absent from the bundle
  #[error("required resource table is missing: {table}")]
  MissingTable {
    /// Table name as it appears in the bundle
    table: &'static str,
  },

  /// A table entry cannot be used for scoring (e.g. a probability <= 0)
  #[error("invalid value in table {table}: key={key:?}, value={value}, reason={reason}")]
  InvalidValue {
    /// Table name
    table: &'static str,
    /// Offending key
    key: String,
    /// Offending value
    value: f64,
    /// Why the value was rejected
    reason: &'static str,
  },

  /// A scalar prior is missing or out of range
  #[error("invalid prior {name}: value={value}, expected {expected}")]
  InvalidPrior {
    /// Prior name
    name: &'static str,
    /// Offending value
    value: f64,
    /// Human readable accepted range
    expected: &'static str,
  },

  /// The resource bundle file does not exist
  #[error("resource bundle not found: {0}")]
  BundleNotFound(PathBuf),

  /// No platform data directory could be determined
  #[error("data directory for resource bundles could not be determined")]
  DataDirNotFound,

  /// Reading the bundle failed
  #[error("failed to read resource bundle: path={path:?}, error={source}")]
  Io {
    /// Path that was being read
    path: PathBuf,
    /// Underlying IO error
    #[source]
    source: Arc<io::Error>,
  },

  /// The bundle is not a valid JSON resource document
  #[error("failed to parse resource bundle: {0}")]
  Parse(Arc<serde_json::Error>),
}

/// Unified error
/// Every public API of this crate that can fail returns this error
/// Use as `SarfResult<T>` = `Result<T, SarfError>`
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum SarfError {
  /// Configuration error
  #[error(transparent)]
  Config(#[from] ConfigError),

  /// Resource bundle error
  #[error(transparent)]
  Resource(#[from] ResourceError),
}

/// Standard Result type alias of the sarf crate
pub type SarfResult<T> = Result<T, SarfError>;
