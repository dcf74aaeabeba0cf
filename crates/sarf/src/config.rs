// crates/sarf/src/config.rs

use std::sync::Arc;

use serde::Deserialize;

use crate::errors::ConfigError;
use crate::models::OutputFormat;
use crate::segmenter::{CachePolicy, Coefficients};

/// Words longer than this bypass decomposition and come back as a bare stem.
pub const DEFAULT_MAX_WORD_LENGTH: usize = 20;

/// Number of ranked segmentations kept per word.
pub const DEFAULT_TOP_K: usize = 3;

/// Top-level configuration for sarf.
///
/// Every section is optional; an empty document yields the calibrated
/// reference behavior (see [`SarfConfig::default`]).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SarfConfig {
  /// [segmenter] section
  pub segmenter: SegmenterConfig,
  /// [cache] section
  pub cache: CachePolicy,
  /// [scoring] section
  pub scoring: ScoringConfig,
  /// [logging] section
  pub logging: LoggingConfig,
}

/// [segmenter] section configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
  /// Length cutoff (in characters) above which a word is not decomposed
  pub max_word_length: usize,
  /// Number of ranked segmentations the selector keeps
  pub top_k: usize,
  /// Rendering of the chosen segmentation: "delimited" | "joined"
  pub output: OutputFormat,
}

impl Default for SegmenterConfig {
  fn default() -> Self {
    Self {
      max_word_length: DEFAULT_MAX_WORD_LENGTH,
      top_k: DEFAULT_TOP_K,
      output: OutputFormat::default(),
    }
  }
}

/// [scoring] section configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
  /// The 18 feature weights, in feature order
  pub coefficients: Coefficients,
}

/// [logging] section configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
  /// Log level: "trace" | "debug" | "info" | "warn" | "error"
  pub level: LogLevel,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
  /// trace
  Trace,

  /// debug
  Debug,

  /// info
  #[default]
  Info,

  /// warn
  Warn,

  ///error
  Error,
}

impl LogLevel {
  /// Directive understood by `tracing_subscriber::EnvFilter`.
  pub fn as_directive(&self) -> &'static str {
    match self {
      LogLevel::Trace => "trace",
      LogLevel::Debug => "debug",
      LogLevel::Info => "info",
      LogLevel::Warn => "warn",
      LogLevel::Error => "error",
    }
  }
}

// ===== Loading & Accessor Methods =====

impl SarfConfig {
  /// Parses a JSON configuration document.
  ///
  /// Missing sections and fields fall back to their defaults. The result is
  /// not validated; call [`SarfConfig::validate`] (or `SarfService::init`,
  /// which does it) before use.
  ///
  /// # Errors
  /// Returns `ConfigError::Parse` if the document is not valid JSON or has
  /// fields of the wrong type.
  pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::Parse(Arc::new(e)))
  }

  /// Returns the length cutoff for decomposition.
  pub fn max_word_length(&self) -> usize {
    self.segmenter.max_word_length
  }

  /// Returns the number of ranked segmentations kept per word.
  pub fn top_k(&self) -> usize {
    self.segmenter.top_k
  }

  /// Returns the output rendering.
  pub fn output_format(&self) -> OutputFormat {
    self.segmenter.output
  }

  /// Returns the cache policy.
  pub fn cache_policy(&self) -> CachePolicy {
    self.cache
  }

  /// Returns the scoring coefficients.
  pub fn coefficients(&self) -> &Coefficients {
    &self.scoring.coefficients
  }

  /// Returns the log level.
  pub fn log_level(&self) -> LogLevel {
    self.logging.level
  }

  /// Validates the configuration.
  ///
  /// # Validation Items
  /// - `segmenter.max_word_length` >= 1
  /// - `segmenter.top_k` >= 1
  /// - `cache.capacity` >= 1 when `cache.policy` is `"lru"`
  /// - every `scoring.coefficients` entry is finite
  ///
  /// # Errors
  /// Returns the corresponding `ConfigError` for the first failed item.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.segmenter.max_word_length < 1 {
      return Err(ConfigError::InvalidMaxWordLength {
        actual: self.segmenter.max_word_length,
      });
    }

    if self.segmenter.top_k < 1 {
      return Err(ConfigError::InvalidTopK {
        actual: self.segmenter.top_k,
      });
    }

    if let CachePolicy::Lru { capacity } = self.cache {
      if capacity < 1 {
        return Err(ConfigError::InvalidCacheCapacity { actual: capacity });
      }
    }

    if let Some((index, value)) =
      self.scoring.coefficients.as_slice().iter().copied().enumerate().find(|(_, v)| !v.is_finite())
    {
      return Err(ConfigError::NonFiniteCoefficient { index, value });
    }

    Ok(())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use crate::segmenter::FEATURE_COUNT;

  // ─── Defaults ─────────────────────────────────────────────────────────────

  #[test]
  fn default_matches_reference_behavior() {
    let config = SarfConfig::default();

    assert_eq!(config.max_word_length(), 20);
    assert_eq!(config.top_k(), 3);
    assert_eq!(config.output_format(), OutputFormat::Delimited);
    assert_eq!(config.cache_policy(), CachePolicy::Unbounded);
    assert_eq!(config.coefficients(), &Coefficients::default());
    assert_eq!(config.log_level(), LogLevel::Info);
    assert!(config.validate().is_ok());
  }

  #[test]
  fn empty_document_yields_defaults() {
    let config = SarfConfig::from_json_str("{}").unwrap();

    assert_eq!(config.max_word_length(), DEFAULT_MAX_WORD_LENGTH);
    assert_eq!(config.top_k(), DEFAULT_TOP_K);
    assert_eq!(config.cache_policy(), CachePolicy::Unbounded);
  }

  // ─── Parsing ──────────────────────────────────────────────────────────────

  #[test]
  fn parses_every_section() {
    let json = r#"{
      "segmenter": { "max_word_length": 12, "top_k": 5, "output": "joined" },
      "cache": { "policy": "lru", "capacity": 64 },
      "logging": { "level": "debug" }
    }"#;
    let config = SarfConfig::from_json_str(json).unwrap();

    assert_eq!(config.max_word_length(), 12);
    assert_eq!(config.top_k(), 5);
    assert_eq!(config.output_format(), OutputFormat::Joined);
    assert_eq!(config.cache_policy(), CachePolicy::Lru { capacity: 64 });
    assert_eq!(config.log_level(), LogLevel::Debug);
  }

  #[test]
  fn parses_custom_coefficients() {
    let weights = vec![0.5_f64; FEATURE_COUNT];
    let json = format!(r#"{{ "scoring": {{ "coefficients": {:?} }} }}"#, weights);
    let config = SarfConfig::from_json_str(&json).unwrap();

    assert!(config.coefficients().as_slice().iter().all(|&c| c == 0.5));
  }

  #[test]
  fn rejects_wrong_coefficient_count() {
    let json = r#"{ "scoring": { "coefficients": [1.0, 2.0] } }"#;
    let err = SarfConfig::from_json_str(json).unwrap_err();

    assert!(matches!(err, ConfigError::Parse(_)));
  }

  #[test]
  fn rejects_malformed_json() {
    let err = SarfConfig::from_json_str("{ segmenter: ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
  }

  // ─── validate() Abnormal Cases ──────────────────────────────────────────────

  #[test]
  fn validate_rejects_zero_max_word_length() {
    let mut config = SarfConfig::default();
    config.segmenter.max_word_length = 0;

    let err = config.validate().unwrap_err();
    match err {
      ConfigError::InvalidMaxWordLength { actual } => assert_eq!(actual, 0),
      _ => panic!("expected InvalidMaxWordLength error"),
    }
  }

  #[test]
  fn validate_rejects_zero_top_k() {
    let mut config = SarfConfig::default();
    config.segmenter.top_k = 0;

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidTopK { actual: 0 }));
  }

  #[test]
  fn validate_rejects_zero_lru_capacity() {
    let mut config = SarfConfig::default();
    config.cache = CachePolicy::Lru { capacity: 0 };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidCacheCapacity { actual: 0 }));
  }

  #[test]
  fn validate_rejects_non_finite_coefficient() {
    let mut weights = [0.1; FEATURE_COUNT];
    weights[7] = f64::NAN;
    let mut config = SarfConfig::default();
    config.scoring.coefficients = Coefficients::new(weights);

    let err = config.validate().unwrap_err();
    match err {
      ConfigError::NonFiniteCoefficient { index, value } => {
        assert_eq!(index, 7);
        assert!(value.is_nan());
      }
      _ => panic!("expected NonFiniteCoefficient error"),
    }
  }

  // ─── Error Priority Tests ────────────────────────────────────────────────

  #[test]
  fn validate_reports_max_word_length_first() {
    let mut config = SarfConfig::default();
    config.segmenter.max_word_length = 0; // First error
    config.segmenter.top_k = 0; // Second error candidate

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidMaxWordLength { .. }));
  }

  #[test]
  fn log_level_directives() {
    assert_eq!(LogLevel::Trace.as_directive(), "trace");
    assert_eq!(LogLevel::Error.as_directive(), "error");
  }
}
