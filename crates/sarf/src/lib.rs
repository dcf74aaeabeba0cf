//! sarf morphological segmentation library
//!
//! Splits normalized Arabic-script word tokens into a prefix run, a stem and
//! a suffix run, ranked by a weighted statistical model.

/// Configuration module - defines SarfConfig and its sections
pub mod config;

/// Error module - defines SarfError, SarfResult and related error types
pub mod errors;

/// Logging module - tracing subscriber setup
pub mod logging;

/// Data model module - defines Segmentation, ScoredSegmentation and output formats
pub mod models;

/// Resource module - resource tables, bundle loading, script glyphs and template matching
pub mod resources;

/// Segmenter module - enumeration, classification, scoring, selection and caching
pub mod segmenter;

/// Service module - provides the high-level SarfService API
pub mod service;

/// Re-exports
pub use config::{LogLevel, SarfConfig};
pub use errors::{SarfError, SarfResult};
pub use models::{OutputFormat, ScoredSegmentation, Segmentation};
pub use resources::{MorphemeResources, PatternTemplateMatcher, ResourceManager, TemplateMatcher};
pub use service::SarfService;
