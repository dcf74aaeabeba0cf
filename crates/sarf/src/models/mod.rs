//! models module
pub mod model_definition;

/// Re-export
pub use model_definition::{
  FIELD_DELIMITER, MORPHEME_JOINER, OutputFormat, ScoredSegmentation, SegmentReport, Segmentation,
  tidy_joiners,
};
