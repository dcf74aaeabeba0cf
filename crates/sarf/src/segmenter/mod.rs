//! segmenter module
//!
//! Classification, enumeration, scoring, selection and memoization of word
//! segmentations, composed by [`LineSegmenter`].
pub mod cache;
pub mod classifier;
pub mod line;
pub mod partition;
pub mod scorer;
pub mod selector;

/// Re-export
pub use cache::{CachePolicy, SegmentationCache};
pub use classifier::SegmentationClassifier;
pub use line::LineSegmenter;
pub use partition::PartitionEnumerator;
pub use scorer::{Coefficients, FEATURE_COUNT, ScoreBreakdown, SegmentationScorer};
pub use selector::SegmentationSelector;
