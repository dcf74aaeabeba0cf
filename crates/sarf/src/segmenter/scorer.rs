//! Weighted multi-feature scoring of a segmentation.
//!
//! The score is `Σ cᵢ·fᵢ` over 18 features computed from the resource
//! tables. Every lookup has a fixed miss value, so a segmentation scores to a
//! finite number whatever subset of the tables knows about it.

use serde::{Deserialize, Serialize};

use crate::models::Segmentation;
use crate::resources::{Lexicon, MorphemeResources, RunTable, TemplateMatcher};

/// Number of scoring features.
pub const FEATURE_COUNT: usize = 18;

/// Miss value of single-run probabilities, word counts and template counts
const MISS: f64 = -10.0;

/// Miss value of joint and conditional probabilities
const JOINT_MISS: f64 = -20.0;

/// Floor of the stem-length distance before its logarithm
const LENGTH_DISTANCE_FLOOR: f64 = 0.01;

/// Calibrated feature weights, in feature order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coefficients([f64; FEATURE_COUNT]);

impl Coefficients {
  /// Weights in feature order.
  pub fn new(weights: [f64; FEATURE_COUNT]) -> Self {
    Self(weights)
  }

  /// Weights as a slice.
  pub fn as_slice(&self) -> &[f64] {
    &self.0
  }
}

impl Default for Coefficients {
  /// The reference calibration.
  fn default() -> Self {
    Self([
      -0.097825818,
      -0.03893654,
      0.13109569,
      0.18436976,
      0.11448806,
      0.53001714,
      0.21098258,
      -0.17760228,
      0.44223878,
      0.26183113,
      -0.05603376,
      0.055829503,
      -0.17745291,
      0.015865559,
      0.66909122,
      0.16948195,
      0.15397599,
      0.60355717,
    ])
  }
}

/// Per-feature view of one score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
  /// Raw feature values
  pub features: [f64; FEATURE_COUNT],
  /// `coefficient × feature`, per feature
  pub contributions: [f64; FEATURE_COUNT],
  /// Sum of the contributions
  pub total: f64,
}

/// Scores segmentations against one resource bundle and template matcher.
#[derive(Clone, Copy)]
pub struct SegmentationScorer<'a> {
  resources: &'a MorphemeResources,
  matcher: &'a dyn TemplateMatcher,
  coefficients: &'a Coefficients,
}

impl<'a> SegmentationScorer<'a> {
  /// Scorer over `resources`, `matcher` and `coefficients`.
  pub fn new(
    resources: &'a MorphemeResources,
    matcher: &'a dyn TemplateMatcher,
    coefficients: &'a Coefficients,
  ) -> Self {
    Self {
      resources,
      matcher,
      coefficients,
    }
  }

  /// Score of `segmentation`; higher is more likely.
  pub fn score(&self, segmentation: &Segmentation) -> f64 {
    self.explain(segmentation).total
  }

  /// Raw features, weighted contributions and total score of `segmentation`.
  pub fn explain(&self, segmentation: &Segmentation) -> ScoreBreakdown {
    let features = self.features(segmentation);

    let mut contributions = [0.0; FEATURE_COUNT];
    for (i, (c, f)) in self.coefficients.as_slice().iter().zip(features).enumerate() {
      contributions[i] = c * f;
    }

    ScoreBreakdown {
      features,
      contributions,
      total: contributions.iter().sum(),
    }
  }

  fn features(&self, segmentation: &Segmentation) -> [f64; FEATURE_COUNT] {
    let res = self.resources;
    let script = res.script();
    let priors = res.priors();

    let prefix = segmentation.prefix_key();
    let suffix = segmentation.suffix_key();
    let stem = segmentation.stem();
    let suffix_letters = segmentation.suffixes().concat();

    // Alternate stem spellings, tried after the stem itself
    let maqsura_stem = script.alef_maqsura_variant(stem);
    let marbuta_stem = script.ta_marbuta_stem(stem, &suffix_letters);

    let compound = match segmentation.first_suffix() {
      Some(first) => format!("{stem}{first}"),
      None => stem.to_string(),
    };
    let marbuta_compound = script.ta_marbuta_variant(&compound);

    let template = self.matcher.fit_template(stem);

    let mut f = [0.0; FEATURE_COUNT];

    // 1-2: standalone runs
    f[0] = log_or(res.run_probability(RunTable::Prefix, &prefix), MISS);
    f[1] = log_or(res.run_probability(RunTable::Suffix, &suffix), MISS);

    // 3: stem frequency
    f[2] = first_hit(
      [Some(stem), maqsura_stem.as_deref(), marbuta_stem.as_deref()],
      |k| res.word_count(k),
    )
    .unwrap_or(MISS);

    // 4-5: joint runs
    f[3] = log_or(res.prefix_suffix_probability(&prefix, &suffix), JOINT_MISS);
    f[4] = log_or(res.suffix_prefix_probability(&suffix, &prefix), JOINT_MISS);

    // 6: template fit, prior applied on a miss
    f[5] = if template.is_none() {
      priors.has_template.ln()
    } else {
      (1.0 - priors.has_template).ln()
    };

    // 7-8: curated lists
    let spellings = [Some(stem), maqsura_stem.as_deref()];
    f[6] = membership_prior(self.in_any(Lexicon::Morph, spellings), priors.in_morph_list);
    f[7] = membership_prior(self.in_any(Lexicon::Gazetteer, spellings), priors.in_gaz_list);

    // 9-10: conditional runs
    f[8] = log_or(res.run_probability(RunTable::ConditionalPrefix, &prefix), JOINT_MISS);
    f[9] = log_or(res.run_probability(RunTable::ConditionalSuffix, &suffix), JOINT_MISS);

    // 11: stem + first suffix
    f[10] = first_hit(
      [Some(compound.as_str()), maqsura_stem.as_deref(), marbuta_compound.as_deref()],
      |k| res.word_count(k),
    )
    .unwrap_or(MISS);

    // 12: template frequency
    f[11] = log_or(template.as_deref().and_then(|t| res.template_count(t)), MISS);

    // 13: distance from the average stem length
    let distance = (segmentation.stem_len() as f64 - priors.average_stem_length).abs();
    f[12] = distance.max(LENGTH_DISTANCE_FLOOR).ln();

    // 14: common lexicon, weighted by the frequency of the spelling found
    f[13] = first_hit(
      [Some(stem), maqsura_stem.as_deref(), marbuta_stem.as_deref()],
      |k| res.contains(Lexicon::Common, k).then(|| res.word_count(k).unwrap_or(MISS)),
    )
    .unwrap_or(JOINT_MISS);

    // 15-18: symmetric list bonuses
    f[14] = sign(self.in_any(Lexicon::General, spellings));
    f[15] = sign(res.contains(Lexicon::Locations, stem));
    f[16] = sign(res.contains(Lexicon::People, stem));
    f[17] = sign(self.in_any(Lexicon::Stopwords, spellings));

    f
  }

  fn in_any<const N: usize>(&self, lexicon: Lexicon, keys: [Option<&str>; N]) -> bool {
    keys.into_iter().flatten().any(|k| self.resources.contains(lexicon, k))
  }
}

/// First value produced by `lookup` over `keys`, in order.
fn first_hit<const N: usize>(
  keys: [Option<&str>; N],
  lookup: impl Fn(&str) -> Option<f64>,
) -> Option<f64> {
  keys.into_iter().flatten().find_map(lookup)
}

fn log_or(probability: Option<f64>, miss: f64) -> f64 {
  probability.map_or(miss, f64::ln)
}

fn membership_prior(member: bool, prior: f64) -> f64 {
  if member { prior.ln() } else { (1.0 - prior).ln() }
}

fn sign(member: bool) -> f64 {
  if member { 1.0 } else { -1.0 }
}
