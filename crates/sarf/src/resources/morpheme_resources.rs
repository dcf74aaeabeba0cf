//! Read-only statistical tables consulted by the segmenter.
//!
//! [`ResourceTables`] is the serde shape of a resource bundle: every table is
//! optional so that a missing one can be reported by name. It is turned into
//! a [`MorphemeResources`] by [`MorphemeResources::from_tables`], which checks
//! that every required table is present and that every number the scorer
//! takes a logarithm of is usable. After that the bundle is never mutated and
//! can be shared across threads behind an `Arc`.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::errors::ResourceError;
use crate::resources::script::{Script, ScriptKind};

/// Probability table keyed by a formatted run (`w+l+`, `+hm`).
pub type ProbabilityTable = HashMap<String, f64>;

/// Probability table keyed by a pair of formatted runs.
pub type PairTable = HashMap<String, HashMap<String, f64>>;

/// Serialized form of a resource bundle.
///
/// Field names are the table names used in error messages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceTables {
  /// Writing system the tables are keyed in
  pub script: ScriptKind,

  /// Morphemes allowed in a prefix run
  pub valid_prefixes: Option<HashSet<String>>,
  /// Morphemes allowed in a suffix run
  pub valid_suffixes: Option<HashSet<String>>,

  /// P(prefix run)
  pub prefix_probabilities: Option<ProbabilityTable>,
  /// P(suffix run)
  pub suffix_probabilities: Option<ProbabilityTable>,
  /// P(prefix run | word)
  pub conditional_prefix_probabilities: Option<ProbabilityTable>,
  /// P(suffix run | word)
  pub conditional_suffix_probabilities: Option<ProbabilityTable>,
  /// P(prefix run, suffix run), keyed prefix first
  pub prefix_suffix_probabilities: Option<PairTable>,
  /// P(suffix run, prefix run), keyed suffix first
  pub suffix_prefix_probabilities: Option<PairTable>,

  /// Corpus frequency of stems and stem+suffix compounds
  pub word_counts: Option<HashMap<String, f64>>,
  /// Corpus occurrences of each template
  pub template_counts: Option<HashMap<String, f64>>,

  /// Curated morphological word list
  pub morph_list: Option<HashSet<String>>,
  /// Gazetteer
  pub gazetteer: Option<HashSet<String>>,
  /// Common-word lexicon
  pub common_lexicon: Option<HashSet<String>>,
  /// General lexicon
  pub general_lexicon: Option<HashSet<String>>,
  /// Place names
  pub locations: Option<HashSet<String>>,
  /// Person names
  pub people: Option<HashSet<String>>,
  /// Stopwords
  pub stopwords: Option<HashSet<String>>,

  /// Scalar priors
  pub priors: Option<PriorTable>,

  /// Words whose segmentation candidates are fixed in advance
  pub known_segmentations: HashMap<String, Vec<String>>,
}

/// Serialized scalar priors.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorTable {
  /// Share of stems matching a known template
  pub has_template: Option<f64>,
  /// Share of stems found in the morphological word list
  pub in_morph_list: Option<f64>,
  /// Share of stems found in the gazetteer
  pub in_gaz_list: Option<f64>,
  /// Corpus-average stem length in characters
  pub average_stem_length: Option<f64>,
}

/// Validated scalar priors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Priors {
  /// Share of stems matching a known template, in (0, 1)
  pub has_template: f64,
  /// Share of stems found in the morphological word list, in (0, 1)
  pub in_morph_list: f64,
  /// Share of stems found in the gazetteer, in (0, 1)
  pub in_gaz_list: f64,
  /// Corpus-average stem length, > 0
  pub average_stem_length: f64,
}

/// Single-run probability tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunTable {
  /// P(prefix run)
  Prefix,
  /// P(suffix run)
  Suffix,
  /// P(prefix run | word)
  ConditionalPrefix,
  /// P(suffix run | word)
  ConditionalSuffix,
}

/// Curated word lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexicon {
  /// Morphological word list
  Morph,
  /// Gazetteer
  Gazetteer,
  /// Common-word lexicon
  Common,
  /// General lexicon
  General,
  /// Place names
  Locations,
  /// Person names
  People,
  /// Stopwords
  Stopwords,
}

/// Immutable bundle of tables and priors used to classify and score
/// segmentations.
#[derive(Debug, Clone)]
pub struct MorphemeResources {
  script: Script,
  valid_prefixes: HashSet<String>,
  valid_suffixes: HashSet<String>,
  prefix_probabilities: ProbabilityTable,
  suffix_probabilities: ProbabilityTable,
  conditional_prefix_probabilities: ProbabilityTable,
  conditional_suffix_probabilities: ProbabilityTable,
  prefix_suffix_probabilities: PairTable,
  suffix_prefix_probabilities: PairTable,
  word_counts: HashMap<String, f64>,
  template_counts: HashMap<String, f64>,
  morph_list: HashSet<String>,
  gazetteer: HashSet<String>,
  common_lexicon: HashSet<String>,
  general_lexicon: HashSet<String>,
  locations: HashSet<String>,
  people: HashSet<String>,
  stopwords: HashSet<String>,
  priors: Priors,
  known_segmentations: HashMap<String, Vec<String>>,
}

impl MorphemeResources {
  /// Validates a deserialized bundle.
  ///
  /// # Errors
  /// - `ResourceError::MissingTable` if a required table or prior is absent
  /// - `ResourceError::InvalidValue` if a probability or template count is
  ///   not finite and positive, or a word count is not finite
  /// - `ResourceError::InvalidPrior` if a share prior is outside (0, 1) or
  ///   the average stem length is not finite and positive
  pub fn from_tables(tables: ResourceTables) -> Result<Self, ResourceError> {
    let ResourceTables {
      script,
      valid_prefixes,
      valid_suffixes,
      prefix_probabilities,
      suffix_probabilities,
      conditional_prefix_probabilities,
      conditional_suffix_probabilities,
      prefix_suffix_probabilities,
      suffix_prefix_probabilities,
      word_counts,
      template_counts,
      morph_list,
      gazetteer,
      common_lexicon,
      general_lexicon,
      locations,
      people,
      stopwords,
      priors,
      known_segmentations,
    } = tables;

    let prefix_probabilities =
      check_positive("prefix_probabilities", require("prefix_probabilities", prefix_probabilities)?)?;
    let suffix_probabilities =
      check_positive("suffix_probabilities", require("suffix_probabilities", suffix_probabilities)?)?;
    let conditional_prefix_probabilities = check_positive(
      "conditional_prefix_probabilities",
      require("conditional_prefix_probabilities", conditional_prefix_probabilities)?,
    )?;
    let conditional_suffix_probabilities = check_positive(
      "conditional_suffix_probabilities",
      require("conditional_suffix_probabilities", conditional_suffix_probabilities)?,
    )?;
    let prefix_suffix_probabilities = check_pairs(
      "prefix_suffix_probabilities",
      require("prefix_suffix_probabilities", prefix_suffix_probabilities)?,
    )?;
    let suffix_prefix_probabilities = check_pairs(
      "suffix_prefix_probabilities",
      require("suffix_prefix_probabilities", suffix_prefix_probabilities)?,
    )?;
    let word_counts = check_finite("word_counts", require("word_counts", word_counts)?)?;
    let template_counts =
      check_positive("template_counts", require("template_counts", template_counts)?)?;

    Ok(Self {
      script: Script::for_kind(script),
      valid_prefixes: require("valid_prefixes", valid_prefixes)?,
      valid_suffixes: require("valid_suffixes", valid_suffixes)?,
      prefix_probabilities,
      suffix_probabilities,
      conditional_prefix_probabilities,
      conditional_suffix_probabilities,
      prefix_suffix_probabilities,
      suffix_prefix_probabilities,
      word_counts,
      template_counts,
      morph_list: require("morph_list", morph_list)?,
      gazetteer: require("gazetteer", gazetteer)?,
      common_lexicon: require("common_lexicon", common_lexicon)?,
      general_lexicon: require("general_lexicon", general_lexicon)?,
      locations: require("locations", locations)?,
      people: require("people", people)?,
      stopwords: require("stopwords", stopwords)?,
      priors: check_priors(require("priors", priors)?)?,
      known_segmentations,
    })
  }

  /// Writing system of the tables.
  pub fn script(&self) -> &Script {
    &self.script
  }

  /// Whether `morpheme` may appear in a prefix run.
  pub fn is_valid_prefix(&self, morpheme: &str) -> bool {
    self.valid_prefixes.contains(morpheme)
  }

  /// Whether `morpheme` may appear in a suffix run.
  pub fn is_valid_suffix(&self, morpheme: &str) -> bool {
    self.valid_suffixes.contains(morpheme)
  }

  /// Probability of a formatted run.
  pub fn run_probability(&self, table: RunTable, key: &str) -> Option<f64> {
    let table = match table {
      RunTable::Prefix => &self.prefix_probabilities,
      RunTable::Suffix => &self.suffix_probabilities,
      RunTable::ConditionalPrefix => &self.conditional_prefix_probabilities,
      RunTable::ConditionalSuffix => &self.conditional_suffix_probabilities,
    };
    table.get(key).copied()
  }

  /// Joint probability of a prefix run and a suffix run.
  pub fn prefix_suffix_probability(&self, prefix: &str, suffix: &str) -> Option<f64> {
    self.prefix_suffix_probabilities.get(prefix)?.get(suffix).copied()
  }

  /// Joint probability of a suffix run and a prefix run.
  pub fn suffix_prefix_probability(&self, suffix: &str, prefix: &str) -> Option<f64> {
    self.suffix_prefix_probabilities.get(suffix)?.get(prefix).copied()
  }

  /// Corpus frequency of a stem or compound key.
  pub fn word_count(&self, key: &str) -> Option<f64> {
    self.word_counts.get(key).copied()
  }

  /// Corpus occurrences of a template.
  pub fn template_count(&self, template: &str) -> Option<f64> {
    self.template_counts.get(template).copied()
  }

  /// Whether `key` is in a curated word list.
  pub fn contains(&self, lexicon: Lexicon, key: &str) -> bool {
    let set = match lexicon {
      Lexicon::Morph => &self.morph_list,
      Lexicon::Gazetteer => &self.gazetteer,
      Lexicon::Common => &self.common_lexicon,
      Lexicon::General => &self.general_lexicon,
      Lexicon::Locations => &self.locations,
      Lexicon::People => &self.people,
      Lexicon::Stopwords => &self.stopwords,
    };
    set.contains(key)
  }

  /// Scalar priors.
  pub fn priors(&self) -> &Priors {
    &self.priors
  }

  /// Segmentations fixed in advance for `word`, if any.
  pub fn known_segmentations(&self, word: &str) -> Option<&[String]> {
    self.known_segmentations.get(word).map(Vec::as_slice)
  }
}

fn require<T>(table: &'static str, value: Option<T>) -> Result<T, ResourceError> {
  value.ok_or(ResourceError::MissingTable { table })
}

fn check_finite(
  table: &'static str,
  values: HashMap<String, f64>,
) -> Result<HashMap<String, f64>, ResourceError> {
  check_entries(table, values, |v| v.is_finite(), "must be finite")
}

fn check_positive(
  table: &'static str,
  values: HashMap<String, f64>,
) -> Result<HashMap<String, f64>, ResourceError> {
  check_entries(table, values, |v| v.is_finite() && v > 0.0, "must be finite and positive")
}

fn check_entries(
  table: &'static str,
  values: HashMap<String, f64>,
  accept: impl Fn(f64) -> bool,
  reason: &'static str,
) -> Result<HashMap<String, f64>, ResourceError> {
  if let Some((key, &value)) = values.iter().find(|(_, v)| !accept(**v)) {
    return Err(ResourceError::InvalidValue {
      table,
      key: key.clone(),
      value,
      reason,
    });
  }
  Ok(values)
}

fn check_pairs(table: &'static str, pairs: PairTable) -> Result<PairTable, ResourceError> {
  for (outer, inner) in &pairs {
    if let Some((key, &value)) = inner.iter().find(|(_, v)| !(v.is_finite() && **v > 0.0)) {
      return Err(ResourceError::InvalidValue {
        table,
        key: format!("{outer}|{key}"),
        value,
        reason: "must be finite and positive",
      });
    }
  }
  Ok(pairs)
}

fn check_priors(priors: PriorTable) -> Result<Priors, ResourceError> {
  let share = |name: &'static str, value: Option<f64>| -> Result<f64, ResourceError> {
    let value = value.ok_or(ResourceError::MissingTable { table: name })?;
    if value.is_finite() && value > 0.0 && value < 1.0 {
      Ok(value)
    } else {
      Err(ResourceError::InvalidPrior {
        name,
        value,
        expected: "a share strictly between 0 and 1",
      })
    }
  };

  let has_template = share("priors.has_template", priors.has_template)?;
  let in_morph_list = share("priors.in_morph_list", priors.in_morph_list)?;
  let in_gaz_list = share("priors.in_gaz_list", priors.in_gaz_list)?;

  let average_stem_length = priors
    .average_stem_length
    .ok_or(ResourceError::MissingTable { table: "priors.average_stem_length" })?;
  if !(average_stem_length.is_finite() && average_stem_length > 0.0) {
    return Err(ResourceError::InvalidPrior {
      name: "priors.average_stem_length",
      value: average_stem_length,
      expected: "a finite positive length",
    });
  }

  Ok(Priors {
    has_template,
    in_morph_list,
    in_gaz_list,
    average_stem_length,
  })
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
