//! Glyph roles of the writing system the resource tables are keyed in.
//!
//! The segmenter never hard-codes letters: every rule that depends on a
//! specific glyph (alef restoration after a lam prefix, alternate spellings
//! of word-final ya and ta, person-prefix letters, the future-tense seen)
//! asks the [`Script`] of the loaded resources.

use serde::{Deserialize, Serialize};

/// Writing system of a resource bundle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptKind {
  /// Buckwalter transliteration (`ktAb`, `lAl`, ...)
  #[default]
  Buckwalter,
  /// Arabic script (U+0621..U+064A)
  Arabic,
}

/// Glyph roles used by the segmentation rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
  kind: ScriptKind,
  lam: char,
  alef: char,
  waw: char,
  fa: char,
  seen: char,
  ya: char,
  alef_maqsura: char,
  ta: char,
  ta_marbuta: char,
  person_prefixes: [char; 4],
  placeholder: char,
  template_slots: [char; 3],
}

impl Script {
  /// Buckwalter transliteration.
  pub fn buckwalter() -> Self {
    Self {
      kind: ScriptKind::Buckwalter,
      lam: 'l',
      alef: 'A',
      waw: 'w',
      fa: 'f',
      seen: 's',
      ya: 'y',
      alef_maqsura: 'Y',
      ta: 't',
      ta_marbuta: 'p',
      person_prefixes: ['y', 't', 'n', '>'],
      placeholder: '_',
      template_slots: ['f', 'E', 'l'],
    }
  }

  /// Arabic script.
  pub fn arabic() -> Self {
    Self {
      kind: ScriptKind::Arabic,
      lam: '\u{0644}',
      alef: '\u{0627}',
      waw: '\u{0648}',
      fa: '\u{0641}',
      seen: '\u{0633}',
      ya: '\u{064A}',
      alef_maqsura: '\u{0649}',
      ta: '\u{062A}',
      ta_marbuta: '\u{0629}',
      person_prefixes: ['\u{064A}', '\u{062A}', '\u{0646}', '\u{0623}'],
      placeholder: '_',
      template_slots: ['\u{0641}', '\u{0639}', '\u{0644}'],
    }
  }

  /// Script preset for a kind.
  pub fn for_kind(kind: ScriptKind) -> Self {
    match kind {
      ScriptKind::Buckwalter => Self::buckwalter(),
      ScriptKind::Arabic => Self::arabic(),
    }
  }

  /// Returns the writing system.
  pub fn kind(&self) -> ScriptKind {
    self.kind
  }

  /// The future-tense prefix letter (seen).
  pub fn future_prefix(&self) -> char {
    self.seen
  }

  /// Marker group that may stand in a suffix run.
  pub fn placeholder(&self) -> char {
    self.placeholder
  }

  /// Root slot letters of template patterns (fa, ain, lam).
  pub fn template_slots(&self) -> [char; 3] {
    self.template_slots
  }

  /// Whether `c` is one of the imperfect-verb person prefixes (y, t, n, hamza-alef).
  pub fn is_person_prefix(&self, c: char) -> bool {
    self.person_prefixes.contains(&c)
  }

  /// Spelling with the elided alef of the article restored.
  ///
  /// `ll…` → `lAl…`, `wll…` → `wlAl…`, `fll…` → `flAl…`. Words without one
  /// of these openings have no alternate spelling.
  pub fn restore_article_alef(&self, word: &str) -> Option<String> {
    let chars: Vec<char> = word.chars().collect();
    let head = match chars.as_slice() {
      [a, b, ..] if *a == self.lam && *b == self.lam => 1,
      [c, a, b, ..] if (*c == self.waw || *c == self.fa) && *a == self.lam && *b == self.lam => 2,
      _ => return None,
    };

    let mut restored = String::with_capacity(word.len() + self.alef.len_utf8());
    restored.extend(&chars[..head]);
    restored.push(self.alef);
    restored.extend(&chars[head..]);
    Some(restored)
  }

  /// `key` with a word-final ya rewritten as alef maqsura.
  pub fn alef_maqsura_variant(&self, key: &str) -> Option<String> {
    replace_final(key, self.ya, self.alef_maqsura)
  }

  /// `key` with a word-final ta rewritten as ta marbuta.
  pub fn ta_marbuta_variant(&self, key: &str) -> Option<String> {
    replace_final(key, self.ta, self.ta_marbuta)
  }

  /// `stem` followed by ta marbuta, offered when the suffix letters open
  /// with ta and are longer than that single letter (`+t+hm`, `+tm`, ...).
  pub fn ta_marbuta_stem(&self, stem: &str, suffix_letters: &str) -> Option<String> {
    let mut letters = suffix_letters.chars();
    if letters.next() == Some(self.ta) && letters.next().is_some() {
      let mut alt = String::with_capacity(stem.len() + self.ta_marbuta.len_utf8());
      alt.push_str(stem);
      alt.push(self.ta_marbuta);
      Some(alt)
    } else {
      None
    }
  }
}

impl Default for Script {
  fn default() -> Self {
    Self::buckwalter()
  }
}

fn replace_final(key: &str, from: char, to: char) -> Option<String> {
  let stripped = key.strip_suffix(from)?;
  let mut out = String::with_capacity(key.len() + to.len_utf8());
  out.push_str(stripped);
  out.push(to);
  Some(out)
}
