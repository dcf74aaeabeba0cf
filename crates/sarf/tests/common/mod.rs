//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use sarf::config::SarfConfig;
use sarf::resources::{MorphemeResources, PatternTemplateMatcher, ResourceManager, Script};
use sarf::service::SarfService;

/// Template patterns matching the fixture bundle's `template_counts`.
pub const PATTERNS: [&str; 3] = ["fEAl", "mfEl", "fEl"];

/// Path of the fixture bundle (Buckwalter).
pub fn fixture_path() -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data").join("resources.json")
}

/// Loads the fixture bundle through `ResourceManager`.
pub fn fixture_resources() -> Arc<MorphemeResources> {
  let manager = ResourceManager::from_path(fixture_path()).expect("fixture bundle exists");
  manager.load().expect("fixture bundle is valid")
}

/// Template matcher over [`PATTERNS`].
pub fn fixture_matcher() -> PatternTemplateMatcher {
  PatternTemplateMatcher::new(&Script::buckwalter(), PATTERNS)
}

/// Service over the fixture bundle with `config`.
pub fn fixture_service(config: SarfConfig) -> SarfService {
  SarfService::init(config, fixture_resources(), Arc::new(fixture_matcher()))
    .expect("valid configuration")
}
