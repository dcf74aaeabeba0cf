//! crates/sarf/tests/resource_loading_test.rs
//!
//! Resource bundle loading through `ResourceManager`.

mod common;

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use sarf::errors::ResourceError;
use sarf::resources::{ResourceManager, ScriptKind};

use common::fixture_path;

/// Writes `contents` as a bundle file inside a fresh temporary directory.
fn write_bundle(contents: &str) -> (TempDir, std::path::PathBuf) {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("resources.json");
  fs::write(&path, contents).unwrap();
  (dir, path)
}

/// Fixture bundle with one top-level key removed.
fn fixture_without(key: &str) -> String {
  let mut bundle: serde_json::Value =
    serde_json::from_str(&fs::read_to_string(fixture_path()).unwrap()).unwrap();
  bundle.as_object_mut().unwrap().remove(key);
  bundle.to_string()
}

// ─── Normal Cases ───────────────────────────────────────────────────────────

#[test]
fn loads_fixture_bundle() {
  let manager = ResourceManager::from_path(fixture_path()).unwrap();
  assert!(!manager.is_loaded());

  let resources = manager.load().unwrap();
  assert!(manager.is_loaded());
  assert_eq!(resources.script().kind(), ScriptKind::Buckwalter);
  assert!(resources.is_valid_prefix("Al"));
  assert!(resources.is_valid_suffix("hm"));
}

#[test]
fn second_load_shares_the_bundle() {
  let manager = ResourceManager::from_path(fixture_path()).unwrap();

  let first = manager.load().unwrap();
  let second = manager.load().unwrap();
  assert!(Arc::ptr_eq(&first, &second));
}

// ─── Abnormal Cases ─────────────────────────────────────────────────────────

#[test]
fn missing_file_is_rejected_up_front() {
  let dir = TempDir::new().unwrap();
  let err = ResourceManager::from_path(dir.path().join("absent.json")).unwrap_err();

  assert!(matches!(err, ResourceError::BundleNotFound(_)), "unexpected error: {err:?}");
}

#[test]
fn directory_is_not_a_bundle() {
  let dir = TempDir::new().unwrap();
  let err = ResourceManager::from_path(dir.path()).unwrap_err();

  assert!(matches!(err, ResourceError::BundleNotFound(_)));
}

#[test]
fn malformed_json_is_a_parse_error() {
  let (_dir, path) = write_bundle("{ \"valid_prefixes\": [");
  let manager = ResourceManager::from_path(&path).unwrap();

  assert!(matches!(manager.load(), Err(ResourceError::Parse(_))));
}

#[test]
fn missing_table_is_named() {
  let (_dir, path) = write_bundle(&fixture_without("gazetteer"));
  let manager = ResourceManager::from_path(&path).unwrap();

  match manager.load() {
    Err(ResourceError::MissingTable { table }) => assert_eq!(table, "gazetteer"),
    other => panic!("expected MissingTable, got {other:?}"),
  }
}

#[test]
fn failed_load_is_cached() {
  let (_dir, path) = write_bundle(&fixture_without("priors"));
  let manager = ResourceManager::from_path(&path).unwrap();

  let first = manager.load().unwrap_err();
  // Fixing the file afterwards does not change the cached outcome
  fs::write(&path, fs::read_to_string(fixture_path()).unwrap()).unwrap();
  let second = manager.load().unwrap_err();

  assert_eq!(first.to_string(), second.to_string());
  assert!(manager.is_loaded());
}

#[test]
fn non_positive_probability_is_rejected() {
  let mut bundle: serde_json::Value =
    serde_json::from_str(&fs::read_to_string(fixture_path()).unwrap()).unwrap();
  bundle["prefix_probabilities"]["w+"] = serde_json::json!(0.0);
  let (_dir, path) = write_bundle(&bundle.to_string());
  let manager = ResourceManager::from_path(&path).unwrap();

  match manager.load() {
    Err(ResourceError::InvalidValue { table, key, .. }) => {
      assert_eq!(table, "prefix_probabilities");
      assert_eq!(key, "w+");
    }
    other => panic!("expected InvalidValue, got {other:?}"),
  }
}

#[test]
fn prior_outside_unit_interval_is_rejected() {
  let mut bundle: serde_json::Value =
    serde_json::from_str(&fs::read_to_string(fixture_path()).unwrap()).unwrap();
  bundle["priors"]["has_template"] = serde_json::json!(1.0);
  let (_dir, path) = write_bundle(&bundle.to_string());
  let manager = ResourceManager::from_path(&path).unwrap();

  assert!(matches!(manager.load(), Err(ResourceError::InvalidPrior { .. })));
}
