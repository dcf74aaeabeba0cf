//! sarf crate example
//!
//! Loads a resource bundle, segments a line of Buckwalter tokens and prints
//! the ranked alternatives of one word with its score breakdown.
//!
//! Usage: `cargo run --example segment_demo -- [path/to/resources.json]`
//! Without an argument the test fixture bundle is used.

use std::path::PathBuf;
use std::sync::Arc;

use sarf::config::SarfConfig;
use sarf::logging::init_logging;
use sarf::resources::{PatternTemplateMatcher, ResourceManager};
use sarf::service::SarfService;

/// Application common result type
type AppResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Root-slot patterns known to the demo matcher
const PATTERNS: [&str; 3] = ["fEAl", "mfEl", "fEl"];

fn bundle_path() -> PathBuf {
  std::env::args_os().nth(1).map(PathBuf::from).unwrap_or_else(|| {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data").join("resources.json")
  })
}

fn main() -> AppResult<()> {
  let config = SarfConfig::from_json_str(r#"{ "logging": { "level": "debug" } }"#)?;
  // RUST_LOG, when set, overrides the configured level
  init_logging(config.log_level());

  // 1. Load the resource bundle
  let manager = ResourceManager::from_path(bundle_path())?;
  let resources = manager.load()?;

  // 2. Build the service
  let matcher = PatternTemplateMatcher::new(resources.script(), PATTERNS);
  let service = SarfService::init(config, resources, Arc::new(matcher))?;

  // 3. Segment a line
  let tokens = ["wAlktAb", "wlktAbhm", "AlktAbAt", "llktAb", "wbAlqlm", "wAlktAb"];
  let (outputs, report) = service.segment_with_report(tokens);

  println!("=== Segmentation ===");
  for (token, output) in tokens.iter().zip(&outputs) {
    println!("  {token:<12} -> {output}");
  }
  println!(
    "  total={} computed={} cache_hits={} passthrough={}",
    report.total, report.computed, report.cache_hits, report.passthrough
  );

  // 4. Ranked alternatives of one word
  println!("\n=== Top segmentations of wlktAbhm ===");
  for scored in service.top_segmentations("wlktAbhm") {
    println!("  [{:>9.4}] {}", scored.score, scored.segmentation);
  }

  // 5. Score breakdown of the best one
  if let Some((best, breakdown)) = service.explain("wlktAbhm") {
    println!("\n=== Breakdown of {} ===", best.segmentation);
    for (i, (feature, contribution)) in
      breakdown.features.iter().zip(breakdown.contributions.iter()).enumerate()
    {
      println!("  f{:<2} {:>10.4} -> {:>9.4}", i + 1, feature, contribution);
    }
    println!("  total {:.4}", breakdown.total);
  }

  Ok(())
}
