//! crates/sarf/tests/integration_test.rs
//!
//! End-to-end integration test.
//! Verifies the entire flow: Load resource bundle -> Build service ->
//! Segment tokens -> Verify outputs, cache behavior and rankings.

mod common;

use std::sync::Arc;
use std::thread;

use sarf::config::SarfConfig;
use sarf::models::OutputFormat;
use sarf::segmenter::CachePolicy;

use common::fixture_service;

/// Integration test for the basic segmentation flow.
#[test]
fn segments_a_line_of_tokens() {
  let service = fixture_service(SarfConfig::default());

  let outputs = service.segment(["wAlktAb", "wlktAbhm", "AlktAbAt", "wbAlqlm"]);

  assert_eq!(
    outputs,
    vec!["w+Al+;ktAb;", "w+l+;ktAb;+hm", "Al+;ktAb;+At", "w+b+Al+;qlm;"]
  );
}

/// Words opening with "ll" are segmented through the restored article.
#[test]
fn double_lam_segments_with_restored_article() {
  let service = fixture_service(SarfConfig::default());

  assert_eq!(service.segment_word("llktAb"), "l+Al+;ktAb;");
}

/// Known segmentations replace enumeration.
#[test]
fn known_segmentation_is_used() {
  let service = fixture_service(SarfConfig::default());
  let ranked = service.top_segmentations("ElYh");

  assert_eq!(ranked.len(), 1);
  assert_eq!(service.segment_word("ElYh"), ";ElY;+h");
}

/// Joined output drops the field delimiters.
#[test]
fn joined_output_format() {
  let mut config = SarfConfig::default();
  config.segmenter.output = OutputFormat::Joined;
  let service = fixture_service(config);

  assert_eq!(service.segment(["wlktAbhm", "ktAb"]), vec!["w+l+ktAb+hm", "ktAb"]);
}

/// Configuration parsed from JSON drives the service.
#[test]
fn json_configuration_end_to_end() {
  let config = SarfConfig::from_json_str(
    r#"{
      "segmenter": { "top_k": 2, "output": "delimited" },
      "cache": { "policy": "lru", "capacity": 2 }
    }"#,
  )
  .unwrap();
  let service = fixture_service(config);

  assert_eq!(service.top_segmentations("wlktAbhm").len(), 2);

  service.segment(["wAlktAb", "wlktAbhm", "AlktAbAt"]);
  assert_eq!(service.cached_words(), 2);
}

/// Report counters add up, and a repeated word is served from the cache.
#[test]
fn report_counts_cache_hits() {
  let service = fixture_service(SarfConfig::default());

  let (outputs, report) = service.segment_with_report(["wAlktAb", "", "wAlktAb"]);

  assert_eq!(outputs[0], outputs[2]);
  assert_eq!(outputs[1], "");
  assert_eq!(report.total, 3);
  assert_eq!(report.computed, 1);
  assert_eq!(report.cache_hits, 1);
  assert_eq!(report.passthrough, 1);
}

/// The explanation reproduces the ranking score.
#[test]
fn explanation_agrees_with_ranking() {
  let service = fixture_service(SarfConfig::default());

  let (best, breakdown) = service.explain("wlktAbhm").unwrap();
  assert_eq!(best.segmentation.key(), "w+l+;ktAb;+hm");
  assert_eq!(breakdown.total, best.score);

  let json = serde_json::to_value(&breakdown).unwrap();
  assert_eq!(json["features"].as_array().map(Vec::len), Some(18));
}

/// One service shared by several threads gives every thread the same answers.
#[test]
fn shared_service_across_threads() {
  let mut config = SarfConfig::default();
  config.cache = CachePolicy::Unbounded;
  let service = Arc::new(fixture_service(config));
  let expected = service.top_segmentations("AlktAbAt")[0].segmentation.render(OutputFormat::Delimited);

  let handles: Vec<_> = (0..4)
    .map(|_| {
      let service = Arc::clone(&service);
      thread::spawn(move || service.segment(["AlktAbAt", "wlktAbhm"]))
    })
    .collect();

  for handle in handles {
    let outputs = handle.join().unwrap();
    assert_eq!(outputs[0], expected);
    assert_eq!(outputs[1], "w+l+;ktAb;+hm");
  }
  assert_eq!(service.cached_words(), 2);
}
