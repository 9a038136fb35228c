//! Scenario: unused-key guard
//!
//! # Invariants under test
//!
//! 1. Unknown keys are reported under `Warn` without failing.
//! 2. `Fail` turns a non-empty report into an error.
//! 3. List entries under a consumed key are covered by it.
//! 4. Unused pointers come back sorted.

use mcat_config::{load_layered_yaml_from_strings, report_unused_keys, UnusedKeyPolicy};

#[test]
fn warn_reports_without_error() {
    let yaml = r#"
snapshots:
  dir: "data"
  dirr: "typo"
legacy:
  scraper_delay: 1.5
"#;
    let loaded = load_layered_yaml_from_strings(&[yaml]).unwrap();
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn).unwrap();

    assert!(!report.is_clean());
    assert_eq!(
        report.unused_leaf_pointers,
        vec!["/legacy/scraper_delay".to_string(), "/snapshots/dirr".to_string()]
    );
}

#[test]
fn fail_errors_on_unused_keys() {
    let loaded = load_layered_yaml_from_strings(&["catalog:\n  colour: blue\n"]).unwrap();
    let err = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail).unwrap_err();
    assert!(err.to_string().contains("CONFIG_UNUSED_KEYS"));
    assert!(err.to_string().contains("/catalog/colour"));
}

#[test]
fn list_entries_are_consumed_by_their_key() {
    let yaml = r#"
scrub:
  personal_literals: ["jdoe42", "Jane Doe"]
  personal_patterns: ['\b1\d{8}\b']
availability:
  cycle_length: 2
"#;
    let loaded = load_layered_yaml_from_strings(&[yaml]).unwrap();
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail).unwrap();
    assert!(report.is_clean());
}
