//! Scenario: catalog file bytes are stable
//!
//! # Invariants under test
//!
//! 1. Writing the same catalog twice yields identical bytes.
//! 2. A written catalog loads back equal, and re-writing it is a no-op.
//! 3. Unknown record fields survive the trip to disk.

use mcat_schemas::{AcademicYear, CatalogDocument, MergedModule, ModuleRecord};
use mcat_store::{load_catalog, write_catalog};
use serde_json::json;
use std::fs;

fn catalog() -> CatalogDocument {
    let mut record = ModuleRecord::new("MTHA4001Y", "Year 1U");
    record.section = "Compulsory Modules".into();
    record.extra.insert("url".into(), json!("https://example.invalid/m"));
    record
        .content_sections
        .insert("Aims".into(), "Limits and continuity".into());

    CatalogDocument {
        course: "MMath".into(),
        school: "EMP".into(),
        academic_years: vec![AcademicYear::new("2025/6"), AcademicYear::new("2026/7")],
        modules: vec![MergedModule {
            record,
            available_years: vec![AcademicYear::new("2025/6"), AcademicYear::new("2026/7")],
            rules_by_year: None,
        }],
    }
}

#[test]
fn rewrite_is_byte_identical() {
    let tmp = tempfile::tempdir().unwrap();
    let a = tmp.path().join("a.json");
    let b = tmp.path().join("b.json");

    write_catalog(&a, &catalog()).unwrap();
    let loaded = load_catalog(&a).unwrap();
    assert_eq!(loaded, catalog());

    write_catalog(&b, &loaded).unwrap();
    assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap());
}

#[test]
fn unknown_fields_survive() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("uea_modules_combined.json");
    write_catalog(&path, &catalog()).unwrap();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["modules"][0]["url"], json!("https://example.invalid/m"));
    assert_eq!(raw["modules"][0]["year"], json!("Year 1U"));
    assert!(raw["modules"][0].get("rules_by_year").is_none());
}
