//! Fixtures and a library-level pipeline for cross-crate scenarios.

use anyhow::{Context, Result};
use mcat_reconcile::{build_catalog, reconcile, ReconcileOutcome};
use mcat_schemas::{AcademicYear, CatalogDocument, ModuleRecord, SnapshotDocument};
use mcat_scrub::{ScrubRules, Scrubber};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub const COURSE: &str = "MMath Mathematics";
pub const SCHOOL: &str = "EMP";
pub const PREFIX: &str = "uea_modules_";

/// Builder for [`ModuleRecord`] fixtures.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    rec: ModuleRecord,
}

impl RecordBuilder {
    pub fn new(module_code: &str, year_of_study: &str) -> Self {
        Self {
            rec: ModuleRecord::new(module_code, year_of_study),
        }
    }

    pub fn section(mut self, section: &str) -> Self {
        self.rec.section = section.to_string();
        self
    }

    pub fn credits(mut self, credits: &str) -> Self {
        self.rec.credits = credits.to_string();
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.rec.notes = notes.to_string();
        self
    }

    pub fn rules(mut self, rules: Value) -> Self {
        self.rec.module_rules = rules;
        self
    }

    pub fn content(mut self, title: &str, body: &str) -> Self {
        self.rec
            .content_sections
            .insert(title.to_string(), body.to_string());
        self
    }

    pub fn extra(mut self, key: &str, value: Value) -> Self {
        self.rec.extra.insert(key.to_string(), value);
        self
    }

    pub fn build(self) -> ModuleRecord {
        self.rec
    }
}

pub fn record(module_code: &str, year_of_study: &str) -> RecordBuilder {
    RecordBuilder::new(module_code, year_of_study)
}

/// Snapshot with the fixture course and school.
pub fn snapshot(academic_year: &str, modules: Vec<ModuleRecord>) -> SnapshotDocument {
    let mut doc = SnapshotDocument::new(academic_year, modules);
    doc.course = COURSE.to_string();
    doc.school = SCHOOL.to_string();
    doc
}

/// Write each snapshot under its canonical file name.
pub fn write_snapshot_dir(dir: &Path, snapshots: &[SnapshotDocument]) -> Result<Vec<PathBuf>> {
    snapshots
        .iter()
        .map(|s| {
            let path = dir.join(mcat_store::snapshot_file_name(PREFIX, &s.academic_year));
            mcat_store::write_snapshot(&path, s)?;
            Ok(path)
        })
        .collect()
}

/// Scrub, reconcile and assemble, the way `mcat rebuild` does minus IO.
pub fn run_pipeline(
    snapshots: &[SnapshotDocument],
    rules: &ScrubRules,
) -> Result<(CatalogDocument, ReconcileOutcome)> {
    let scrubber = Scrubber::new(rules).context("build scrubber failed")?;
    let mut scrubbed = snapshots.to_vec();
    for s in scrubbed.iter_mut() {
        scrubber.scrub_snapshot(s);
    }

    let outcome = reconcile(&scrubbed)?;
    let report = outcome.clone();
    let catalog = build_catalog(COURSE, SCHOOL, outcome)?;
    Ok((catalog, report))
}

/// Every snapshot label that contains `(code, year)` as a keyed record.
pub fn years_containing(
    snapshots: &[SnapshotDocument],
    code: &str,
    year_of_study: &str,
) -> Vec<AcademicYear> {
    let mut out: Vec<AcademicYear> = snapshots
        .iter()
        .filter(|s| {
            s.modules
                .iter()
                .any(|m| m.module_code == code && m.year_of_study == year_of_study)
        })
        .map(|s| s.academic_year.clone())
        .collect();
    out.sort();
    out.dedup();
    out
}
