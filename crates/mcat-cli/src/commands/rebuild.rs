//! `mcat rebuild`: discover -> load -> scrub -> reconcile -> order -> write.

use anyhow::{Context, Result};
use mcat_reconcile::{build_catalog, reconcile, summarize};
use mcat_schemas::SnapshotDocument;
use mcat_scrub::Scrubber;
use std::path::PathBuf;
use tracing::{info, warn};

use super::load_config;

pub fn rebuild(config_paths: &[PathBuf], data_dir: Option<PathBuf>, out: Option<PathBuf>) -> Result<()> {
    let cfg = load_config(config_paths)?;
    let data_dir = cfg.data_dir(data_dir);
    let out = out.unwrap_or_else(|| data_dir.join(&cfg.typed.catalog.output_file));

    let files = mcat_store::discover_snapshot_files(&data_dir, &cfg.typed.snapshots.prefix)?;
    if files.is_empty() {
        info!(data_dir = %data_dir.display(), "no snapshot files found; nothing to rebuild");
        println!("no_data=true");
        return Ok(());
    }

    let mut snapshots = mcat_store::load_snapshots(&files)?;
    let scrubber = Scrubber::new(&cfg.typed.scrub_rules()).context("build scrubber failed")?;
    for (path, snap) in files.iter().zip(snapshots.iter_mut()) {
        let report = scrubber.scrub_snapshot(snap);
        info!(
            file = %path.display(),
            academic_year = %snap.academic_year,
            modules = report.modules,
            sections_removed = report.sections_removed,
            "snapshot loaded"
        );
    }

    let (course, school) = course_and_school(&cfg.typed.catalog, &snapshots);
    let outcome = reconcile(&snapshots)?;

    for s in &outcome.skipped {
        warn!(
            academic_year = %s.academic_year,
            index = s.index,
            identity = %s.identity,
            reason = ?s.reason,
            "record skipped"
        );
    }
    for d in &outcome.duplicates {
        warn!(
            academic_year = %d.academic_year,
            identity = %d.identity,
            occurrences = d.occurrences,
            "identity repeated within one snapshot; later record kept"
        );
    }

    let skipped = outcome.skipped.len();
    let duplicates = outcome.duplicates.len();
    let divergent = outcome.divergent_rules_count();

    let catalog = build_catalog(course, school, outcome)?;
    mcat_store::write_catalog(&out, &catalog)?;

    let years: Vec<&str> = catalog.academic_years.iter().map(|y| y.as_str()).collect();
    println!("snapshots={}", files.len());
    println!("academic_years={}", years.join(","));
    println!("modules={}", catalog.modules.len());
    println!("rules_by_year={}", divergent);
    println!("skipped={}", skipped);
    println!("duplicates={}", duplicates);
    println!("config_hash={}", cfg.loaded.config_hash);
    for s in summarize(&catalog).by_study_year {
        let per_year: Vec<String> = s
            .availability
            .iter()
            .map(|(y, n)| format!("{y}:{n}"))
            .collect();
        println!(
            "study_year=\"{}\" modules={} available={}",
            s.year_of_study,
            s.modules,
            per_year.join(",")
        );
    }
    println!("catalog_path={}", out.display());

    Ok(())
}

/// Config wins; otherwise the latest snapshot that names one.
fn course_and_school(
    section: &mcat_config::CatalogSection,
    snapshots: &[SnapshotDocument],
) -> (String, String) {
    let mut newest_first: Vec<&SnapshotDocument> = snapshots.iter().collect();
    newest_first.sort_by(|a, b| b.academic_year.cmp(&a.academic_year));

    let course = section
        .course
        .clone()
        .unwrap_or_else(|| latest_named(&newest_first, |s| &s.course));
    let school = section
        .school
        .clone()
        .unwrap_or_else(|| latest_named(&newest_first, |s| &s.school));
    (course, school)
}

fn latest_named(newest_first: &[&SnapshotDocument], pick: impl Fn(&SnapshotDocument) -> &String) -> String {
    newest_first
        .iter()
        .map(|&s| pick(s))
        .find(|v| !v.trim().is_empty())
        .cloned()
        .unwrap_or_default()
}
