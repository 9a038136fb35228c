//! `mcat clean`: scrub snapshot files, and the catalog if present, in place.

use anyhow::{Context, Result};
use mcat_scrub::Scrubber;
use std::path::PathBuf;
use tracing::info;

use super::load_config;

pub fn clean(config_paths: &[PathBuf], data_dir: Option<PathBuf>) -> Result<()> {
    let cfg = load_config(config_paths)?;
    let data_dir = cfg.data_dir(data_dir);
    let scrubber = Scrubber::new(&cfg.typed.scrub_rules()).context("build scrubber failed")?;

    let files = mcat_store::discover_snapshot_files(&data_dir, &cfg.typed.snapshots.prefix)?;
    for path in &files {
        let mut doc = mcat_store::load_snapshot(path)?;
        let report = scrubber.scrub_snapshot(&mut doc);
        mcat_store::write_snapshot(path, &doc)?;
        info!(file = %path.display(), modules = report.modules, "snapshot cleaned");
        println!(
            "cleaned={} modules={} sections_removed={}",
            path.display(),
            report.modules,
            report.sections_removed
        );
    }

    let catalog_path = data_dir.join(&cfg.typed.catalog.output_file);
    if catalog_path.is_file() {
        let mut catalog = mcat_store::load_catalog(&catalog_path)?;
        let report = scrubber.scrub_catalog(&mut catalog);
        mcat_store::write_catalog(&catalog_path, &catalog)?;
        println!(
            "cleaned={} modules={} sections_removed={}",
            catalog_path.display(),
            report.modules,
            report.sections_removed
        );
    }

    println!("files_cleaned={}", files.len());
    Ok(())
}
