//! `mcat available`: per-module availability for one intake and study year.

use anyhow::Result;
use mcat_availability::{modules_for_entry, target_calendar_year, Availability, DecisionBasis};
use std::path::{Path, PathBuf};

use super::load_config;

pub fn available(
    config_paths: &[PathBuf],
    catalog_path: &Path,
    entry_year: i32,
    study_year: u32,
    cycle_length: Option<u32>,
) -> Result<()> {
    let cfg = load_config(config_paths)?;
    let cycle_length = cycle_length.unwrap_or(cfg.typed.availability.cycle_length);

    let target_year = target_calendar_year(entry_year, study_year)?;

    let catalog = mcat_store::load_catalog(catalog_path)?;
    let entries = modules_for_entry(&catalog, entry_year, study_year, cycle_length)?;

    let (mut yes, mut no, mut unknown) = (0usize, 0usize, 0usize);
    for e in &entries {
        let availability = match e.decision.availability {
            Availability::Available => {
                yes += 1;
                "available"
            }
            Availability::Unavailable => {
                no += 1;
                "unavailable"
            }
            Availability::Indeterminate => {
                unknown += 1;
                "indeterminate"
            }
        };
        let basis = match &e.decision.basis {
            DecisionBasis::Captured { year } => format!("captured:{year}"),
            DecisionBasis::Projected { proxy } => format!("projected:{proxy}"),
            DecisionBasis::NoCongruentCapture => "none".to_string(),
        };
        println!(
            "module_code={} section={:?} availability={} basis={}",
            e.module.record.module_code, e.module.record.section, availability, basis
        );
    }

    println!("target_year={}", target_year);
    println!("cycle_length={}", cycle_length);
    println!(
        "available={} unavailable={} indeterminate={}",
        yes, no, unknown
    );
    Ok(())
}
