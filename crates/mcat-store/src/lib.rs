//! mcat-store
//!
//! File layout for snapshots and the reconciled catalog.
//!
//! - snapshots: `<dir>/<prefix><YYYY_N>.json`, one per academic year
//! - catalog: a single file, never picked up as a snapshot
//! - every document is written as 2-space pretty JSON with a trailing newline
//!
//! Discovery only finds files. Which order they are folded in is decided by
//! the reconciler, not by the directory listing.

use anyhow::{Context, Result};
use mcat_schemas::{AcademicYear, CatalogDocument, SnapshotDocument};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// `<prefix><slug>.json`, e.g. `uea_modules_2025_6.json`.
pub fn snapshot_file_name(prefix: &str, academic_year: &AcademicYear) -> String {
    format!("{prefix}{}.json", academic_year.slug())
}

fn snapshot_name_pattern(prefix: &str) -> Result<Regex> {
    let pattern = format!(r"^{}\d{{4}}_\d+\.json$", regex::escape(prefix));
    Regex::new(&pattern).with_context(|| format!("invalid snapshot name pattern: {pattern}"))
}

/// Snapshot files under `dir`, sorted by path. A missing directory has no
/// snapshots.
pub fn discover_snapshot_files(dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let pattern = snapshot_name_pattern(prefix)?;

    let mut out = Vec::new();
    let entries =
        fs::read_dir(dir).with_context(|| format!("read snapshot dir failed: {}", dir.display()))?;
    for entry in entries {
        let entry =
            entry.with_context(|| format!("read snapshot dir entry failed: {}", dir.display()))?;
        let path = entry.path();
        let is_snapshot = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| pattern.is_match(n))
            .unwrap_or(false);
        if is_snapshot && path.is_file() {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read {what} failed: {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse {what} failed: {}", path.display()))
}

fn write_json<T: Serialize>(path: &Path, value: &T, what: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create dir failed: {}", parent.display()))?;
    }
    let json =
        serde_json::to_string_pretty(value).with_context(|| format!("serialize {what} failed"))?;
    fs::write(path, format!("{json}\n"))
        .with_context(|| format!("write {what} failed: {}", path.display()))
}

pub fn load_snapshot(path: &Path) -> Result<SnapshotDocument> {
    read_json(path, "snapshot")
}

/// Loads every path; the first unreadable file fails the whole batch.
pub fn load_snapshots(paths: &[PathBuf]) -> Result<Vec<SnapshotDocument>> {
    paths.iter().map(|p| load_snapshot(p)).collect()
}

pub fn write_snapshot(path: &Path, doc: &SnapshotDocument) -> Result<()> {
    write_json(path, doc, "snapshot")
}

pub fn load_catalog(path: &Path) -> Result<CatalogDocument> {
    read_json(path, "catalog")
}

pub fn write_catalog(path: &Path, doc: &CatalogDocument) -> Result<()> {
    write_json(path, doc, "catalog")
}
