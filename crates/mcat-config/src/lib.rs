//! mcat-config
//!
//! Layered YAML configuration for the catalog tools.
//!
//! - Layers merge in order: earlier docs are base, later docs override
//! - The merged document is hashed (SHA-256 over canonical JSON) so a run
//!   can record exactly which configuration produced it
//! - [`CatalogConfig`] is the typed view; every key is optional
//! - [`report_unused_keys`] flags keys nothing reads

mod catalog;
mod consumption;

pub use catalog::{
    AvailabilityConfig, CatalogConfig, CatalogSection, ScrubConfig, SnapshotsConfig,
    DEFAULT_CATALOG_FILE, DEFAULT_DATA_DIR, DEFAULT_SNAPSHOT_PREFIX,
};
pub use consumption::{consumed_pointers, report_unused_keys, UnusedKeyPolicy, UnusedKeyReport};

use anyhow::{Context, Result};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
}

impl LoadedConfig {
    /// No layers at all: every key takes its default.
    pub fn empty() -> Result<Self> {
        load_layered_yaml_from_strings(&[])
    }

    pub fn typed(&self) -> Result<CatalogConfig> {
        CatalogConfig::from_json(&self.config_json)
    }
}

pub fn load_layered_yaml<P: AsRef<Path>>(paths: &[P]) -> Result<LoadedConfig> {
    let mut docs: Vec<String> = Vec::new();
    for p in paths {
        let p = p.as_ref();
        let raw = fs::read_to_string(p)
            .with_context(|| format!("failed to read yaml path: {}", p.display()))?;
        docs.push(raw);
    }

    let doc_refs: Vec<&str> = docs.iter().map(|s| s.as_str()).collect();
    load_layered_yaml_from_strings(&doc_refs)
}

pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = serde_json::json!({});
    for raw in yaml_docs {
        let v_yaml: serde_yaml::Value = serde_yaml::from_str(raw).context("invalid yaml")?;
        let v_json = serde_json::to_value(v_yaml).context("yaml->json conversion failed")?;
        // An empty document parses as null; treat it as "no overrides".
        if v_json.is_null() {
            continue;
        }
        merged = deep_merge(merged, v_json);
    }

    let canonical_json = canonicalize_json(&merged)?;
    let config_hash = sha256_hex(canonical_json.as_bytes());
    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json: merged,
    })
}

fn deep_merge(a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Object(mut a_map), Value::Object(b_map)) => {
            for (k, b_val) in b_map {
                let a_val = a_map.remove(&k).unwrap_or(Value::Null);
                a_map.insert(k, deep_merge(a_val, b_val));
            }
            Value::Object(a_map)
        }
        (_, b_other) => b_other,
    }
}

/// Compact JSON. `serde_json::Map` is key-sorted (no `preserve_order`), so
/// source key order never reaches the hash.
fn canonicalize_json(v: &Value) -> Result<String> {
    serde_json::to_string(v).context("canonical json serialize failed")
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
