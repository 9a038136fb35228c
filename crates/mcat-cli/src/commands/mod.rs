//! Command handlers for the `mcat` binary.
//!
//! Shared config loading lives here; each subcommand has its own module.

pub mod available;
pub mod clean;
pub mod rebuild;

use anyhow::Result;
use mcat_config::{report_unused_keys, CatalogConfig, LoadedConfig, UnusedKeyPolicy};
use std::path::PathBuf;
use tracing::{info, warn};

/// Merged config plus its typed view.
pub struct CommandConfig {
    pub loaded: LoadedConfig,
    pub typed: CatalogConfig,
}

impl CommandConfig {
    pub fn data_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.unwrap_or_else(|| PathBuf::from(&self.typed.snapshots.dir))
    }
}

/// Load layered config (no paths: all defaults) and warn on unused keys.
pub fn load_config(paths: &[PathBuf]) -> Result<CommandConfig> {
    let loaded = if paths.is_empty() {
        LoadedConfig::empty()?
    } else {
        mcat_config::load_layered_yaml(paths)?
    };

    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)?;
    for pointer in &report.unused_leaf_pointers {
        warn!(pointer = %pointer, "config key is not read by anything");
    }

    let typed = loaded.typed()?;
    info!(config_hash = %loaded.config_hash, layers = paths.len(), "config loaded");
    Ok(CommandConfig { loaded, typed })
}
