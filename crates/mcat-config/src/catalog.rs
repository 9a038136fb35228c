use anyhow::{Context, Result};
use mcat_scrub::ScrubRules;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_SNAPSHOT_PREFIX: &str = "uea_modules_";
pub const DEFAULT_CATALOG_FILE: &str = "uea_modules_combined.json";

/// Typed view of the merged config. Missing keys take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub catalog: CatalogSection,
    pub snapshots: SnapshotsConfig,
    pub availability: AvailabilityConfig,
    pub scrub: ScrubConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    /// `None`: take it from the latest snapshot.
    pub course: Option<String>,
    pub school: Option<String>,
    pub output_file: String,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            course: None,
            school: None,
            output_file: DEFAULT_CATALOG_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotsConfig {
    pub dir: String,
    pub prefix: String,
}

impl Default for SnapshotsConfig {
    fn default() -> Self {
        Self {
            dir: DEFAULT_DATA_DIR.to_string(),
            prefix: DEFAULT_SNAPSHOT_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailabilityConfig {
    pub cycle_length: u32,
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self { cycle_length: 2 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrubConfig {
    /// Exact strings removed from every text field (names, IDs).
    pub personal_literals: Vec<String>,
    /// Regexes removed from every text field.
    pub personal_patterns: Vec<String>,
}

impl CatalogConfig {
    pub fn from_json(config_json: &Value) -> Result<Self> {
        serde_json::from_value(config_json.clone()).context("config does not match catalog schema")
    }

    pub fn scrub_rules(&self) -> ScrubRules {
        ScrubRules {
            personal_literals: self.scrub.personal_literals.clone(),
            personal_patterns: self.scrub.personal_patterns.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_layered_yaml_from_strings;

    #[test]
    fn empty_config_is_all_defaults() {
        let cfg = load_layered_yaml_from_strings(&["{}"]).unwrap().typed().unwrap();
        assert_eq!(cfg, CatalogConfig::default());
        assert_eq!(cfg.snapshots.dir, "data");
        assert_eq!(cfg.snapshots.prefix, "uea_modules_");
        assert_eq!(cfg.catalog.output_file, "uea_modules_combined.json");
        assert_eq!(cfg.catalog.course, None);
        assert_eq!(cfg.availability.cycle_length, 2);
        assert!(cfg.scrub_rules().personal_literals.is_empty());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let yaml = r#"
catalog:
  course: "MMath Mathematics"
snapshots:
  dir: "/srv/catalog"
scrub:
  personal_literals: ["jdoe42"]
  personal_patterns: ['\b\d{9}\b']
"#;
        let cfg = load_layered_yaml_from_strings(&[yaml]).unwrap().typed().unwrap();
        assert_eq!(cfg.catalog.course.as_deref(), Some("MMath Mathematics"));
        assert_eq!(cfg.catalog.output_file, DEFAULT_CATALOG_FILE);
        assert_eq!(cfg.snapshots.dir, "/srv/catalog");
        assert_eq!(cfg.snapshots.prefix, DEFAULT_SNAPSHOT_PREFIX);

        let rules = cfg.scrub_rules();
        assert_eq!(rules.personal_literals, vec!["jdoe42".to_string()]);
        assert_eq!(rules.personal_patterns, vec![r"\b\d{9}\b".to_string()]);
    }

    #[test]
    fn wrong_type_is_an_error() {
        let loaded = load_layered_yaml_from_strings(&["availability:\n  cycle_length: two\n"]).unwrap();
        let err = loaded.typed().unwrap_err();
        assert!(format!("{err:#}").contains("catalog schema"));
    }
}
