//! mcat-schemas
//!
//! Wire types shared by every crate in the workspace:
//! - per-year snapshot documents as written by the acquisition step
//! - the reconciled catalog document consumed by the downstream app
//!
//! Pure data. No IO, no validation beyond what serde enforces.

mod academic_year;

pub use academic_year::AcademicYear;

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One module row as captured in a single academic-year snapshot.
///
/// Field names mirror the snapshot files. `year_of_study` travels as `year`
/// on the wire; `year_of_study` is accepted as an alias on input.
///
/// Fields the acquisition step emits that are not modelled here land in
/// `extra` and are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub module_code: String,
    #[serde(
        rename = "year",
        alias = "year_of_study",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub year_of_study: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub section: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub credit_rule: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub assessment: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub credits: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub period: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sub_slot: String,
    /// Free text in most captures, occasionally a structured (list) value.
    #[serde(default = "empty_rules")]
    pub module_rules: Value,
    #[serde(default)]
    pub prerequisite_codes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub table_info: String,
    /// Section title -> body. Partial: captures may disagree on which titles exist.
    #[serde(default)]
    pub content_sections: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ModuleRecord {
    pub fn new(module_code: impl Into<String>, year_of_study: impl Into<String>) -> Self {
        Self {
            module_code: module_code.into(),
            year_of_study: year_of_study.into(),
            section: String::new(),
            credit_rule: String::new(),
            notes: String::new(),
            description: String::new(),
            assessment: String::new(),
            credits: String::new(),
            period: String::new(),
            sub_slot: String::new(),
            module_rules: empty_rules(),
            prerequisite_codes: Vec::new(),
            table_info: String::new(),
            content_sections: BTreeMap::new(),
            extra: BTreeMap::new(),
        }
    }
}

/// One academic year's capture of the course page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub course: String,
    pub academic_year: AcademicYear,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub school: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scraped_at: Option<String>,
    #[serde(default)]
    pub modules: Vec<ModuleRecord>,
}

impl SnapshotDocument {
    pub fn new(academic_year: impl Into<AcademicYear>, modules: Vec<ModuleRecord>) -> Self {
        Self {
            course: String::new(),
            academic_year: academic_year.into(),
            school: String::new(),
            scraped_at: None,
            modules,
        }
    }
}

/// Catalog entry: one per `(module_code, year_of_study)` across all snapshots.
///
/// `record` holds the latest capture's fields, except `content_sections`
/// which is the union of every capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedModule {
    #[serde(flatten)]
    pub record: ModuleRecord,
    /// Calendar years the module was observed in, first-observation order.
    pub available_years: Vec<AcademicYear>,
    /// Only present when captures disagree on `module_rules`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules_by_year: Option<BTreeMap<AcademicYear, Value>>,
}

/// The reconciled catalog written for the downstream app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub course: String,
    pub school: String,
    /// Ascending.
    pub academic_years: Vec<AcademicYear>,
    /// Presentation order.
    pub modules: Vec<MergedModule>,
}

fn empty_rules() -> Value {
    Value::String(String::new())
}

fn null_as_empty<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}
