//! mcat-reconcile
//!
//! Folds per-year catalog snapshots into one merged entry per
//! `(module_code, year_of_study)` and orders the result for presentation.
//!
//! - Walk order is ascending academic-year label, never input position
//! - Scalar fields: last capture wins
//! - `available_years`, `content_sections`: accumulate
//! - `rules_by_year`: attached only when captures disagree
//!
//! Deterministic, pure logic. No IO. No logging: skipped and duplicate
//! records come back in the outcome for the caller to report.

mod catalog;
mod engine;
mod identity;
mod ordering;
mod rules;
mod types;

pub use catalog::{build_catalog, summarize, CatalogSummary, StudyYearSummary};
pub use engine::{reconcile, reconcile_with};
pub use identity::{resolve, ModuleIdentity};
pub use ordering::{
    order, section_rank, sort_key, study_year_number, CatalogSortKey, OrderingError,
    UNRANKED_SECTION,
};
pub use rules::{CanonicalJson, RulesEquivalence};
pub use types::*;
