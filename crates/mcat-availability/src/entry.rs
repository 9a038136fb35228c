use mcat_reconcile::study_year_number;
use mcat_schemas::{AcademicYear, CatalogDocument, MergedModule};
use serde::Serialize;
use serde_json::Value;

use crate::{AvailabilityDecision, AvailabilityError, AvailabilityIndex, DecisionBasis};

/// Rules that applied in `year`: the per-year value when captures diverged,
/// otherwise the module's single `module_rules`.
pub fn effective_rules<'a>(module: &'a MergedModule, year: &AcademicYear) -> &'a Value {
    module
        .rules_by_year
        .as_ref()
        .and_then(|by_year| by_year.get(year))
        .unwrap_or(&module.record.module_rules)
}

/// A catalog entry for the queried study year with its availability and the
/// rules that govern it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EntryModule<'a> {
    pub module: &'a MergedModule,
    pub decision: AvailabilityDecision,
    pub rules: &'a Value,
}

/// Every catalog entry whose `year_of_study` digit equals `study_year`,
/// in catalog order, with a decision for a student entering in
/// `entry_year`.
///
/// Entries whose label carries no digit are not part of any study year and
/// are left out.
pub fn modules_for_entry<'a>(
    catalog: &'a CatalogDocument,
    entry_year: i32,
    study_year: u32,
    cycle_length: u32,
) -> Result<Vec<EntryModule<'a>>, AvailabilityError> {
    let index = AvailabilityIndex::from_catalog(catalog)?;

    let mut out = Vec::new();
    for module in &catalog.modules {
        if study_year_number(&module.record.year_of_study) != Some(study_year) {
            continue;
        }
        let decision = index.is_available(module, entry_year, study_year, cycle_length)?;
        let rules = match &decision.basis {
            DecisionBasis::Captured { year } => effective_rules(module, year),
            DecisionBasis::Projected { proxy } => effective_rules(module, proxy),
            DecisionBasis::NoCongruentCapture => &module.record.module_rules,
        };
        out.push(EntryModule {
            module,
            decision,
            rules,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Availability;
    use mcat_schemas::ModuleRecord;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn y(label: &str) -> AcademicYear {
        AcademicYear::new(label)
    }

    fn merged(code: &str, study: &str, years: &[&str], rules: Value) -> MergedModule {
        let mut record = ModuleRecord::new(code, study);
        record.module_rules = rules;
        MergedModule {
            record,
            available_years: years.iter().map(|s| y(s)).collect(),
            rules_by_year: None,
        }
    }

    fn catalog() -> CatalogDocument {
        let mut diverged = merged("MTHB5002B", "Year 2U", &["2025/6", "2026/7"], json!("new"));
        let mut by_year = BTreeMap::new();
        by_year.insert(y("2025/6"), json!("old"));
        by_year.insert(y("2026/7"), json!("new"));
        diverged.rules_by_year = Some(by_year);

        CatalogDocument {
            course: "MMath".into(),
            school: "EMP".into(),
            academic_years: vec![y("2025/6"), y("2026/7")],
            modules: vec![
                merged("MTHA4001Y", "Year 1U", &["2025/6", "2026/7"], json!("")),
                merged("MTHB5001A", "Year 2U", &["2026/7"], json!("needs MTHA4001Y")),
                diverged,
                merged("MTHX0000X", "Foundation", &["2025/6"], json!("")),
            ],
        }
    }

    #[test]
    fn effective_rules_prefers_per_year_value() {
        let cat = catalog();
        let m = &cat.modules[2];
        assert_eq!(effective_rules(m, &y("2025/6")), &json!("old"));
        assert_eq!(effective_rules(m, &y("2026/7")), &json!("new"));
        // Year not in the map falls back to the latest capture.
        assert_eq!(effective_rules(m, &y("2030/1")), &json!("new"));
        assert_eq!(
            effective_rules(&cat.modules[1], &y("2025/6")),
            &json!("needs MTHA4001Y")
        );
    }

    #[test]
    fn filters_to_study_year_in_catalog_order() {
        let cat = catalog();
        let out = modules_for_entry(&cat, 2024, 2, 2).unwrap();
        let codes: Vec<&str> = out
            .iter()
            .map(|e| e.module.record.module_code.as_str())
            .collect();
        assert_eq!(codes, ["MTHB5001A", "MTHB5002B"]);

        // Entry 2024, year 2 -> 2025/6, captured.
        assert_eq!(out[0].decision.availability, Availability::Unavailable);
        assert_eq!(out[1].decision.availability, Availability::Available);
        assert_eq!(out[1].rules, &json!("old"));
    }

    #[test]
    fn projected_entries_use_the_proxy_years_rules() {
        let cat = catalog();
        // 2027 ≡ 2025 (mod 2)
        let out = modules_for_entry(&cat, 2026, 2, 2).unwrap();
        assert_eq!(out[0].decision.availability, Availability::Unavailable);
        assert_eq!(out[1].decision.basis, DecisionBasis::Projected { proxy: y("2025/6") });
        assert_eq!(out[1].rules, &json!("old"));
    }

    #[test]
    fn unknown_study_year_is_empty() {
        assert!(modules_for_entry(&catalog(), 2025, 7, 2).unwrap().is_empty());
    }

    #[test]
    fn errors_propagate() {
        assert_eq!(
            modules_for_entry(&catalog(), 2025, 1, 0).unwrap_err(),
            AvailabilityError::ZeroCycleLength
        );
    }
}
