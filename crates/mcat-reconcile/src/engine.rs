use std::collections::{BTreeMap, BTreeSet};

use mcat_schemas::{AcademicYear, MergedModule, ModuleRecord, SnapshotDocument};
use serde_json::Value;

use crate::identity::{resolve, ModuleIdentity};
use crate::rules::{CanonicalJson, RulesEquivalence};
use crate::{DuplicateIdentity, ReconcileError, ReconcileOutcome, SkipReason, SkippedRecord};

/// In-progress catalog entry for one identity.
///
/// Two merge rules, kept apart on purpose:
/// - replace: every scalar field takes the current record's value
/// - accumulate: `available_years` (append if absent) and
///   `content_sections` (union, current body wins)
struct ModuleAccumulator {
    merged: MergedModule,
    /// Rules observed per academic year.
    rules_seen: BTreeMap<AcademicYear, Value>,
}

impl ModuleAccumulator {
    fn seed(rec: &ModuleRecord) -> Self {
        let mut record = rec.clone();
        record.content_sections = BTreeMap::new();
        Self {
            merged: MergedModule {
                record,
                available_years: Vec::new(),
                rules_by_year: None,
            },
            rules_seen: BTreeMap::new(),
        }
    }

    fn observe(&mut self, year: &AcademicYear, rec: &ModuleRecord) {
        let mut content = std::mem::take(&mut self.merged.record.content_sections);
        for (title, body) in &rec.content_sections {
            content.insert(title.clone(), body.clone());
        }

        self.merged.record = ModuleRecord {
            content_sections: content,
            ..rec.clone()
        };

        if !self.merged.available_years.contains(year) {
            self.merged.available_years.push(year.clone());
        }

        self.rules_seen.insert(year.clone(), rec.module_rules.clone());
    }

    fn finish(self, eq: &dyn RulesEquivalence) -> MergedModule {
        let distinct: BTreeSet<String> = self
            .rules_seen
            .values()
            .map(|r| eq.canonical_key(r))
            .collect();

        let mut merged = self.merged;
        if distinct.len() >= 2 {
            merged.rules_by_year = Some(self.rules_seen);
        }
        merged
    }
}

fn skip_reason(identity: &ModuleIdentity) -> Option<SkipReason> {
    if identity.is_complete() {
        None
    } else if identity.module_code.trim().is_empty() {
        Some(SkipReason::MissingModuleCode)
    } else {
        Some(SkipReason::MissingYearOfStudy)
    }
}

/// Fold every snapshot into one merged entry per identity, comparing rules
/// by canonical JSON.
///
/// Snapshots may arrive in any order; they are walked by ascending
/// academic-year label. An empty input is a valid, empty outcome.
pub fn reconcile(snapshots: &[SnapshotDocument]) -> Result<ReconcileOutcome, ReconcileError> {
    reconcile_with(snapshots, &CanonicalJson)
}

/// [`reconcile`] with a caller-supplied rules equivalence.
pub fn reconcile_with(
    snapshots: &[SnapshotDocument],
    eq: &dyn RulesEquivalence,
) -> Result<ReconcileOutcome, ReconcileError> {
    let mut walk: Vec<&SnapshotDocument> = snapshots.iter().collect();
    walk.sort_by(|a, b| a.academic_year.cmp(&b.academic_year));

    for pair in walk.windows(2) {
        if pair[0].academic_year == pair[1].academic_year {
            return Err(ReconcileError::DuplicateAcademicYear {
                academic_year: pair[0].academic_year.clone(),
            });
        }
    }

    let mut acc: BTreeMap<ModuleIdentity, ModuleAccumulator> = BTreeMap::new();
    let mut skipped: Vec<SkippedRecord> = Vec::new();
    let mut duplicates: Vec<DuplicateIdentity> = Vec::new();

    for snap in &walk {
        let year = &snap.academic_year;
        let mut seen_here: BTreeMap<ModuleIdentity, usize> = BTreeMap::new();

        for (index, rec) in snap.modules.iter().enumerate() {
            let identity = resolve(rec);
            if let Some(reason) = skip_reason(&identity) {
                skipped.push(SkippedRecord {
                    academic_year: year.clone(),
                    index,
                    identity,
                    reason,
                });
                continue;
            }

            *seen_here.entry(identity.clone()).or_insert(0) += 1;
            acc.entry(identity)
                .or_insert_with(|| ModuleAccumulator::seed(rec))
                .observe(year, rec);
        }

        for (identity, occurrences) in seen_here {
            if occurrences > 1 {
                duplicates.push(DuplicateIdentity {
                    academic_year: year.clone(),
                    identity,
                    occurrences,
                });
            }
        }
    }

    Ok(ReconcileOutcome {
        modules: acc.into_values().map(|a| a.finish(eq)).collect(),
        academic_years: walk.iter().map(|s| s.academic_year.clone()).collect(),
        skipped,
        duplicates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(code: &str, year: &str, rules: Value) -> ModuleRecord {
        let mut r = ModuleRecord::new(code, year);
        r.module_rules = rules;
        r
    }

    fn snap(label: &str, modules: Vec<ModuleRecord>) -> SnapshotDocument {
        SnapshotDocument::new(label, modules)
    }

    #[test]
    fn empty_input_is_empty_outcome() {
        let out = reconcile(&[]).unwrap();
        assert!(out.is_empty());
        assert!(out.modules.is_empty());
        assert!(out.academic_years.is_empty());
    }

    #[test]
    fn single_observation_has_one_year_and_no_rules_by_year() {
        let out = reconcile(&[snap("2025/6", vec![rec("MTH101", "Year 1U", json!("x"))])]).unwrap();
        assert_eq!(out.modules.len(), 1);
        assert_eq!(out.modules[0].available_years, vec![AcademicYear::new("2025/6")]);
        assert!(out.modules[0].rules_by_year.is_none());
    }

    #[test]
    fn scalars_follow_the_latest_year_not_input_position() {
        let mut old = rec("MTH101", "Year 1U", json!(""));
        old.credits = "10".into();
        let mut new = rec("MTH101", "Year 1U", json!(""));
        new.credits = "20".into();

        // Newest first in the input.
        let out = reconcile(&[snap("2026/7", vec![new]), snap("2025/6", vec![old])]).unwrap();
        let m = &out.modules[0];
        assert_eq!(m.record.credits, "20");
        assert_eq!(
            m.available_years,
            vec![AcademicYear::new("2025/6"), AcademicYear::new("2026/7")]
        );
    }

    #[test]
    fn content_sections_are_unioned_latest_body_wins() {
        let mut a = rec("MTH101", "Year 1U", json!(""));
        a.content_sections.insert("Aims".into(), "old aims".into());
        a.content_sections.insert("Reading".into(), "book".into());
        let mut b = rec("MTH101", "Year 1U", json!(""));
        b.content_sections.insert("Aims".into(), "new aims".into());
        b.content_sections.insert("Outline".into(), "limits".into());

        let out = reconcile(&[snap("2025/6", vec![a]), snap("2026/7", vec![b])]).unwrap();
        let cs = &out.modules[0].record.content_sections;
        assert_eq!(cs.len(), 3);
        assert_eq!(cs["Aims"], "new aims");
        assert_eq!(cs["Reading"], "book");
        assert_eq!(cs["Outline"], "limits");
    }

    #[test]
    fn same_code_at_two_study_years_is_two_entries() {
        let out = reconcile(&[snap(
            "2025/6",
            vec![
                rec("MTHC6001A", "Year 2U", json!("")),
                rec("MTHC6001A", "Year 3U", json!("")),
            ],
        )])
        .unwrap();
        assert_eq!(out.modules.len(), 2);
        assert!(out.duplicates.is_empty());
    }

    #[test]
    fn incomplete_identities_are_skipped_and_reported() {
        let out = reconcile(&[snap(
            "2025/6",
            vec![
                rec("", "Year 1U", json!("")),
                rec("MTH101", "Year 1U", json!("")),
                rec("MTH102", " ", json!("")),
            ],
        )])
        .unwrap();

        assert_eq!(out.modules.len(), 1);
        assert_eq!(out.skipped.len(), 2);
        assert_eq!(out.skipped[0].index, 0);
        assert_eq!(out.skipped[0].reason, SkipReason::MissingModuleCode);
        assert_eq!(out.skipped[1].index, 2);
        assert_eq!(out.skipped[1].reason, SkipReason::MissingYearOfStudy);
        assert_eq!(out.skipped[1].identity.module_code, "MTH102");
    }

    #[test]
    fn repeated_identity_in_one_snapshot_folds_and_is_reported() {
        let mut first = rec("MTH101", "Year 1U", json!("a"));
        first.content_sections.insert("Aims".into(), "x".into());
        let second = rec("MTH101", "Year 1U", json!("b"));

        let out = reconcile(&[snap("2025/6", vec![first, second])]).unwrap();
        let m = &out.modules[0];
        assert_eq!(m.record.module_rules, json!("b"));
        assert_eq!(m.available_years.len(), 1);
        assert_eq!(m.record.content_sections["Aims"], "x");
        // One year, one stored value: no divergence.
        assert!(m.rules_by_year.is_none());
        assert_eq!(out.duplicates.len(), 1);
        assert_eq!(out.duplicates[0].occurrences, 2);
    }

    #[test]
    fn duplicate_academic_year_is_an_error() {
        let err = reconcile(&[snap("2025/6", vec![]), snap("2025/6", vec![])]).unwrap_err();
        assert_eq!(
            err,
            ReconcileError::DuplicateAcademicYear {
                academic_year: AcademicYear::new("2025/6")
            }
        );
        assert!(err.to_string().contains("2025/6"));
    }

    #[test]
    fn empty_snapshot_still_counts_as_captured_year() {
        let out = reconcile(&[
            snap("2025/6", vec![rec("MTH101", "Year 1U", json!(""))]),
            snap("2026/7", vec![]),
        ])
        .unwrap();
        assert_eq!(out.academic_years.len(), 2);
        assert_eq!(out.modules[0].available_years, vec![AcademicYear::new("2025/6")]);
    }

    struct IgnoreCase;

    impl RulesEquivalence for IgnoreCase {
        fn canonical_key(&self, rules: &Value) -> String {
            rules.as_str().map(str::to_lowercase).unwrap_or_else(|| rules.to_string())
        }
    }

    #[test]
    fn custom_equivalence_is_honoured() {
        let snaps = [
            snap("2025/6", vec![rec("MTH101", "Year 1U", json!("Needs MTH100"))]),
            snap("2026/7", vec![rec("MTH101", "Year 1U", json!("needs mth100"))]),
        ];
        assert!(reconcile(&snaps).unwrap().modules[0].rules_by_year.is_some());
        assert!(reconcile_with(&snaps, &IgnoreCase).unwrap().modules[0]
            .rules_by_year
            .is_none());
    }
}
