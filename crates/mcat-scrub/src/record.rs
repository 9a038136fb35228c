use mcat_schemas::{CatalogDocument, ModuleRecord, SnapshotDocument};

use crate::{clean_table_info, fixpoint, Scrubber};

/// Content section holding the enrolment list.
const STUDENTS_SECTION: &str = "Students";

/// Raw page text kept by older captures; never useful downstream.
const FULL_DETAIL_TEXT: &str = "full_detail_text";

/// What a scrub pass removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrubReport {
    pub modules: usize,
    pub sections_removed: usize,
}

impl Scrubber {
    /// Scrub every text field of a record in place.
    ///
    /// Identity fields (`module_code`, `year_of_study`) are left alone.
    /// Returns the number of content sections dropped.
    pub fn scrub_record(&self, rec: &mut ModuleRecord) -> usize {
        rec.extra.remove(FULL_DETAIL_TEXT);

        let mut removed = 0;
        for (title, body) in std::mem::take(&mut rec.content_sections) {
            if title == STUDENTS_SECTION || self.is_module_header_key(&title) {
                removed += 1;
                continue;
            }
            let body = self.scrub(&body);
            if body.is_empty() {
                removed += 1;
                continue;
            }
            rec.content_sections.insert(title, body);
        }

        for field in [
            &mut rec.section,
            &mut rec.credit_rule,
            &mut rec.notes,
            &mut rec.description,
            &mut rec.assessment,
            &mut rec.credits,
            &mut rec.period,
            &mut rec.sub_slot,
        ] {
            *field = self.scrub(field);
        }

        rec.table_info = fixpoint(std::mem::take(&mut rec.table_info), |ti| {
            self.scrub(&clean_table_info(ti))
        });
        rec.module_rules = self.scrub_value(&rec.module_rules);
        for value in rec.extra.values_mut() {
            *value = self.scrub_value(value);
        }

        removed
    }

    pub fn scrub_snapshot(&self, doc: &mut SnapshotDocument) -> ScrubReport {
        let mut report = ScrubReport::default();
        for rec in doc.modules.iter_mut() {
            report.sections_removed += self.scrub_record(rec);
            report.modules += 1;
        }
        report
    }

    /// Scrub an already-built catalog, per-year rules included.
    pub fn scrub_catalog(&self, doc: &mut CatalogDocument) -> ScrubReport {
        let mut report = ScrubReport::default();
        for m in doc.modules.iter_mut() {
            report.sections_removed += self.scrub_record(&mut m.record);
            if let Some(by_year) = m.rules_by_year.as_mut() {
                for rules in by_year.values_mut() {
                    *rules = self.scrub_value(rules);
                }
            }
            report.modules += 1;
        }
        report
    }
}
