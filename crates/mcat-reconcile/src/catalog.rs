use std::collections::BTreeMap;

use mcat_schemas::{AcademicYear, CatalogDocument};
use serde::Serialize;

use crate::ordering::{order, OrderingError};
use crate::ReconcileOutcome;

/// Assemble the catalog document: outcome modules in presentation order.
pub fn build_catalog(
    course: impl Into<String>,
    school: impl Into<String>,
    outcome: ReconcileOutcome,
) -> Result<CatalogDocument, OrderingError> {
    Ok(CatalogDocument {
        course: course.into(),
        school: school.into(),
        academic_years: outcome.academic_years,
        modules: order(outcome.modules)?,
    })
}

/// Per `year_of_study` label: entry count and how many entries run in each
/// academic year.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StudyYearSummary {
    pub year_of_study: String,
    pub modules: usize,
    pub availability: BTreeMap<AcademicYear, usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub total_modules: usize,
    pub academic_years: Vec<AcademicYear>,
    /// In catalog order of first appearance.
    pub by_study_year: Vec<StudyYearSummary>,
}

pub fn summarize(catalog: &CatalogDocument) -> CatalogSummary {
    let mut by_study_year: Vec<StudyYearSummary> = Vec::new();

    for m in &catalog.modules {
        let label = &m.record.year_of_study;
        let pos = match by_study_year.iter().position(|s| &s.year_of_study == label) {
            Some(p) => p,
            None => {
                by_study_year.push(StudyYearSummary {
                    year_of_study: label.clone(),
                    modules: 0,
                    availability: BTreeMap::new(),
                });
                by_study_year.len() - 1
            }
        };

        let entry = &mut by_study_year[pos];
        entry.modules += 1;
        for y in &m.available_years {
            *entry.availability.entry(y.clone()).or_insert(0) += 1;
        }
    }

    CatalogSummary {
        total_modules: catalog.modules.len(),
        academic_years: catalog.academic_years.clone(),
        by_study_year,
    }
}
