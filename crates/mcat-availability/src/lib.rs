//! mcat-availability
//!
//! Answers "does module X run in year N of study for a student who started
//! in calendar year Y" against a reconciled catalog.
//!
//! Year N of study falls in calendar year `Y + (N - 1)`. Captured years are
//! answered from `available_years`; anything else is projected through a
//! captured year on the same curriculum cycle (default: two-year
//! alternation, so 2027/8 behaves like 2025/6). With no such year the
//! answer is [`Availability::Indeterminate`], never a silent `false`.
//!
//! Pure. No IO.

mod entry;

pub use entry::{effective_rules, modules_for_entry, EntryModule};

use std::collections::BTreeMap;

use mcat_schemas::{AcademicYear, CatalogDocument, MergedModule};
use serde::Serialize;

/// Curricula alternate on a two-year rotation unless told otherwise.
pub const DEFAULT_CYCLE_LENGTH: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    Unavailable,
    /// Target year outside the captured data and no captured year on the
    /// same cycle position.
    Indeterminate,
}

/// How a decision was reached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DecisionBasis {
    /// The target year itself was captured.
    Captured { year: AcademicYear },
    /// Projected from the latest captured year congruent to the target.
    Projected { proxy: AcademicYear },
    NoCongruentCapture,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AvailabilityDecision {
    pub availability: Availability,
    /// Calendar year the queried year of study falls in.
    pub target_year: i32,
    pub basis: DecisionBasis,
}

impl AvailabilityDecision {
    pub fn is_available(&self) -> bool {
        self.availability == Availability::Available
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AvailabilityError {
    ZeroCycleLength,
    /// Years of study count from 1.
    ZeroStudyYear,
    /// A label with no leading calendar year (e.g. `"AY 2025"`).
    UnparseableYearLabel { label: AcademicYear },
    /// `entry_year + (study_year - 1)` does not fit a calendar year.
    YearOutOfRange { entry_year: i32, study_year: u32 },
}

impl std::fmt::Display for AvailabilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroCycleLength => write!(f, "cycle length must be at least 1"),
            Self::ZeroStudyYear => write!(f, "year of study must be at least 1"),
            Self::UnparseableYearLabel { label } => {
                write!(f, "academic year label '{label}' has no leading calendar year")
            }
            Self::YearOutOfRange {
                entry_year,
                study_year,
            } => write!(
                f,
                "year {study_year} of study for entry year {entry_year} is out of range"
            ),
        }
    }
}

impl std::error::Error for AvailabilityError {}

fn start_year(label: &AcademicYear) -> Result<i32, AvailabilityError> {
    label
        .start_year()
        .ok_or_else(|| AvailabilityError::UnparseableYearLabel {
            label: label.clone(),
        })
}

/// `entry_year + (study_year - 1)`.
pub fn target_calendar_year(entry_year: i32, study_year: u32) -> Result<i32, AvailabilityError> {
    if study_year == 0 {
        return Err(AvailabilityError::ZeroStudyYear);
    }
    i32::try_from(study_year - 1)
        .ok()
        .and_then(|offset| entry_year.checked_add(offset))
        .ok_or(AvailabilityError::YearOutOfRange {
            entry_year,
            study_year,
        })
}

/// Captured academic years keyed by calendar start year.
#[derive(Clone, Debug)]
pub struct AvailabilityIndex {
    captured: BTreeMap<i32, AcademicYear>,
}

impl AvailabilityIndex {
    pub fn new(academic_years: &[AcademicYear]) -> Result<Self, AvailabilityError> {
        let mut captured = BTreeMap::new();
        for label in academic_years {
            captured.entry(start_year(label)?).or_insert_with(|| label.clone());
        }
        Ok(Self { captured })
    }

    pub fn from_catalog(catalog: &CatalogDocument) -> Result<Self, AvailabilityError> {
        Self::new(&catalog.academic_years)
    }

    /// Captured year with the given calendar start year.
    pub fn captured(&self, calendar_year: i32) -> Option<&AcademicYear> {
        self.captured.get(&calendar_year)
    }

    /// Latest captured year `y` with `target ≡ y (mod cycle_length)`.
    pub fn congruent_proxy(&self, target: i32, cycle_length: u32) -> Option<&AcademicYear> {
        let cycle = i64::from(cycle_length.max(1));
        self.captured
            .iter()
            .rev()
            .find(|(y, _)| (i64::from(target) - i64::from(**y)).rem_euclid(cycle) == 0)
            .map(|(_, label)| label)
    }

    pub fn is_available(
        &self,
        module: &MergedModule,
        entry_year: i32,
        study_year: u32,
        cycle_length: u32,
    ) -> Result<AvailabilityDecision, AvailabilityError> {
        if cycle_length == 0 {
            return Err(AvailabilityError::ZeroCycleLength);
        }
        let target_year = target_calendar_year(entry_year, study_year)?;

        let mut runs_in: Vec<i32> = Vec::with_capacity(module.available_years.len());
        for label in &module.available_years {
            runs_in.push(start_year(label)?);
        }

        let decide = |calendar_year: i32| {
            if runs_in.contains(&calendar_year) {
                Availability::Available
            } else {
                Availability::Unavailable
            }
        };

        if let Some(year) = module
            .available_years
            .iter()
            .zip(&runs_in)
            .find(|(_, y)| **y == target_year)
            .map(|(label, _)| label)
        {
            return Ok(AvailabilityDecision {
                availability: Availability::Available,
                target_year,
                basis: DecisionBasis::Captured { year: year.clone() },
            });
        }

        if let Some(year) = self.captured(target_year) {
            return Ok(AvailabilityDecision {
                availability: Availability::Unavailable,
                target_year,
                basis: DecisionBasis::Captured { year: year.clone() },
            });
        }

        match self.congruent_proxy(target_year, cycle_length) {
            Some(proxy) => Ok(AvailabilityDecision {
                availability: decide(start_year(proxy)?),
                target_year,
                basis: DecisionBasis::Projected {
                    proxy: proxy.clone(),
                },
            }),
            None => Ok(AvailabilityDecision {
                availability: Availability::Indeterminate,
                target_year,
                basis: DecisionBasis::NoCongruentCapture,
            }),
        }
    }
}

/// One-shot form of [`AvailabilityIndex::is_available`].
pub fn is_available(
    module: &MergedModule,
    academic_years: &[AcademicYear],
    entry_year: i32,
    study_year: u32,
    cycle_length: u32,
) -> Result<AvailabilityDecision, AvailabilityError> {
    AvailabilityIndex::new(academic_years)?.is_available(module, entry_year, study_year, cycle_length)
}
