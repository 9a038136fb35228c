use mcat_schemas::{AcademicYear, MergedModule};

use crate::ModuleIdentity;

/// Why a record was left out of the fold.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SkipReason {
    MissingModuleCode,
    MissingYearOfStudy,
}

/// A record that could not be keyed.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SkippedRecord {
    pub academic_year: AcademicYear,
    /// Position in that snapshot's `modules` list.
    pub index: usize,
    /// Whatever identity fields the record did carry.
    pub identity: ModuleIdentity,
    pub reason: SkipReason,
}

/// An identity seen more than once inside one snapshot. Folded anyway
/// (later record wins), but worth surfacing.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct DuplicateIdentity {
    pub academic_year: AcademicYear,
    pub identity: ModuleIdentity,
    pub occurrences: usize,
}

/// Result of folding every snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct ReconcileOutcome {
    /// One per identity, in identity order (not presentation order).
    pub modules: Vec<MergedModule>,
    /// Every captured label, ascending.
    pub academic_years: Vec<AcademicYear>,
    pub skipped: Vec<SkippedRecord>,
    pub duplicates: Vec<DuplicateIdentity>,
}

impl ReconcileOutcome {
    /// No snapshots were supplied. Informational, not an error.
    pub fn is_empty(&self) -> bool {
        self.academic_years.is_empty()
    }

    /// Entries carrying `rules_by_year`.
    pub fn divergent_rules_count(&self) -> usize {
        self.modules
            .iter()
            .filter(|m| m.rules_by_year.is_some())
            .count()
    }
}

/// Fatal reconciliation errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReconcileError {
    /// Two snapshots claim the same academic year; the walk order between
    /// them would depend on input position.
    DuplicateAcademicYear { academic_year: AcademicYear },
}

impl std::fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateAcademicYear { academic_year } => write!(
                f,
                "academic year '{academic_year}' is supplied by more than one snapshot"
            ),
        }
    }
}

impl std::error::Error for ReconcileError {}
