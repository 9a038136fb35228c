use mcat_schemas::MergedModule;

/// Rank given to sections with no entry in [`SECTION_RANKS`]; sorts after
/// every known section.
pub const UNRANKED_SECTION: u32 = 99;

/// Section-label prefix -> rank. First matching prefix wins.
const SECTION_RANKS: &[(&str, u32)] = &[
    ("Compulsory Modules", 0),
    ("Core Modules", 0),
    ("Options Range A", 1),
    ("Options Range B", 2),
    ("Options Range C", 3),
];

/// `year_of_study` labels must carry a digit to be ordered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderingError {
    NoStudyYearDigit {
        module_code: String,
        year_of_study: String,
    },
}

impl std::fmt::Display for OrderingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoStudyYearDigit {
                module_code,
                year_of_study,
            } => write!(
                f,
                "module '{module_code}': year_of_study label '{year_of_study}' has no digit"
            ),
        }
    }
}

impl std::error::Error for OrderingError {}

/// Presentation sort key. Field order is the comparison order.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct CatalogSortKey {
    pub study_year: u32,
    pub section_rank: u32,
    pub module_code: String,
    /// Tie-break between labels sharing a digit (`Year 2U` vs `Year 2P`).
    pub year_of_study: String,
}

/// First digit in the label: `"Year 2U"` -> `2`.
pub fn study_year_number(label: &str) -> Option<u32> {
    label.chars().find_map(|c| c.to_digit(10))
}

pub fn section_rank(section: &str) -> u32 {
    SECTION_RANKS
        .iter()
        .find(|(prefix, _)| section.starts_with(prefix))
        .map(|(_, rank)| *rank)
        .unwrap_or(UNRANKED_SECTION)
}

pub fn sort_key(m: &MergedModule) -> Result<CatalogSortKey, OrderingError> {
    let rec = &m.record;
    let study_year =
        study_year_number(&rec.year_of_study).ok_or_else(|| OrderingError::NoStudyYearDigit {
            module_code: rec.module_code.clone(),
            year_of_study: rec.year_of_study.clone(),
        })?;

    Ok(CatalogSortKey {
        study_year,
        section_rank: section_rank(&rec.section),
        module_code: rec.module_code.clone(),
        year_of_study: rec.year_of_study.clone(),
    })
}

/// Sort merged modules into presentation order.
///
/// Depends only on each entry's final content, so any input permutation
/// yields the same output. Fails on the first label without a digit.
pub fn order(modules: Vec<MergedModule>) -> Result<Vec<MergedModule>, OrderingError> {
    let mut keyed: Vec<(CatalogSortKey, MergedModule)> = modules
        .into_iter()
        .map(|m| sort_key(&m).map(|k| (k, m)))
        .collect::<Result<_, _>>()?;

    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(keyed.into_iter().map(|(_, m)| m).collect())
}
