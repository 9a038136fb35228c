use std::fmt;

use mcat_schemas::{MergedModule, ModuleRecord};

/// Composite catalog key. A module offered at two years of study is two
/// identities.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleIdentity {
    pub module_code: String,
    pub year_of_study: String,
}

impl ModuleIdentity {
    pub fn new(module_code: impl Into<String>, year_of_study: impl Into<String>) -> Self {
        Self {
            module_code: module_code.into(),
            year_of_study: year_of_study.into(),
        }
    }

    /// Both parts present (non-blank).
    pub fn is_complete(&self) -> bool {
        !self.module_code.trim().is_empty() && !self.year_of_study.trim().is_empty()
    }

    pub fn of_merged(m: &MergedModule) -> Self {
        resolve(&m.record)
    }
}

impl fmt::Display for ModuleIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.module_code, self.year_of_study)
    }
}

/// Extract the identity of a record. Total: no validation, no normalisation.
pub fn resolve(rec: &ModuleRecord) -> ModuleIdentity {
    ModuleIdentity::new(rec.module_code.clone(), rec.year_of_study.clone())
}
