use std::fmt;

use serde::{Deserialize, Serialize};

/// Calendar academic-year label, e.g. `"2025/6"`.
///
/// Ordering is by label text, which is chronological for the
/// `YYYY/N` labels the acquisition step produces.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AcademicYear(String);

impl AcademicYear {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Calendar year the academic year starts in: the leading digits of the
    /// label (`"2025/6"` -> `2025`). `None` if the label has no leading digits.
    pub fn start_year(&self) -> Option<i32> {
        let s = self.0.trim();
        let end = s
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        if end == 0 {
            return None;
        }
        s[..end].parse().ok()
    }

    /// Filename-safe form: `"2025/6"` -> `"2025_6"`.
    pub fn slug(&self) -> String {
        self.0.replace('/', "_")
    }
}

impl fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AcademicYear {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AcademicYear {
    fn from(s: String) -> Self {
        Self(s)
    }
}
