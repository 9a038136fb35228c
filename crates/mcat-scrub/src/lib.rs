//! mcat-scrub
//!
//! Removes personal data and page boilerplate from captured text before it
//! reaches reconciliation or gets written back to disk.
//!
//! - email addresses, student IDs (`123456789/1`)
//! - configured personal literals / patterns (names, usernames)
//! - login banners, "Email me ..." prompts, enrolment counts
//!
//! Every entry point is idempotent: `scrub(scrub(x)) == scrub(x)`.
//! Pure, no IO.

mod record;
mod table_info;

pub use record::ScrubReport;
pub use table_info::clean_table_info;

use regex::{Regex, RegexBuilder};
use serde_json::Value;

const STUDENT_ID: &str = r":?\s*\d{9}/\d";
const EMAIL: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";

const BOILERPLATE: &[&str] = &[
    r"(?i)Additional Module Details\s*\n?\s*Email me the additional details\.?",
    r"(?i)Email me the additional details\.?",
    r"(?is)Email me exported data updated!!!.*$",
    r"(?i)Click here to create an email to students on this module\.?",
    r"(?i)Total Enrolled Students:\s*\d+",
    r"(?i)Logged In:[^\n]*?(?:Logout\)|\n|$)",
    r"(?s)Pick an account.*?Signed in",
];

const BLANK_LINE_RUN: &str = r"\n\s*\n\s*\n+";

/// `CODE - DEPT - TITLE`, e.g. `MTHA4003B - MTH - REAL ANALYSIS` or
/// `CMP-5015A - CMP - PROGRAMMING 2`.
const MODULE_HEADER_KEY: &str = r"^[A-Z]{3,5}-?\d{4}[A-Z]?\s*-\s*[A-Z]{2,4}\s*-\s*.+$";

/// Errors building a [`Scrubber`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrubError {
    /// A configured personal pattern is not a valid regex.
    InvalidPattern { pattern: String, message: String },
}

impl std::fmt::Display for ScrubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPattern { pattern, message } => {
                write!(f, "invalid scrub pattern '{pattern}': {message}")
            }
        }
    }
}

impl std::error::Error for ScrubError {}

/// Site-specific personal data to strip on top of the built-in patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrubRules {
    /// Matched literally, case-insensitive (usernames, full names).
    pub personal_literals: Vec<String>,
    /// Regexes, case-insensitive (e.g. `SURNAME,?\s*FIRST\w*`).
    pub personal_patterns: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Scrubber {
    personal: Vec<Regex>,
    boilerplate: Vec<Regex>,
    blank_line_run: Regex,
    module_header_key: Regex,
}

impl Scrubber {
    pub fn new(rules: &ScrubRules) -> Result<Self, ScrubError> {
        let mut personal = vec![compile(STUDENT_ID, false)?, compile(EMAIL, false)?];
        for lit in rules.personal_literals.iter().filter(|l| !l.trim().is_empty()) {
            personal.push(compile(&regex::escape(lit.trim()), true)?);
        }
        for pat in rules.personal_patterns.iter().filter(|p| !p.trim().is_empty()) {
            personal.push(compile(pat, true)?);
        }

        let boilerplate = BOILERPLATE
            .iter()
            .map(|p| compile(p, false))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            personal,
            boilerplate,
            blank_line_run: compile(BLANK_LINE_RUN, false)?,
            module_header_key: compile(MODULE_HEADER_KEY, false)?,
        })
    }

    /// Built-in patterns only.
    pub fn with_defaults() -> Result<Self, ScrubError> {
        Self::new(&ScrubRules::default())
    }

    /// Strip personal data and boilerplate, collapse blank-line runs, trim.
    ///
    /// Applied to a fixpoint: a removal can splice together text that matches
    /// again, so one pass is not enough for idempotence.
    pub fn scrub(&self, text: &str) -> String {
        fixpoint(text.to_string(), |s| self.scrub_once(s))
    }

    /// String values are scrubbed; anything else passes through unchanged.
    pub fn scrub_value(&self, value: &Value) -> Value {
        match value {
            Value::String(s) => Value::String(self.scrub(s)),
            other => other.clone(),
        }
    }

    /// `true` for content-section titles of the form `CODE - DEPT - TITLE`.
    pub fn is_module_header_key(&self, key: &str) -> bool {
        self.module_header_key.is_match(key)
    }

    fn scrub_once(&self, text: &str) -> String {
        let mut out = text.to_string();
        for re in self.personal.iter().chain(self.boilerplate.iter()) {
            out = re.replace_all(&out, "").into_owned();
        }
        out = self.blank_line_run.replace_all(&out, "\n\n").into_owned();
        out.trim().to_string()
    }
}

fn compile(pattern: &str, case_insensitive: bool) -> Result<Regex, ScrubError> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| ScrubError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

/// Repeat `step` until the output stops changing. Every step used here only
/// ever shortens its input or leaves it untouched, so this terminates.
pub(crate) fn fixpoint(mut current: String, step: impl Fn(&str) -> String) -> String {
    loop {
        let next = step(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}
