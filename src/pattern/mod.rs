//! Case tables for expect operations

mod matcher;
mod search;

pub(crate) use matcher::Matcher;

use matcher::{ContainsMatcher, ExactMatcher, RegexMatcher};
use regex::Regex;

/// How a case's pattern is tested against the accumulated buffer.
///
/// # Match Kinds
///
/// - **Exact**: satisfied only when the buffer is byte-for-byte equal
///   to the pattern. A buffer differing by even one trailing byte does
///   not match.
/// - **Contains**: satisfied when the pattern occurs as a literal
///   substring anywhere in the buffer. This is the default kind.
/// - **Regexp**: satisfied when the regular expression matches anywhere
///   in the buffer; capture groups are surfaced in the outcome.
///
/// Conditions are re-evaluated against the cumulative buffer after
/// every newly read chunk, so a condition that is a prefix of another
/// case's expected output can trigger before the longer output has
/// fully arrived. Table order is the only tie-break.
#[derive(Debug, Clone)]
pub enum Condition {
    /// Byte-for-byte equality with the whole buffer.
    Exact(String),

    /// Literal substring anywhere in the buffer (the default).
    Contains(String),

    /// Regular expression matched anywhere in the buffer.
    Regexp(Regex),
}

impl Condition {
    pub(crate) fn to_matcher(&self) -> Box<dyn Matcher> {
        match self {
            Self::Exact(s) => Box::new(ExactMatcher::new(s.as_bytes().to_vec())),
            Self::Contains(s) => Box::new(ContainsMatcher::new(s.as_bytes().to_vec())),
            Self::Regexp(r) => Box::new(RegexMatcher::new(r.clone())),
        }
    }
}

/// A labeled entry of a case table.
///
/// The label is an opaque caller-chosen token returned in the match
/// outcome; pipexpect attaches no meaning to it.
///
/// # Examples
///
/// ```
/// use pipexpect::Case;
///
/// // Substring match, the default kind
/// let prompt = Case::new("prompt", "login:");
///
/// // Whole-buffer equality
/// let banner = Case::exact("banner", "ready\n");
///
/// // Regular expression with capture groups
/// let pid = Case::regex("pid", r"pid=(\d+)").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Case {
    label: String,
    condition: Condition,
}

impl Case {
    /// Create a case with the default match kind (substring).
    pub fn new(label: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::contains(label, pattern)
    }

    /// Create a whole-buffer equality case.
    pub fn exact(label: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            condition: Condition::Exact(pattern.into()),
        }
    }

    /// Create a substring case.
    pub fn contains(label: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            condition: Condition::Contains(pattern.into()),
        }
    }

    /// Create a regular expression case.
    ///
    /// # Errors
    ///
    /// Returns a regex error if the pattern is invalid.
    pub fn regex(label: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            label: label.into(),
            condition: Condition::Regexp(Regex::new(pattern)?),
        })
    }

    /// The caller-chosen label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The match condition.
    pub fn condition(&self) -> &Condition {
        &self.condition
    }
}

/// An ordered set of cases evaluated against accumulated output.
///
/// Ordering matters: when the buffer satisfies more than one case, the
/// first satisfied case in table order wins and later cases are not
/// evaluated.
///
/// # Examples
///
/// ```
/// use pipexpect::{Case, CaseTable};
///
/// let table = CaseTable::new()
///     .case(Case::contains("prompt", "login:"))
///     .case(Case::contains("denied", "Permission denied"))
///     .case(Case::regex("uptime", r"up (\d+) days").unwrap());
///
/// assert_eq!(table.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CaseTable {
    cases: Vec<Case>,
}

impl CaseTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a case, returning the table for chaining.
    #[must_use]
    pub fn case(mut self, case: Case) -> Self {
        self.cases.push(case);
        self
    }

    /// Append a case in place.
    pub fn push(&mut self, case: Case) {
        self.cases.push(case);
    }

    /// Number of cases in the table.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// True if the table holds no cases.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Iterate the cases in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, Case> {
        self.cases.iter()
    }
}

impl From<Vec<Case>> for CaseTable {
    fn from(cases: Vec<Case>) -> Self {
        Self { cases }
    }
}

impl FromIterator<Case> for CaseTable {
    fn from_iter<I: IntoIterator<Item = Case>>(iter: I) -> Self {
        Self {
            cases: iter.into_iter().collect(),
        }
    }
}
