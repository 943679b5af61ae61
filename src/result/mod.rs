//! Outcome types for expect operations

mod error;

pub use error::ExpectError;

/// Result of a single expect cycle.
///
/// An expect call either hits a case from the table or ends with a
/// sentinel: `Eol` when the process ended before any case matched and
/// `Timeout` when the deadline elapsed first. The sentinel variants are
/// normal control-flow results, not errors, and both carry everything
/// read during the cycle so no output is silently lost.
///
/// # Examples
///
/// ```no_run
/// use pipexpect::{Case, CaseTable, ExpectOutcome, Session};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut session = Session::spawn("some-interactive-tool")?;
/// let table = CaseTable::new()
///     .case(Case::contains("prompt", "login:"))
///     .case(Case::contains("refused", "Connection refused"));
///
/// match session.expect(&table).await? {
///     ExpectOutcome::Match { label, captures } => {
///         println!("hit case {} with {:?}", label, captures);
///     }
///     ExpectOutcome::Eol { buffer } => {
///         println!("process ended, saw: {}", buffer);
///     }
///     ExpectOutcome::Timeout { buffer } => {
///         println!("timed out, saw so far: {}", buffer);
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectOutcome {
    /// A case from the table matched the accumulated buffer.
    Match {
        /// Label of the first case (in table order) that was satisfied.
        label: String,

        /// Captured text.
        ///
        /// For `Exact` and `Contains` cases this is the whole
        /// accumulated buffer as a single element. For `Regexp` cases
        /// it is the full regex match followed by every capture group,
        /// with non-participating groups as empty strings.
        captures: Vec<String>,
    },

    /// The process ended before any case matched.
    Eol {
        /// Everything read during the cycle, possibly empty.
        buffer: String,
    },

    /// The deadline elapsed before any case matched.
    Timeout {
        /// Everything read during the cycle, possibly empty.
        buffer: String,
    },
}

impl ExpectOutcome {
    /// Label of the matched case, or `None` for a sentinel outcome.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Match { label, .. } => Some(label),
            _ => None,
        }
    }

    /// Captured text for a match, or the accumulated buffer (as a
    /// one-element slice) for a sentinel outcome.
    pub fn captures(&self) -> &[String] {
        match self {
            Self::Match { captures, .. } => captures,
            Self::Eol { buffer } | Self::Timeout { buffer } => std::slice::from_ref(buffer),
        }
    }

    /// True if the process ended before any case matched.
    pub fn is_eol(&self) -> bool {
        matches!(self, Self::Eol { .. })
    }

    /// True if the deadline elapsed before any case matched.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
