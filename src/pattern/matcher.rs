//! Case matcher implementations

use regex::Regex;

use crate::pattern::search::SubstringSearch;

/// Decides whether a case's condition is satisfied by the accumulated
/// buffer. A satisfied matcher returns the captures the caller sees in
/// the match outcome.
pub trait Matcher: Send + Sync {
    /// Evaluate the buffer, returning captures on a match.
    fn matches(&self, buffer: &[u8]) -> Option<Vec<String>>;
}

/// Whole-buffer equality. Satisfied only when the buffer is
/// byte-for-byte equal to the pattern; captures the buffer itself.
pub struct ExactMatcher {
    pattern: Vec<u8>,
}

impl ExactMatcher {
    pub fn new(pattern: impl Into<Vec<u8>>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl Matcher for ExactMatcher {
    fn matches(&self, buffer: &[u8]) -> Option<Vec<String>> {
        if !self.pattern.is_empty() && buffer == self.pattern.as_slice() {
            Some(vec![String::from_utf8_lossy(buffer).into_owned()])
        } else {
            None
        }
    }
}

/// Literal substring occurring anywhere in the buffer; captures the
/// whole buffer on a hit.
pub struct ContainsMatcher {
    search: SubstringSearch,
}

impl ContainsMatcher {
    pub fn new(pattern: impl Into<Vec<u8>>) -> Self {
        Self {
            search: SubstringSearch::new(pattern),
        }
    }
}

impl Matcher for ContainsMatcher {
    fn matches(&self, buffer: &[u8]) -> Option<Vec<String>> {
        self.search
            .find(buffer)
            .map(|_| vec![String::from_utf8_lossy(buffer).into_owned()])
    }
}

/// Regular expression matched anywhere in the buffer.
///
/// Captures are the full match followed by every capture group, with
/// non-participating groups as empty strings so indices stay aligned
/// with the pattern. The buffer must be valid UTF-8 at evaluation time;
/// a partially received multi-byte character simply fails to match
/// until its remaining bytes arrive.
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    pub fn new(regex: Regex) -> Self {
        Self { regex }
    }
}

impl Matcher for RegexMatcher {
    fn matches(&self, buffer: &[u8]) -> Option<Vec<String>> {
        let text = std::str::from_utf8(buffer).ok()?;
        let captures = self.regex.captures(text)?;

        Some(
            (0..captures.len())
                .map(|i| {
                    captures
                        .get(i)
                        .map_or_else(String::new, |cap| cap.as_str().to_string())
                })
                .collect(),
        )
    }
}
