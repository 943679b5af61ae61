//! Substring search over raw process output

/// Boyer-Moore-Horspool substring searcher.
///
/// The bad-character table is built once per case so that re-scanning
/// the buffer after every newly read chunk stays cheap. Operates on raw
/// bytes; process output is not required to be valid UTF-8.
pub struct SubstringSearch {
    pattern: Vec<u8>,
    bad_char_table: [usize; 256],
}

impl SubstringSearch {
    /// Build a searcher for `pattern`. An empty pattern never matches.
    pub fn new(pattern: impl Into<Vec<u8>>) -> Self {
        let pattern = pattern.into();

        let mut bad_char_table = [pattern.len().max(1); 256];
        if !pattern.is_empty() {
            for (i, &byte) in pattern.iter().enumerate().take(pattern.len() - 1) {
                bad_char_table[byte as usize] = pattern.len() - 1 - i;
            }
        }

        Self {
            pattern,
            bad_char_table,
        }
    }

    /// Find the first occurrence of the pattern in `haystack`,
    /// returning its start offset.
    pub fn find(&self, haystack: &[u8]) -> Option<usize> {
        if self.pattern.is_empty() || haystack.len() < self.pattern.len() {
            return None;
        }

        let mut pos = 0;
        while pos + self.pattern.len() <= haystack.len() {
            if haystack[pos..pos + self.pattern.len()] == self.pattern[..] {
                return Some(pos);
            }

            // Shift using bad character table
            let shift_char = haystack[pos + self.pattern.len() - 1];
            pos += self.bad_char_table[shift_char as usize];
        }

        None
    }
}
