//! Spelling suggestion type and lookup verbosity.

use std::cmp::Ordering;
use std::fmt;

/// Controls the closeness/quantity of returned spelling suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Top suggestion with the highest term frequency of the suggestions of
    /// smallest edit distance found.
    Top,
    /// All suggestions of smallest edit distance found, ordered by term
    /// frequency.
    Closest,
    /// All suggestions within the edit-distance budget, ordered by edit
    /// distance, then by term frequency (slower, no early termination).
    All,
}

/// A suggested correction for a looked-up term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// The suggested dictionary term.
    pub term: String,
    /// Edit distance from the search term.
    pub distance: usize,
    /// Frequency of the suggestion in the dictionary.
    pub count: u64,
}

impl Suggestion {
    pub fn new<T: Into<String>>(term: T, distance: usize, count: u64) -> Self {
        Self {
            term: term.into(),
            distance,
            count,
        }
    }
}

/// Order by distance ascending, then count descending. The term itself breaks
/// remaining ties so the order is total and stable across runs.
impl Ord for Suggestion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| other.count.cmp(&self.count))
            .then_with(|| self.term.cmp(&other.term))
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.term, self.distance, self.count)
    }
}
