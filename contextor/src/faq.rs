//! Instant FAQ matching by keyword containment.

use crate::cfg::FaqEntry;

/// A matched FAQ entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaqMatch<'a> {
    pub category: &'a str,
    pub answer: &'a str,
    pub source: &'a str,
}

/// First-hit keyword matcher over FAQ entries in configuration order.
#[derive(Clone, Debug, Default)]
pub struct FaqMatcher {
    entries: Vec<FaqEntry>,
}

impl FaqMatcher {
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the first entry with a keyword contained in the lower-cased query.
    ///
    /// No scoring: when keyword sets overlap, the earlier entry wins.
    pub fn find(&self, query: &str) -> Option<FaqMatch<'_>> {
        let q = query.to_lowercase();
        self.entries
            .iter()
            .find(|e| e.keywords.iter().any(|k| q.contains(k.as_str())))
            .map(|e| FaqMatch {
                category: &e.category,
                answer: &e.answer,
                source: &e.source,
            })
    }
}
