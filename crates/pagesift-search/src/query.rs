//! Query normalization and substring matching.

use tracing::trace;

use crate::indexer::{IndexEntry, TextIndex, fold_case};

/// A normalized search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Raw query string as typed.
    pub raw: String,

    /// Trimmed, case-folded needle.
    pub needle: String,

    /// Length of `needle` in chars.
    pub len: usize,
}

impl SearchQuery {
    /// Parse a query string.
    pub fn parse(query: &str) -> Self {
        let needle = fold_case(query.trim());
        let len = needle.chars().count();

        Self {
            raw: query.to_string(),
            needle,
            len,
        }
    }

    /// Whether the query is empty or whitespace only.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }
}

/// A hit in the index, valid for the index it was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchEntry {
    /// Position of the matching entry in the index.
    pub position: usize,

    /// Char offset of the first occurrence within the entry text.
    pub match_index: usize,

    /// Length of the hit in chars.
    pub match_len: usize,
}

impl<E> TextIndex<E> {
    /// Scan entries in document order and collect up to `limit` matches.
    ///
    /// Only the first occurrence in each entry counts. An empty query matches
    /// nothing.
    pub fn search(&self, query: &SearchQuery, limit: usize) -> Vec<MatchEntry> {
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut matches = Vec::new();

        for (position, entry) in self.entries().iter().enumerate() {
            if let Some(byte) = entry.text_lower.find(&query.needle) {
                matches.push(MatchEntry {
                    position,
                    match_index: entry.text_lower[..byte].chars().count(),
                    match_len: query.len,
                });
                if matches.len() >= limit {
                    break;
                }
            }
        }

        trace!(
            query_len = query.len,
            matches = matches.len(),
            "Scanned text index"
        );

        matches
    }

    /// The entry a match points at.
    ///
    /// # Panics
    ///
    /// Panics if `m` was produced by a different index.
    pub fn resolve(&self, m: &MatchEntry) -> &IndexEntry<E> {
        &self.entries()[m.position]
    }
}
