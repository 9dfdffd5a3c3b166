//! Text index construction.
//!
//! Walks a [`ContentProvider`] once and records every visible text node with
//! the heading it sits under.

use pagesift_core::WidgetConfig;
use tracing::debug;

use crate::document::ContentProvider;

/// One indexed text node.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry<E> {
    /// Text with whitespace runs collapsed.
    pub text: String,

    /// Case-folded `text`, char-aligned with it.
    pub text_lower: String,

    /// Element that owns the text node.
    pub element: E,

    /// Heading in effect where the text appears.
    pub heading: String,
}

/// Ordered, immutable list of indexed text.
#[derive(Debug, Clone)]
pub struct TextIndex<E> {
    entries: Vec<IndexEntry<E>>,
}

impl<E> Default for TextIndex<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E: Clone> TextIndex<E> {
    /// Index every visible text node the provider yields.
    ///
    /// Text directly under an ignored tag, or anywhere under a hidden
    /// element, is skipped. A text node whose parent is `h1`-`h6` becomes the
    /// current heading before it is recorded.
    pub fn build<P>(provider: &P, config: &WidgetConfig) -> Self
    where
        P: ContentProvider<Element = E>,
    {
        let mut heading = provider
            .title()
            .unwrap_or_else(|| config.fallback_heading.clone());
        let mut entries = Vec::new();

        for node in provider.text_nodes() {
            let Some(parent) = node.parent else {
                continue;
            };
            if config.is_ignored_tag(&parent.tag) || parent.hidden {
                continue;
            }

            let text = collapse_whitespace(&node.text);
            if text.is_empty() {
                continue;
            }

            if is_heading(&parent.tag) {
                heading = text.clone();
            }

            entries.push(IndexEntry {
                text_lower: fold_case(&text),
                text,
                element: parent.element,
                heading: heading.clone(),
            });
        }

        debug!(entries = entries.len(), "Built text index");

        Self { entries }
    }
}

impl<E> TextIndex<E> {
    /// Wrap already-built entries.
    pub fn from_entries(entries: Vec<IndexEntry<E>>) -> Self {
        Self { entries }
    }

    /// All entries in document order.
    pub fn entries(&self) -> &[IndexEntry<E>] {
        &self.entries
    }

    /// Entry at `position`.
    pub fn get(&self, position: usize) -> Option<&IndexEntry<E>> {
        self.entries.get(position)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_heading(tag: &str) -> bool {
    matches!(tag.as_bytes(), [b'h' | b'H', b'1'..=b'6'])
}

/// Collapse whitespace runs to single spaces and trim.
///
/// U+FEFF counts as whitespace, as it does for `\s` in browser regexps.
pub fn collapse_whitespace(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c == '\u{feff}')
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase `text` one char at a time.
///
/// Chars whose lowercase form expands to several chars are kept unchanged, so
/// the result has exactly as many chars as the input and char offsets carry
/// over between the two.
pub fn fold_case(text: &str) -> String {
    text.chars()
        .map(|c| {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) => l,
                _ => c,
            }
        })
        .collect()
}
