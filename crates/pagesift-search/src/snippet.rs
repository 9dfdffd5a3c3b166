//! Snippet windows around a hit.

use pagesift_core::WidgetConfig;

/// Marker shown where a snippet window cuts the source text.
pub const ELLIPSIS: &str = "…";

/// How much context to keep around a hit, in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnippetWindow {
    pub before: usize,
    pub after: usize,
}

impl Default for SnippetWindow {
    fn default() -> Self {
        Self {
            before: 40,
            after: 60,
        }
    }
}

impl From<&WidgetConfig> for SnippetWindow {
    fn from(config: &WidgetConfig) -> Self {
        Self {
            before: config.snippet_before,
            after: config.snippet_after,
        }
    }
}

/// A hit with its surrounding context, borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snippet<'a> {
    /// Text was cut before `before`.
    pub truncated_start: bool,
    pub before: &'a str,
    pub hit: &'a str,
    pub after: &'a str,
    /// Text was cut after `after`.
    pub truncated_end: bool,
}

impl<'a> Snippet<'a> {
    /// Cut a window around the hit at char offset `match_index` spanning
    /// `match_len` chars. Offsets past the end of `text` are clamped.
    pub fn extract(
        text: &'a str,
        match_index: usize,
        match_len: usize,
        window: SnippetWindow,
    ) -> Self {
        let total = text.chars().count();
        let hit_start = match_index.min(total);
        let hit_end = (hit_start + match_len).min(total);
        let start = hit_start.saturating_sub(window.before);
        let end = (hit_end + window.after).min(total);

        let at = |chars: usize| byte_offset(text, chars);

        Self {
            truncated_start: start > 0,
            before: &text[at(start)..at(hit_start)],
            hit: &text[at(hit_start)..at(hit_end)],
            after: &text[at(hit_end)..at(end)],
            truncated_end: end < total,
        }
    }

    /// Escaped markup with the hit wrapped in `<mark>`.
    pub fn to_html(&self) -> String {
        format!(
            "{}{}<mark>{}</mark>{}{}",
            if self.truncated_start { ELLIPSIS } else { "" },
            escape_html(self.before),
            escape_html(self.hit),
            escape_html(self.after),
            if self.truncated_end { ELLIPSIS } else { "" },
        )
    }

    /// Plain text with the hit wrapped in the given markers.
    pub fn to_plain(&self, open: &str, close: &str) -> String {
        format!(
            "{}{}{open}{}{close}{}{}",
            if self.truncated_start { ELLIPSIS } else { "" },
            self.before,
            self.hit,
            self.after,
            if self.truncated_end { ELLIPSIS } else { "" },
        )
    }
}

/// Byte offset of the char at index `chars`, or the string length past the end.
fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
