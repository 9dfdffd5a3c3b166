//! Results panel markup.

use crate::{
    indexer::TextIndex,
    query::MatchEntry,
    snippet::{Snippet, SnippetWindow, escape_html},
};

/// Markup shown when a non-empty query matches nothing.
pub const EMPTY_RESULTS_HTML: &str = r#"<div class="search-empty">No results found</div>"#;

/// Heading shown for an entry with a blank heading.
const DEFAULT_SECTION: &str = "Section";

/// Markup for one result, tagged with its position in the result list.
pub fn render_result<E>(
    index: &TextIndex<E>,
    position: usize,
    m: &MatchEntry,
    window: SnippetWindow,
) -> String {
    let entry = index.resolve(m);
    let heading = if entry.heading.is_empty() {
        DEFAULT_SECTION
    } else {
        &entry.heading
    };
    let snippet = Snippet::extract(&entry.text, m.match_index, m.match_len, window);

    format!(
        r#"<div class="search-result" role="option" data-index="{position}"><div class="search-heading">{}</div><div class="search-snippet">{}</div></div>"#,
        escape_html(heading),
        snippet.to_html(),
    )
}

/// Markup for a whole result set; [`EMPTY_RESULTS_HTML`] when there are no matches.
pub fn render_results<E>(
    index: &TextIndex<E>,
    matches: &[MatchEntry],
    window: SnippetWindow,
) -> String {
    if matches.is_empty() {
        return EMPTY_RESULTS_HTML.to_string();
    }

    let mut html = String::new();
    for (position, m) in matches.iter().enumerate() {
        html.push_str(&render_result(index, position, m, window));
    }
    html
}
