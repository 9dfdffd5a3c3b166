//! Search command - run a query against static pages

use std::path::{Path, PathBuf};

use color_eyre::eyre::Result;
use pagesift_core::WidgetConfig;
use pagesift_search::{Document, SearchQuery, Snippet, SnippetWindow, TextIndex};

use super::{load_config, load_documents};

/// One printed hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub file: PathBuf,
    pub heading: String,
    pub snippet: String,
}

/// Run the search command.
pub fn run(config_path: &Path, path: &Path, query: &str, limit: Option<usize>) -> Result<()> {
    tracing::info!(?config_path, ?path, query, ?limit, "Searching documents");

    let config = load_config(config_path)?;
    let documents = load_documents(path)?;

    let query = SearchQuery::parse(query);
    if query.is_empty() {
        println!("Empty query, nothing to search");
        return Ok(());
    }

    let limit = limit.unwrap_or(config.widget.results_limit);
    let hits = collect_hits(&documents, &query, limit, &config.widget);

    if hits.is_empty() {
        println!("No results found");
        return Ok(());
    }

    for hit in &hits {
        println!("{}: [{}] {}", hit.file.display(), hit.heading, hit.snippet);
    }
    println!();
    println!("  Matches: {}", hits.len());

    Ok(())
}

/// Search every document, keeping at most `limit` hits per document.
pub fn collect_hits(
    documents: &[(PathBuf, Document)],
    query: &SearchQuery,
    limit: usize,
    config: &WidgetConfig,
) -> Vec<Hit> {
    let window = SnippetWindow::from(config);
    let mut hits = Vec::new();

    for (file, doc) in documents {
        let index = TextIndex::build(doc, config);
        for m in index.search(query, limit) {
            let entry = index.resolve(&m);
            let snippet = Snippet::extract(&entry.text, m.match_index, m.match_len, window);
            hits.push(Hit {
                file: file.clone(),
                heading: entry.heading.clone(),
                snippet: snippet.to_plain("[", "]"),
            });
        }
    }

    hits
}
