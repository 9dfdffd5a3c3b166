//! CLI command implementations.

pub mod check;
pub mod index;
pub mod roster;
pub mod search;

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr, bail};
use pagesift_core::Config;
use pagesift_search::{Document, html};

/// Load configuration, with defaults when the file is absent.
pub(crate) fn load_config(config_path: &Path) -> Result<Config> {
    Config::load_with_env(config_path).wrap_err("Failed to load configuration")
}

/// Parse `path`, or every `.html`/`.htm` file below it, in path order.
pub fn load_documents(path: &Path) -> Result<Vec<(PathBuf, Document)>> {
    if !path.exists() {
        bail!("Path does not exist: {}", path.display());
    }

    if path.is_file() {
        let doc = html::parse_file(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        return Ok(vec![(path.to_path_buf(), doc)]);
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_html(p))
        .collect();
    files.sort();

    let mut documents = Vec::with_capacity(files.len());
    for file in files {
        match html::parse_file(&file) {
            Ok(doc) => documents.push((file, doc)),
            Err(e) => tracing::warn!(path = %file.display(), error = %e, "Skipping unreadable file"),
        }
    }

    tracing::debug!(count = documents.len(), "Loaded documents");
    Ok(documents)
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}
