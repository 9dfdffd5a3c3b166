//! Index command - print what the widget would index

use std::path::Path;

use color_eyre::eyre::Result;
use pagesift_search::TextIndex;

use super::{load_config, load_documents};

/// Run the index command.
pub fn run(config_path: &Path, path: &Path) -> Result<()> {
    tracing::info!(?config_path, ?path, "Indexing documents");

    let config = load_config(config_path)?;
    let documents = load_documents(path)?;

    let mut total = 0;
    for (file, doc) in &documents {
        let index = TextIndex::build(doc, &config.widget);
        total += index.len();

        println!("{} ({} entries)", file.display(), index.len());
        for entry in index.entries() {
            println!("  [{}] {}", entry.heading, entry.text);
        }
        println!();
    }

    println!("  Files:   {}", documents.len());
    println!("  Entries: {total}");

    Ok(())
}
