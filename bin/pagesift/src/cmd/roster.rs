//! Roster command - filter the achievers dataset

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use pagesift_search::{Roster, StudentRecord};

use super::load_config;

/// Run the roster command.
pub fn run(config_path: &Path, path: &Path, query: Option<&str>) -> Result<()> {
    tracing::info!(?config_path, ?path, ?query, "Filtering roster");

    let config = load_config(config_path)?;
    let roster = Roster::from_path(path, &config.roster)
        .wrap_err_with(|| format!("Failed to load roster {}", path.display()))?;

    let shown = roster.filter(query.unwrap_or_default());
    for record in &shown {
        println!("{}", format_row(record, roster.course_prefix()));
    }

    println!();
    println!("  {}", roster.summary(shown.len()));

    Ok(())
}

/// One table row: family name, first names, school and courses.
pub fn format_row(record: &StudentRecord, course_prefix: &str) -> String {
    let courses = record.courses(course_prefix);
    let courses = if courses.is_empty() {
        "-".to_string()
    } else {
        courses.join(", ")
    };

    format!(
        "{} | {} | {} | {}",
        record.family_name.as_deref().unwrap_or_default(),
        record.first_names.as_deref().unwrap_or_default(),
        record.school_name.as_deref().unwrap_or_default(),
        courses,
    )
}
