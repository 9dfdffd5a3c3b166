//! Check command - validate configuration

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use pagesift_core::Config;

use super::load_config;

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration");

    let result = validate(config_path);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Validate the settings the other commands would run with, file plus
/// `PAGESIFT__` environment overrides.
fn validate(config_path: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    if !config_path.exists() {
        result.add_warning(format!(
            "{} not found, using defaults",
            config_path.display()
        ));
    }

    match load_config(config_path) {
        Ok(config) => {
            println!("  ✓ Configuration valid");
            check_config_values(&config, &mut result);
        }
        Err(e) => {
            println!("  ✗ Configuration invalid: {e:#}");
            result.add_error(format!("Configuration error: {e:#}"));
        }
    }

    result
}

/// Flag settings that load fine but make the widget misbehave.
fn check_config_values(config: &Config, result: &mut ValidationResult) {
    let widget = &config.widget;

    if widget.debounce_ms == 0 {
        result.add_warning("widget.debounce_ms is 0; every keystroke triggers a search");
    }

    if widget.highlight_ms == 0 {
        result.add_warning("widget.highlight_ms is 0; jumped-to elements are never highlighted");
    }

    if widget.snippet_before == 0 && widget.snippet_after == 0 {
        result.add_warning("Snippet window is empty; results show only the matched text");
    }

    if widget.container_attribute.trim().is_empty() {
        result.add_error("widget.container_attribute cannot be empty");
    }

    if widget.highlight_class.trim().is_empty() {
        result.add_error("widget.highlight_class cannot be empty");
    }

    if widget.ignored_tags.is_empty() {
        result.add_warning("widget.ignored_tags is empty; script and style text will be indexed");
    }
}
