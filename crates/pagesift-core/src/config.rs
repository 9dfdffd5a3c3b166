//! Widget and roster configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for pagesift.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// In-page search widget settings.
    #[serde(default)]
    pub widget: WidgetConfig,

    /// Roster table settings.
    #[serde(default)]
    pub roster: RosterConfig,
}

/// Search widget configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Maximum number of matches collected per search.
    #[serde(default = "default_results_limit")]
    pub results_limit: usize,

    /// Trailing-edge debounce applied to input events (milliseconds).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// How long a jumped-to element keeps its highlight (milliseconds).
    #[serde(default = "default_highlight_ms")]
    pub highlight_ms: u64,

    /// Characters of context kept before a hit.
    #[serde(default = "default_snippet_before")]
    pub snippet_before: usize,

    /// Characters of context kept after a hit.
    #[serde(default = "default_snippet_after")]
    pub snippet_after: usize,

    /// Element id of the search input.
    #[serde(default = "default_input_id")]
    pub input_id: String,

    /// Element id of the results container.
    #[serde(default = "default_results_id")]
    pub results_id: String,

    /// Attribute marking the container that receives the highlight.
    #[serde(default = "default_container_attribute")]
    pub container_attribute: String,

    /// Class applied to the highlighted container.
    #[serde(default = "default_highlight_class")]
    pub highlight_class: String,

    /// Heading used before the first heading when the page has no title.
    #[serde(default = "default_fallback_heading")]
    pub fallback_heading: String,

    /// Tags whose text is never indexed.
    #[serde(default = "default_ignored_tags")]
    pub ignored_tags: Vec<String>,
}

/// Roster table configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Key prefix identifying course columns in the dataset.
    #[serde(default = "default_course_prefix")]
    pub course_prefix: String,
}

// Default value functions
fn default_results_limit() -> usize {
    20
}

fn default_debounce_ms() -> u64 {
    160
}

fn default_highlight_ms() -> u64 {
    1800
}

fn default_snippet_before() -> usize {
    40
}

fn default_snippet_after() -> usize {
    60
}

fn default_input_id() -> String {
    "search-input".to_string()
}

fn default_results_id() -> String {
    "search-results".to_string()
}

fn default_container_attribute() -> String {
    "data-infogram-element".to_string()
}

fn default_highlight_class() -> String {
    "search-target".to_string()
}

fn default_fallback_heading() -> String {
    "Page".to_string()
}

fn default_ignored_tags() -> Vec<String> {
    ["script", "style", "noscript", "template"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_course_prefix() -> String {
    "Course Name".to_string()
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            results_limit: default_results_limit(),
            debounce_ms: default_debounce_ms(),
            highlight_ms: default_highlight_ms(),
            snippet_before: default_snippet_before(),
            snippet_after: default_snippet_after(),
            input_id: default_input_id(),
            results_id: default_results_id(),
            container_attribute: default_container_attribute(),
            highlight_class: default_highlight_class(),
            fallback_heading: default_fallback_heading(),
            ignored_tags: default_ignored_tags(),
        }
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            course_prefix: default_course_prefix(),
        }
    }
}

impl WidgetConfig {
    /// Whether text directly under `tag` is skipped by the indexer.
    pub fn is_ignored_tag(&self, tag: &str) -> bool {
        self.ignored_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(?path, "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration using the config crate, with `PAGESIFT__` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix("PAGESIFT").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let widget = &self.widget;

        if widget.results_limit == 0 {
            return Err(CoreError::config("widget.results_limit must be positive"));
        }

        if widget.input_id.trim().is_empty() {
            return Err(CoreError::config("widget.input_id cannot be empty"));
        }

        if widget.results_id.trim().is_empty() {
            return Err(CoreError::config("widget.results_id cannot be empty"));
        }

        if widget.input_id == widget.results_id {
            return Err(CoreError::config(
                "widget.input_id and widget.results_id must differ",
            ));
        }

        if self.roster.course_prefix.is_empty() {
            return Err(CoreError::config("roster.course_prefix cannot be empty"));
        }

        if widget.debounce_ms == 0 {
            tracing::warn!("widget.debounce_ms is 0; every keystroke triggers a search");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn create_test_config() -> String {
        r#"
[widget]
results_limit = 10
debounce_ms = 250
highlight_ms = 900
input_id = "find"
results_id = "find-results"
ignored_tags = ["script", "style", "svg"]

[roster]
course_prefix = "Subject"
"#
        .to_string()
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("pagesift.toml");
        let mut file = std::fs::File::create(&config_path).expect("create file");
        file.write_all(create_test_config().as_bytes())
            .expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.widget.results_limit, 10);
        assert_eq!(config.widget.debounce_ms, 250);
        assert_eq!(config.widget.highlight_ms, 900);
        assert_eq!(config.widget.input_id, "find");
        assert_eq!(config.widget.results_id, "find-results");
        assert!(config.widget.is_ignored_tag("SVG"));
        assert!(!config.widget.is_ignored_tag("noscript"));
        assert_eq!(config.roster.course_prefix, "Subject");
        // untouched fields keep their defaults
        assert_eq!(config.widget.snippet_before, 40);
        assert_eq!(config.widget.highlight_class, "search-target");
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();

        assert_eq!(config.widget.results_limit, 20);
        assert_eq!(config.widget.debounce_ms, 160);
        assert_eq!(config.widget.highlight_ms, 1800);
        assert_eq!(config.widget.snippet_before, 40);
        assert_eq!(config.widget.snippet_after, 60);
        assert_eq!(config.widget.input_id, "search-input");
        assert_eq!(config.widget.results_id, "search-results");
        assert_eq!(config.widget.container_attribute, "data-infogram-element");
        assert_eq!(config.widget.fallback_heading, "Page");
        for tag in ["script", "style", "noscript", "template"] {
            assert!(config.widget.is_ignored_tag(tag));
        }
        assert_eq!(config.roster.course_prefix, "Course Name");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("pagesift.toml");
        std::fs::write(&config_path, "").expect("write");

        let config = Config::load(&config_path).expect("load config");
        assert_eq!(config.widget, WidgetConfig::default());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/pagesift.toml"))
            .expect("defaults");
        assert_eq!(config.widget.results_limit, 20);
    }

    #[test]
    fn test_config_validation_zero_limit() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("pagesift.toml");
        std::fs::write(&config_path, "[widget]\nresults_limit = 0\n").expect("write");

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("results_limit must be positive")
        );
    }

    #[test]
    fn test_config_validation_same_ids() {
        let mut config = Config::default();
        config.widget.results_id = config.widget.input_id.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/pagesift.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_load_with_env_reads_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("pagesift.toml");
        std::fs::write(&config_path, "[widget]\nhighlight_ms = 500\n").expect("write");

        let config = Config::load_with_env(&config_path).expect("load config");
        assert_eq!(config.widget.highlight_ms, 500);
        assert_eq!(config.widget.results_limit, 20);
    }
}
