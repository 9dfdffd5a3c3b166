//! Student roster filtering.
//!
//! The roster is a fixed JSON dataset of the form `{"students": [...]}`.
//! Each record has name and school columns plus any number of course
//! columns whose keys share a common prefix (`Course Name`, `Course Name 2`,
//! ...). Filtering is a case-insensitive substring test over those columns.

use std::{collections::BTreeMap, path::Path};

use pagesift_core::{CoreError, Result, RosterConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// One row of the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(rename = "Family Name", default)]
    pub family_name: Option<String>,

    #[serde(rename = "First Name/s", default)]
    pub first_names: Option<String>,

    #[serde(rename = "School Name", default)]
    pub school_name: Option<String>,

    /// Remaining columns, course columns included.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl StudentRecord {
    /// Non-empty course values, in column order.
    ///
    /// `Course Name` is column 1, `Course Name 2` column 2, and so on.
    pub fn courses(&self, prefix: &str) -> Vec<&str> {
        let mut columns: Vec<(u32, &str)> = self
            .fields
            .iter()
            .filter_map(|(key, value)| {
                let suffix = key.strip_prefix(prefix)?;
                let course = value.as_str().filter(|s| !s.is_empty())?;
                Some((course_column(suffix), course))
            })
            .collect();

        columns.sort_by_key(|(column, _)| *column);
        columns.into_iter().map(|(_, course)| course).collect()
    }

    fn matches(&self, needle: &str, prefix: &str) -> bool {
        let contains = |value: &str| value.to_lowercase().contains(needle);

        [&self.family_name, &self.first_names, &self.school_name]
            .into_iter()
            .flatten()
            .any(|value| contains(value))
            || self
                .fields
                .iter()
                .filter(|(key, _)| key.starts_with(prefix))
                .filter_map(|(_, value)| value.as_str())
                .any(contains)
    }
}

fn course_column(suffix: &str) -> u32 {
    let suffix = suffix.trim();
    if suffix.is_empty() {
        1
    } else {
        suffix.parse().unwrap_or(u32::MAX)
    }
}

#[derive(Deserialize)]
struct RosterData {
    students: Vec<StudentRecord>,
}

/// The loaded dataset.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    students: Vec<StudentRecord>,
    course_prefix: String,
}

impl Roster {
    pub fn new(students: Vec<StudentRecord>, config: &RosterConfig) -> Self {
        Self {
            students,
            course_prefix: config.course_prefix.clone(),
        }
    }

    /// Parse a `{"students": [...]}` document.
    pub fn from_json(json: &str, config: &RosterConfig) -> Result<Self> {
        let data: RosterData = serde_json::from_str(json)?;
        debug!(students = data.students.len(), "Roster loaded");
        Ok(Self::new(data.students, config))
    }

    /// Read and parse a roster file.
    pub fn from_path(path: &Path, config: &RosterConfig) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json, config)
            .map_err(|e| CoreError::parse(path, e.to_string()))
    }

    pub fn students(&self) -> &[StudentRecord] {
        &self.students
    }

    pub fn course_prefix(&self) -> &str {
        &self.course_prefix
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Records matching `term`, in dataset order.
    ///
    /// A blank term returns every record. Otherwise the term is lowercased
    /// as typed, surrounding whitespace included.
    pub fn filter(&self, term: &str) -> Vec<&StudentRecord> {
        if term.trim().is_empty() {
            return self.students.iter().collect();
        }

        let needle = term.to_lowercase();
        self.students
            .iter()
            .filter(|student| student.matches(&needle, &self.course_prefix))
            .collect()
    }

    /// Counter line for `shown` visible records, e.g. `Showing 12 of 1,234 achievers`.
    pub fn summary(&self, shown: usize) -> String {
        format!(
            "Showing {} of {} achievers",
            group_thousands(shown),
            group_thousands(self.len())
        )
    }
}

fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
