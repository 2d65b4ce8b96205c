//! Diff options and output configuration

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::diff::{BuiltinComparator, CellComparator};
use crate::error::{Error, Result};

/// Output format for rendered diffs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Terminal,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Option keys accepted by [`DiffOptions::from_json`]
pub const KNOWN_OPTIONS: [&str; 3] = ["comparators", "ignoreColumnSequence", "ignoreExtraColumns"];

/// Rules for comparing an expected table against an actual one
#[derive(Clone, Default)]
pub struct DiffOptions {
    /// Per-column comparators; columns without one use exact string equality
    pub comparators: IndexMap<String, Arc<dyn CellComparator>>,
    /// Accept the expected columns in any order
    pub ignore_column_sequence: bool,
    /// Accept columns in the actual table that the expected table lacks
    pub ignore_extra_columns: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawOptions {
    #[serde(default)]
    comparators: IndexMap<String, serde_json::Value>,
    #[serde(default)]
    ignore_column_sequence: bool,
    #[serde(default)]
    ignore_extra_columns: bool,
}

impl DiffOptions {
    /// Exact comparison: same columns, same sequence, nothing extra
    pub fn new() -> Self {
        Self::default()
    }

    /// Same columns in any order
    pub fn equal() -> Self {
        Self::new().with_ignore_column_sequence(true)
    }

    /// Expected columns present in any order, extra actual columns ignored
    pub fn contains_columns() -> Self {
        Self::new()
            .with_ignore_column_sequence(true)
            .with_ignore_extra_columns(true)
    }

    /// Register a comparator for a column of the expected table
    pub fn with_comparator<C>(mut self, column: impl Into<String>, comparator: C) -> Self
    where
        C: CellComparator + 'static,
    {
        self.comparators.insert(column.into(), Arc::new(comparator));
        self
    }

    pub fn with_ignore_column_sequence(mut self, ignore: bool) -> Self {
        self.ignore_column_sequence = ignore;
        self
    }

    pub fn with_ignore_extra_columns(mut self, ignore: bool) -> Self {
        self.ignore_extra_columns = ignore;
        self
    }

    /// Comparator registered for a column, if any
    pub fn comparator(&self, column: &str) -> Option<&dyn CellComparator> {
        self.comparators.get(column).map(|c| c.as_ref())
    }

    /// Check that every comparator targets a column of the expected table
    pub fn validate(&self, expected_columns: &[String]) -> Result<()> {
        for column in self.comparators.keys() {
            if !expected_columns.contains(column) {
                return Err(Error::config(format!(
                    "Cannot register custom comparator for unexpected column {}",
                    column
                )));
            }
        }
        Ok(())
    }

    /// Build options from a keyed JSON object such as
    /// `{"ignoreColumnSequence": true, "comparators": {"Price": {"numeric-tolerance": 0.01}}}`
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::config("Diff options must be a JSON object"))?;

        let unknown: Vec<&str> = object
            .keys()
            .map(String::as_str)
            .filter(|key| !KNOWN_OPTIONS.contains(key))
            .collect();
        if !unknown.is_empty() {
            return Err(Error::config(format!(
                "Unexpected options: {}",
                unknown.join(", ")
            )));
        }

        let raw: RawOptions =
            serde_json::from_value(value.clone()).map_err(|e| Error::config(e.to_string()))?;

        let mut options = Self::new()
            .with_ignore_column_sequence(raw.ignore_column_sequence)
            .with_ignore_extra_columns(raw.ignore_extra_columns);

        for (column, spec) in raw.comparators {
            let comparator: BuiltinComparator = serde_json::from_value(spec).map_err(|_| {
                Error::config(format!(
                    "Custom comparator for column {} was not callable",
                    column
                ))
            })?;
            options = options.with_comparator(column, comparator);
        }

        Ok(options)
    }

    /// Parse keyed options from a JSON string
    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(s)?;
        Self::from_json(&value)
    }
}

impl fmt::Debug for DiffOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiffOptions")
            .field("comparators", &self.comparators.keys().collect::<Vec<_>>())
            .field("ignore_column_sequence", &self.ignore_column_sequence)
            .field("ignore_extra_columns", &self.ignore_extra_columns)
            .finish()
    }
}
