//! Table assertions for test suites

use std::fmt;

use log::debug;

use crate::config::DiffOptions;
use crate::diff::{DiffResult, TableDiffer};
use crate::error::{Error, Result};
use crate::model::Table;
use crate::output::DiffFormatter;

const SAME_PREFIX: &str = "Failed asserting that two tables were identical: ";
const EQUAL_PREFIX: &str = "Failed asserting that two tables were equivalent: ";
const CONTAINS_PREFIX: &str = "Failed asserting that a table contained expected data: ";
const COMPARABLE_PREFIX: &str = "Failed comparing two tables: ";

/// Raised when two tables differ. Carries the raw differences and their rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableAssertionFailure {
    message: String,
    diff: DiffResult,
    diff_string: String,
}

impl TableAssertionFailure {
    pub fn new(message: impl Into<String>, diff: DiffResult, diff_string: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            diff,
            diff_string: diff_string.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn diff(&self) -> &DiffResult {
        &self.diff
    }

    pub fn diff_string(&self) -> &str {
        &self.diff_string
    }
}

impl fmt::Display for TableAssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n{}", self.message, self.diff_string)
    }
}

impl std::error::Error for TableAssertionFailure {}

/// Assertions on a pair of tables. Each returns `Ok(())` when the tables match
/// and [`Error::Assertion`] when they do not.
#[derive(Debug, Clone, Default)]
pub struct AssertTable {
    differ: TableDiffer,
    formatter: DiffFormatter,
}

impl AssertTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same columns in the same sequence with the same values
    pub fn assert_same(&self, expected: &Table, actual: &Table, message: Option<&str>) -> Result<()> {
        self.check(SAME_PREFIX, &DiffOptions::new(), expected, actual, message)
    }

    /// Same columns in any sequence with the same values
    pub fn assert_equal(&self, expected: &Table, actual: &Table, message: Option<&str>) -> Result<()> {
        self.check(EQUAL_PREFIX, &DiffOptions::equal(), expected, actual, message)
    }

    /// The expected columns hold the expected values; extra actual columns are ignored
    pub fn assert_contains_columns(
        &self,
        expected: &Table,
        actual: &Table,
        message: Option<&str>,
    ) -> Result<()> {
        self.check(
            CONTAINS_PREFIX,
            &DiffOptions::contains_columns(),
            expected,
            actual,
            message,
        )
    }

    /// Compare with caller-supplied options, e.g. custom per-column comparators
    pub fn assert_comparable(
        &self,
        expected: &Table,
        actual: &Table,
        options: &DiffOptions,
        message: Option<&str>,
    ) -> Result<()> {
        self.check(COMPARABLE_PREFIX, options, expected, actual, message)
    }

    fn check(
        &self,
        prefix: &str,
        options: &DiffOptions,
        expected: &Table,
        actual: &Table,
        message: Option<&str>,
    ) -> Result<()> {
        let diff = self.differ.diff(expected, actual, options)?;
        if diff.is_empty() {
            return Ok(());
        }

        debug!("table assertion failed with {} difference(s)", diff.len());
        let diff_string = self.formatter.format(&diff, actual)?;
        let message = format!("{}{}", prefix, message.unwrap_or_default());

        Err(Error::Assertion(TableAssertionFailure::new(
            message,
            diff,
            diff_string,
        )))
    }
}
