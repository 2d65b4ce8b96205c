//! Diff engine for comparing tables

pub mod cell_diff;
mod row_diff;
mod schema_diff;

use std::fmt;

use indexmap::IndexMap;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::DiffOptions;
use crate::error::Result;
use crate::model::Table;

pub use cell_diff::{exact_match, BuiltinComparator, CellComparator};
pub use row_diff::{RowMatcher, RowPair};
pub use schema_diff::ColumnDiff;

/// A single difference between the expected and actual tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DiffRecord {
    /// Column set, column sequence or row count mismatch
    Structural { message: String },
    /// A cell whose actual value does not satisfy the expected one
    Value {
        /// 1-based data row number
        row: usize,
        #[serde(rename = "col")]
        column: String,
        #[serde(rename = "expect")]
        expected: String,
        actual: String,
    },
}

impl DiffRecord {
    pub fn structural(message: impl Into<String>) -> Self {
        DiffRecord::Structural {
            message: message.into(),
        }
    }

    pub fn value(
        row: usize,
        column: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        DiffRecord::Value {
            row,
            column: column.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn is_structural(&self) -> bool {
        matches!(self, DiffRecord::Structural { .. })
    }
}

impl fmt::Display for DiffRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffRecord::Structural { message } => write!(f, "{}", message),
            DiffRecord::Value {
                row,
                column,
                expected,
                actual,
            } => write!(
                f,
                "Row #{} column '{}': expected '{}', got '{}'",
                row, column, expected, actual
            ),
        }
    }
}

/// Ordered differences found by one comparison
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiffResult {
    pub differences: Vec<DiffRecord>,
}

impl DiffResult {
    /// Create a new empty diff result
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no difference was found
    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    pub fn len(&self) -> usize {
        self.differences.len()
    }

    /// Messages of structural differences, in order
    pub fn structural_messages(&self) -> impl Iterator<Item = &str> {
        self.differences.iter().filter_map(|d| match d {
            DiffRecord::Structural { message } => Some(message.as_str()),
            _ => None,
        })
    }

    /// Value differences, in order
    pub fn value_differences(&self) -> impl Iterator<Item = &DiffRecord> {
        self.differences.iter().filter(|d| !d.is_structural())
    }

    pub fn has_value_differences(&self) -> bool {
        self.value_differences().next().is_some()
    }
}

impl From<Vec<DiffRecord>> for DiffResult {
    fn from(differences: Vec<DiffRecord>) -> Self {
        Self { differences }
    }
}

impl<'a> IntoIterator for &'a DiffResult {
    type Item = &'a DiffRecord;
    type IntoIter = std::slice::Iter<'a, DiffRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.differences.iter()
    }
}

/// Compares an expected table against an actual one. Holds no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableDiffer;

impl TableDiffer {
    pub fn new() -> Self {
        Self
    }

    /// Compare two tables.
    ///
    /// Options are validated before any cell is read. Column structure is compared
    /// next, and when it disagrees no cell values are compared at all.
    pub fn diff(&self, expected: &Table, actual: &Table, options: &DiffOptions) -> Result<DiffResult> {
        options.validate(expected.columns())?;

        let structure = ColumnDiff::compare(expected.columns(), actual.columns(), options);
        if !structure.is_empty() {
            debug!(
                "column structure differs ({} difference(s)), skipping value comparison",
                structure.len()
            );
            return Ok(DiffResult::from(structure));
        }

        let mut result = DiffResult::new();
        let expected_hash = expected.hash();
        let actual_hash = actual.hash();

        for pair in RowMatcher::match_rows(expected.data_rows(), actual.data_rows()) {
            let row_number = pair.row_number();
            match pair {
                RowPair::Both { index, .. } => {
                    trace!("comparing row #{}", row_number);
                    self.compare_row_cells(
                        row_number,
                        &expected_hash[index],
                        &actual_hash[index],
                        options,
                        &mut result.differences,
                    );
                }
                RowPair::Missing {
                    expected: expected_row,
                    ..
                } => {
                    result.differences.push(DiffRecord::structural(format!(
                        "Missing row #{} (expected: {})",
                        row_number,
                        expected_row.join(", ")
                    )));
                }
                RowPair::Additional {
                    actual: actual_row,
                    ..
                } => {
                    result.differences.push(DiffRecord::structural(format!(
                        "Additional row #{} (got: {})",
                        row_number,
                        actual_row.join(", ")
                    )));
                }
            }
        }

        debug!(
            "compared {} expected row(s) against {}: {} difference(s)",
            expected.row_count(),
            actual.row_count(),
            result.len()
        );

        Ok(result)
    }

    /// Compare every expected column of a row by name, in expected column order.
    /// A repeated header name maps to the last cell carrying it in both rows.
    fn compare_row_cells(
        &self,
        row_number: usize,
        expected_row: &IndexMap<&str, &str>,
        actual_row: &IndexMap<&str, &str>,
        options: &DiffOptions,
        differences: &mut Vec<DiffRecord>,
    ) {
        for (&column, &expected_value) in expected_row {
            let Some(&actual_value) = actual_row.get(column) else {
                continue;
            };

            let equivalent = match options.comparator(column) {
                Some(comparator) => comparator.equal(expected_value, actual_value),
                None => exact_match(expected_value, actual_value),
            };

            if !equivalent {
                differences.push(DiffRecord::value(
                    row_number,
                    column,
                    expected_value,
                    actual_value,
                ));
            }
        }
    }
}

/// Convenience function to compute diff
pub fn compute_diff(expected: &Table, actual: &Table, options: &DiffOptions) -> Result<DiffResult> {
    TableDiffer::new().diff(expected, actual, options)
}
