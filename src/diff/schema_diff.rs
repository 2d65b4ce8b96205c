//! Column structure comparison

use rustc_hash::FxHashSet;

use crate::config::DiffOptions;

use super::DiffRecord;

/// Column structure comparison engine
pub struct ColumnDiff;

impl ColumnDiff {
    /// Compare header rows. A non-empty result means cell values must not be compared.
    pub fn compare(expected: &[String], actual: &[String], options: &DiffOptions) -> Vec<DiffRecord> {
        let mut changes = Vec::new();

        let expected_set: FxHashSet<&str> = expected.iter().map(String::as_str).collect();
        let actual_set: FxHashSet<&str> = actual.iter().map(String::as_str).collect();

        let missing: Vec<&str> = expected
            .iter()
            .map(String::as_str)
            .filter(|name| !actual_set.contains(name))
            .collect();
        let extra: Vec<&str> = actual
            .iter()
            .map(String::as_str)
            .filter(|name| !expected_set.contains(name))
            .collect();

        if !missing.is_empty() || !extra.is_empty() {
            if !missing.is_empty() {
                changes.push(DiffRecord::structural(format!(
                    "Missing columns: {} (got {})",
                    quote_list(&missing),
                    quote_list(actual)
                )));
            }

            if !extra.is_empty() && !options.ignore_extra_columns {
                changes.push(DiffRecord::structural(format!(
                    "Unexpected columns: {}",
                    quote_list(&extra)
                )));
            }
        } else if expected != actual && !options.ignore_column_sequence {
            changes.push(DiffRecord::structural(format!(
                "Unexpected column sequence:\n - Expected: {}\n - Got:      {}",
                quote_list(expected),
                quote_list(actual)
            )));
        }

        changes
    }
}

/// `'a', 'b', 'c'`
fn quote_list<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(|name| format!("'{}'", name.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}
