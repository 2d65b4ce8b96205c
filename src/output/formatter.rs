//! Renders a diff as structural messages followed by an annotated copy of the actual table

use rustc_hash::FxHashMap;

use crate::diff::{DiffRecord, DiffResult};
use crate::error::{Error, Result};
use crate::model::Table;

/// Renders diff results as plain text.
///
/// Cell differences are drawn on a copy of the actual table. Columns with any
/// difference get an `X` header prefix; rows with a mismatch are marked `X` and
/// followed by an `i` row holding the expected values under `^`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffFormatter;

impl DiffFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Format a non-empty diff against the actual table it was computed from
    pub fn format(&self, diff: &DiffResult, actual: &Table) -> Result<String> {
        if diff.is_empty() {
            return Err(Error::EmptyDiff);
        }

        let has_values = diff.has_value_differences();
        let structural: Vec<&str> = diff.structural_messages().collect();

        let mut output = if structural.is_empty() {
            String::new()
        } else {
            format_structure(&structural, has_values)
        };

        if has_values {
            if !output.is_empty() {
                output.push_str("\n\nCell differences:\n-----------------\n");
            }
            output.push_str(&format_values(diff, actual)?);
        }

        Ok(output)
    }
}

fn format_structure(messages: &[&str], has_values: bool) -> String {
    if messages.len() == 1 && !has_values {
        return format!("Structural difference: {}", messages[0]);
    }

    let mut lines = vec![
        "Structural differences:".to_string(),
        "-----------------------".to_string(),
    ];
    for message in messages {
        lines.push(format!(" - {}", message.replace('\n', "\n   ")));
    }

    lines.join("\n")
}

fn format_values(diff: &DiffResult, actual: &Table) -> Result<String> {
    // (column, row number) -> expected value
    let mut mismatches: FxHashMap<(&str, usize), &str> = FxHashMap::default();
    for record in diff.value_differences() {
        if let DiffRecord::Value {
            row,
            column,
            expected,
            ..
        } = record
        {
            mismatches.insert((column.as_str(), *row), expected.as_str());
        }
    }

    let columns = actual.columns();
    let difference_columns: Vec<bool> = columns
        .iter()
        .map(|name| mismatches.keys().any(|(column, _)| *column == name.as_str()))
        .collect();

    let mut grid: Vec<Vec<String>> = Vec::with_capacity(actual.row_count() * 2 + 1);

    let mut header = vec![String::new()];
    for (name, &has_differences) in columns.iter().zip(&difference_columns) {
        header.push(if has_differences {
            format!("X {}", name)
        } else {
            name.clone()
        });
    }
    grid.push(header);

    for (index, cells) in actual.data_rows().iter().enumerate() {
        let row_number = index + 1;
        let mut actual_row = vec![String::new()];
        let mut expected_row = vec!["i".to_string()];

        for ((column, value), &has_differences) in
            columns.iter().zip(cells).zip(&difference_columns)
        {
            match mismatches.get(&(column.as_str(), row_number)) {
                Some(expected) => {
                    actual_row[0] = "X".to_string();
                    actual_row.push(format!("X {}", value));
                    expected_row.push(format!("^ {}", expected));
                }
                None if has_differences => {
                    actual_row.push(format!("  {}", value));
                    expected_row.push("  ~".to_string());
                }
                None => {
                    actual_row.push(value.clone());
                    expected_row.push("~".to_string());
                }
            }
        }

        let mismatched = actual_row[0] == "X";
        grid.push(actual_row);
        if mismatched {
            grid.push(expected_row);
        }
    }

    Ok(Table::padded(grid)?.to_string())
}
