//! Table data structure: a header row plus string data rows

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{Error, Result};

/// Marker written into cells that were missing from a ragged source row
pub const EMPTY_CELL: &str = "{empty}";

/// A rectangular grid of string cells. Row 0 is the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table, requiring every row to have the same number of cells
    pub fn new<R, C>(rows: impl IntoIterator<Item = R>) -> Result<Self>
    where
        R: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let rows = collect_rows(rows);
        let width = max_width(&rows)?;

        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(Error::construction(format!(
                "Table row #{} is expected to have {} columns, got {}",
                index, width, row.len()
            )));
        }

        Ok(Self { rows })
    }

    /// Build a table from ragged rows, filling short rows with [`EMPTY_CELL`]
    pub fn padded<R, C>(rows: impl IntoIterator<Item = R>) -> Result<Self>
    where
        R: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let mut rows = collect_rows(rows);
        let width = max_width(&rows)?;

        for row in &mut rows {
            if row.len() < width {
                row.resize(width, EMPTY_CELL.to_string());
            }
        }

        Ok(Self { rows })
    }

    /// All rows, header included
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Get a row by index (0 is the header)
    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Column names from the header row
    pub fn columns(&self) -> &[String] {
        &self.rows[0]
    }

    /// Data rows, header excluded
    pub fn data_rows(&self) -> &[Vec<String>] {
        &self.rows[1..]
    }

    /// Data rows as ordered column name to value mappings
    pub fn hash(&self) -> Vec<IndexMap<&str, &str>> {
        let columns = self.columns();
        self.data_rows()
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(String::as_str)
                    .zip(row.iter().map(String::as_str))
                    .collect()
            })
            .collect()
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns().iter().position(|c| c == name)
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len() - 1
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.rows[0].len()
    }
}

fn collect_rows<R, C>(rows: impl IntoIterator<Item = R>) -> Vec<Vec<String>>
where
    R: IntoIterator<Item = C>,
    C: Into<String>,
{
    rows.into_iter()
        .map(|row| row.into_iter().map(Into::into).collect())
        .collect()
}

fn max_width(rows: &[Vec<String>]) -> Result<usize> {
    if rows.is_empty() {
        return Err(Error::construction("Table contained no rows"));
    }

    match rows.iter().map(Vec::len).max() {
        Some(width) if width > 0 => Ok(width),
        _ => Err(Error::construction("All table rows were empty")),
    }
}

/// Renders as `| a | b |` lines, each cell padded to its column's widest value
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths = vec![0; self.column_count()];
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        for (row_index, row) in self.rows.iter().enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            write!(f, "|")?;
            for (cell, width) in row.iter().zip(&widths) {
                write!(f, " {:<width$} |", cell, width = *width)?;
            }
        }

        Ok(())
    }
}
