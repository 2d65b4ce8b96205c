//! Gherkin-style pipe table parser
//!
//! Reads tables written the way they appear in feature files:
//!
//! ```text
//! | name  | qty |
//! | apple | 3   |
//! ```
//!
//! Blank lines and `#` comments are skipped. Inside a cell `\|` is a literal
//! pipe, `\\` a backslash and `\n` a newline. Rows must all have the same
//! number of cells.

use log::trace;

use crate::error::{Error, Result};
use crate::model::Table;

use super::Parser;

/// Parser for `| a | b |` tables
pub struct GherkinParser;

impl Parser for GherkinParser {
    fn parse_str(&self, input: &str) -> Result<Table> {
        let mut rows = Vec::new();

        for (index, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            rows.push(parse_row(line, index + 1)?);
        }

        trace!("parsed {} pipe table row(s)", rows.len());
        Table::new(rows)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "table" | "feature")
    }
}

fn parse_row(line: &str, line_number: usize) -> Result<Vec<String>> {
    let body = line.strip_prefix('|').ok_or_else(|| {
        Error::parse(format!(
            "Expected a table row starting with '|' on line {}",
            line_number
        ))
    })?;

    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut closed = false;
    let mut chars = body.chars();

    while let Some(ch) = chars.next() {
        closed = false;
        match ch {
            '\\' => match chars.next() {
                Some('|') => cell.push('|'),
                Some('\\') => cell.push('\\'),
                Some('n') => cell.push('\n'),
                Some(other) => {
                    cell.push('\\');
                    cell.push(other);
                }
                None => cell.push('\\'),
            },
            '|' => {
                cells.push(cell.trim().to_string());
                cell.clear();
                closed = true;
            }
            _ => cell.push(ch),
        }
    }

    if !closed {
        return Err(Error::parse(format!(
            "Expected a table row ending with '|' on line {}",
            line_number
        )));
    }

    Ok(cells)
}
