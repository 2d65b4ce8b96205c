//! CSV parser

use std::io::Read;

use log::trace;

use crate::error::{Error, Result};
use crate::model::Table;

use super::Parser;

/// Parser for CSV sources.
///
/// Every line is a row, including blank lines, which become rows of
/// `{empty}` cells. Short rows are padded to the widest row.
pub struct CsvParser;

impl CsvParser {
    /// Read a whole stream and parse it
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> Result<Table> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        self.parse_str(&input)
    }

    fn parse_line(line: &str) -> Result<Vec<Vec<String>>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(line.as_bytes());

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(rows)
    }
}

impl Parser for CsvParser {
    fn parse_str(&self, input: &str) -> Result<Table> {
        let mut rows: Vec<Vec<String>> = Vec::new();

        for line in split_lines(input) {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() {
                rows.push(Vec::new());
            } else {
                rows.extend(Self::parse_line(line)?);
            }
        }

        if rows.iter().all(Vec::is_empty) {
            return Err(Error::parse("The provided CSV was empty"));
        }

        trace!("parsed {} CSV row(s)", rows.len());
        Table::padded(rows)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "csv" | "txt")
    }
}

/// Split on newlines that are not inside a quoted field.
/// A quote only opens a field at the start of that field; elsewhere it is a
/// literal character. A trailing newline does not start another line.
fn split_lines(input: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut in_quotes = false;
    let mut field_start = true;
    let mut start = 0;
    let mut bytes = input.bytes().enumerate().peekable();

    while let Some((i, byte)) = bytes.next() {
        if in_quotes {
            if byte == b'"' {
                // "" is an escaped quote inside a quoted field
                if bytes.peek().map(|&(_, next)| next) == Some(b'"') {
                    bytes.next();
                } else {
                    in_quotes = false;
                }
            }
            continue;
        }

        match byte {
            b'"' if field_start => {
                in_quotes = true;
                field_start = false;
            }
            b',' => field_start = true,
            b'\n' => {
                lines.push(&input[start..i]);
                start = i + 1;
                field_start = true;
            }
            _ => field_start = false,
        }
    }

    if start < input.len() {
        lines.push(&input[start..]);
    }

    lines
}
