//! JSON output format

use serde::Serialize;
use termcolor::WriteColor;

use crate::assert::TableAssertionFailure;
use crate::diff::DiffRecord;
use crate::error::Result;

use super::OutputFormatter;

/// Pretty-printed JSON output formatter
#[derive(Debug, Default)]
pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Serialize)]
struct JsonFailure<'a> {
    message: &'a str,
    differences: &'a [DiffRecord],
    diff: &'a str,
}

impl OutputFormatter for JsonOutput {
    fn render(&self, failure: &TableAssertionFailure, writer: &mut dyn WriteColor) -> Result<()> {
        let output = JsonFailure {
            message: failure.message(),
            differences: &failure.diff().differences,
            diff: failure.diff_string(),
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)?;

        Ok(())
    }
}
