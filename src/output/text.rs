//! Plain text output

use termcolor::WriteColor;

use crate::assert::TableAssertionFailure;
use crate::error::Result;

use super::OutputFormatter;

/// Writes the failure exactly as it displays: message, blank line, rendered diff
#[derive(Debug, Default)]
pub struct TextOutput;

impl TextOutput {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for TextOutput {
    fn render(&self, failure: &TableAssertionFailure, writer: &mut dyn WriteColor) -> Result<()> {
        writeln!(writer, "{}", failure)?;
        Ok(())
    }
}
