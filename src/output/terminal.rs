//! Colored terminal output

use termcolor::{Color, ColorSpec, WriteColor};

use crate::assert::TableAssertionFailure;
use crate::error::Result;

use super::OutputFormatter;

/// Terminal output with colors: mismatched rows in red, expected values in green
#[derive(Debug)]
pub struct TerminalOutput {
    mismatch: ColorSpec,
    expected: ColorSpec,
    heading: ColorSpec,
}

impl TerminalOutput {
    pub fn new() -> Self {
        let mut mismatch = ColorSpec::new();
        mismatch.set_fg(Some(Color::Red)).set_bold(true);
        let mut expected = ColorSpec::new();
        expected.set_fg(Some(Color::Green));
        let mut heading = ColorSpec::new();
        heading.set_fg(Some(Color::Yellow)).set_bold(true);

        Self {
            mismatch,
            expected,
            heading,
        }
    }

    fn line_color(&self, line: &str) -> Option<&ColorSpec> {
        if line.starts_with("| X ") {
            Some(&self.mismatch)
        } else if line.starts_with("| i ") {
            Some(&self.expected)
        } else if line.starts_with("Structural difference") || line.starts_with("Cell differences") {
            Some(&self.heading)
        } else {
            None
        }
    }

    fn write_line(&self, line: &str, writer: &mut dyn WriteColor) -> Result<()> {
        match self.line_color(line) {
            Some(spec) => {
                writer.set_color(spec)?;
                write!(writer, "{}", line)?;
                writer.reset()?;
                writeln!(writer)?;
            }
            None => writeln!(writer, "{}", line)?,
        }
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(&self, failure: &TableAssertionFailure, writer: &mut dyn WriteColor) -> Result<()> {
        writer.set_color(ColorSpec::new().set_bold(true))?;
        write!(writer, "{}", failure.message())?;
        writer.reset()?;
        writeln!(writer)?;
        writeln!(writer)?;

        for line in failure.diff_string().lines() {
            self.write_line(line, writer)?;
        }

        Ok(())
    }
}
