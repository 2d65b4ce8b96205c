//! Output formatting for table assertion failures

mod formatter;
mod json;
mod terminal;
mod text;

use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::assert::TableAssertionFailure;
use crate::config::OutputFormat;
use crate::error::Result;

pub use formatter::DiffFormatter;
pub use json::JsonOutput;
pub use terminal::TerminalOutput;
pub use text::TextOutput;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render an assertion failure to a writer
    fn render(&self, failure: &TableAssertionFailure, writer: &mut dyn WriteColor) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: OutputFormat) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Text => Box::new(TextOutput::new()),
            OutputFormat::Terminal => Box::new(TerminalOutput::new()),
            OutputFormat::Json => Box::new(JsonOutput::new()),
        }
    }
}

/// Render an assertion failure to stdout
pub fn render_to_stdout(
    failure: &TableAssertionFailure,
    format: OutputFormat,
    color_choice: ColorChoice,
) -> Result<()> {
    let formatter = OutputFactory::create(format);
    let mut stdout = StandardStream::stdout(color_choice);
    formatter.render(failure, &mut stdout)
}
