//! Parser layer for reading tables from CSV, HTML and pipe-table sources

mod csv;
mod gherkin;
mod html;
mod response;

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::model::Table;

pub use self::csv::CsvParser;
pub use self::gherkin::GherkinParser;
pub use self::html::HtmlParser;
pub use self::response::{looks_like_html, parse_csv_response};

/// Trait for parsing table sources
pub trait Parser: Send + Sync {
    /// Parse source text into a Table
    fn parse_str(&self, input: &str) -> Result<Table>;

    /// Check if this parser can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;

    /// Read and parse a file
    fn parse_file(&self, path: &Path) -> Result<Table> {
        let input = fs::read_to_string(path)?;
        self.parse_str(&input)
    }
}

/// Factory for creating parsers based on file extension
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![
                Box::new(CsvParser),
                Box::new(HtmlParser),
                Box::new(GherkinParser),
            ],
        }
    }

    /// Get a parser for the given file path
    pub fn get_parser(&self, path: &Path) -> Result<&dyn Parser> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        for parser in &self.parsers {
            if parser.supports_extension(&ext) {
                return Ok(parser.as_ref());
            }
        }

        Err(Error::parse(format!(
            "Unsupported file format: {}",
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
        )))
    }

    /// Parse a file using the appropriate parser
    pub fn parse(&self, path: &Path) -> Result<Table> {
        let parser = self.get_parser(path)?;
        debug!("parsing table from {}", path.display());
        parser.parse_file(path)
    }
}
