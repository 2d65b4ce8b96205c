//! tableassert - Compare expected and actual tables
//!
//! Builds [`Table`]s from CSV, HTML or Gherkin-style pipe tables, works out the
//! structural and cell differences between an expected and an actual table,
//! and renders them as a readable grid for test failure messages.
//!
//! ```no_run
//! use tableassert::parser::{CsvParser, Parser};
//! use tableassert::AssertTable;
//!
//! let expected = CsvParser.parse_str("name,qty\napple,3")?;
//! let actual = CsvParser.parse_str("qty,name\n3,apple")?;
//! AssertTable::new().assert_equal(&expected, &actual, None)?;
//! # Ok::<(), tableassert::Error>(())
//! ```

pub mod assert;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;

pub use assert::{AssertTable, TableAssertionFailure};
pub use config::DiffOptions;
pub use diff::{compute_diff, DiffRecord, DiffResult, TableDiffer};
pub use error::{Error, Result};
pub use model::{Table, EMPTY_CELL};
pub use output::DiffFormatter;
