//! Data model for tabular data representation

mod table;

pub use table::{Table, EMPTY_CELL};
