//! Error types for table comparison and parsing

use thiserror::Error;

use crate::assert::TableAssertionFailure;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Invalid diff options, raised before any table content is compared
    #[error("Invalid diff options: {message}")]
    Config { message: String },

    /// A table could not be built from the given rows
    #[error("Invalid table: {message}")]
    Construction { message: String },

    #[error("Cannot format an empty diff")]
    EmptyDiff,

    /// A CSV, HTML or pipe-table source was rejected
    #[error("{message}")]
    Parse { message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Assertion(#[from] TableAssertionFailure),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn construction(msg: impl Into<String>) -> Self {
        Self::Construction {
            message: msg.into(),
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }
}
