//! Error types for repeaterview.
//!
//! Loading is the only operation that fails in practice; rendering is total.
//! The loader converts these errors into "no data" at its boundary, so most of
//! them surface only through the CLI and configuration paths.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for repeaterview operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Data Errors ===
    /// The repeater document could not be read.
    #[error("failed to read repeater data from {path}: {source}")]
    DataRead {
        /// Where the document was expected.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The repeater document is not valid JSON of the expected shape.
    #[error("failed to parse repeater data: {0}")]
    DataParse(#[from] serde_json::Error),

    // === Page Errors ===
    /// A page name that no renderer knows about.
    #[error("unknown page '{name}' (expected 'index' or 'repeaters')")]
    UnknownPage {
        /// The name as given.
        name: String,
    },
}

/// A specialized Result type for repeaterview operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a data read error for the given path.
    #[must_use]
    pub fn data_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DataRead {
            path: path.into(),
            source,
        }
    }

    /// Create an unknown page error.
    #[must_use]
    pub fn unknown_page(name: impl Into<String>) -> Self {
        Self::UnknownPage { name: name.into() }
    }
}
