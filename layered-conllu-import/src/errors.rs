//! Error types for importing source directories.

use layered_conllu::ConlluError;
use thiserror::Error;

/// Errors that can occur while importing one file or loading configuration.
#[derive(Debug, Error)]
pub enum ImportError {
    /// A source file or directory could not be read.
    #[error("failed to load {path}: {message}")]
    Load { path: String, message: String },

    /// The file was read but no layer could be built from it.
    #[error("{file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: ConlluError,
    },

    /// The import configuration is unreadable or invalid.
    #[error("invalid import config {path}: {message}")]
    Config { path: String, message: String },

    /// The host refused the output.
    #[error("sink rejected {file}: {message}")]
    Sink { file: String, message: String },
}

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;
