//! Error types for reading CoNLL-U and building annotation layers.
//!
//! Only file-level failures live here. Token-level anomalies are recovered
//! locally and reported through [`crate::Diagnostics`] instead.

use thiserror::Error;

/// Errors that abort processing of a whole file.
#[derive(Debug, Error)]
pub enum ConlluError {
    /// A line could not be read as a token record.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The `# text` metadata disagrees in length with the token forms.
    #[error(
        "sentence at line {line}: text metadata has {expected} chars but the forms reconstruct to {reconstructed}"
    )]
    TextMismatch {
        line: usize,
        expected: usize,
        reconstructed: usize,
    },

    /// The input holds no sentence with tokens.
    #[error("no sentences found")]
    NoSentences,
}

/// Result type for layer construction.
pub type ConlluResult<T> = Result<T, ConlluError>;
