#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Import CoNLL-U source directories into annotation layers.
//!
//! ## Modules
//!
//! - [`config`] - TOML import configuration
//! - [`source`] - Source directory listing and reading
//! - [`sink`] - The host storage interface and an in-memory implementation
//! - [`importer`] - Per-file and batch import
//! - [`errors`] - Error types for the import

pub mod config;
pub mod errors;
pub mod importer;
pub mod sink;
pub mod source;

pub use config::ImportConfig;
pub use errors::{ImportError, ImportResult};
pub use importer::{BatchReport, ImportReport, Importer};
pub use sink::{AnnotationSink, MemorySink, StoredFile};
pub use source::SourceDir;

#[cfg(test)]
mod tests;
