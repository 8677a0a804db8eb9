//! File-at-a-time import driver.

use crate::config::ImportConfig;
use crate::errors::{ImportError, ImportResult};
use crate::sink::AnnotationSink;
use crate::source::SourceDir;
use layered_conllu::{
    analyze_str, parse_str, AnnotationLayer, Diagnostic, ElementKind, ParseOptions,
};
use std::collections::BTreeSet;

/// Outcome of importing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub file: String,
    /// Length of the imported text in chars.
    pub chars: usize,
    /// Number of sentence instances written.
    pub sentences: usize,
    /// Token lines that were skipped.
    pub diagnostics: Vec<Diagnostic>,
}

/// Outcome of importing a whole source directory.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub imported: Vec<ImportReport>,
    /// Files that produced no output, with the reason.
    pub failed: Vec<(String, ImportError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Imports CoNLL-U files from a [`SourceDir`] into an [`AnnotationSink`].
#[derive(Debug, Clone)]
pub struct Importer {
    source: SourceDir,
    options: ParseOptions,
}

impl Importer {
    pub fn new(source: SourceDir, options: ParseOptions) -> Self {
        Self { source, options }
    }

    pub fn from_config(config: &ImportConfig) -> Self {
        Self::new(
            SourceDir::new(&config.source_dir, &config.extension),
            config.parse.clone(),
        )
    }

    pub fn source(&self) -> &SourceDir {
        &self.source
    }

    /// Build the layer for `name` without writing anything.
    pub fn parse_file(&self, name: &str) -> ImportResult<AnnotationLayer> {
        let content = self.source.read(name)?;
        parse_str(name, &content, &self.options).map_err(|source| ImportError::Parse {
            file: name.to_string(),
            source,
        })
    }

    /// Parse `name` and write its text, tables and structure to `sink`.
    ///
    /// Nothing is written unless the file parses completely.
    pub fn import_file<S: AnnotationSink>(
        &self,
        name: &str,
        sink: &mut S,
    ) -> ImportResult<ImportReport> {
        let layer = self.parse_file(name)?;
        log::debug!("writing text from file={}", name);

        let sink_error = |message: String| ImportError::Sink {
            file: name.to_string(),
            message,
        };
        sink.write_text(name, &layer.text).map_err(sink_error)?;
        for table in &layer.tables {
            sink.write_element(name, table).map_err(sink_error)?;
        }
        sink.write_structure(name, &layer.structure)
            .map_err(sink_error)?;

        let sentences = layer
            .table(ElementKind::Sentence)
            .map_or(0, |table| table.len());
        Ok(ImportReport {
            file: name.to_string(),
            chars: layer.char_len(),
            sentences,
            diagnostics: layer.diagnostics,
        })
    }

    /// Import every file of the source directory, in name order.
    ///
    /// A failing file is recorded and skipped; the others are still imported.
    pub fn import_all<S: AnnotationSink>(&self, sink: &mut S) -> ImportResult<BatchReport> {
        let mut report = BatchReport::default();

        for name in self.source.file_names()? {
            match self.import_file(&name, sink) {
                Ok(imported) => report.imported.push(imported),
                Err(e) => {
                    log::error!("{}", e);
                    report.failed.push((name, e));
                }
            }
        }

        log::info!(
            "imported {} files from {} ({} failed)",
            report.imported.len(),
            self.source.root().display(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Predict the element and attribute names `name` would produce.
    pub fn analyze_file(&self, name: &str) -> ImportResult<BTreeSet<String>> {
        let content = self.source.read(name)?;
        Ok(analyze_str(&content))
    }
}
