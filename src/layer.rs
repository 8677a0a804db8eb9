//! The annotation layer built from one CoNLL-U file.

use crate::config::ParseOptions;
use crate::diagnostics::Diagnostic;
use crate::errors::ConlluResult;
use crate::position::{ElementKind, Span};
use crate::record::parse_records;
use crate::stack::LayerBuilder;
use crate::table::ElementTable;

/// Reconstructed text plus one span table per element that occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationLayer {
    /// Name of the file the layer was built from.
    pub source: String,
    pub text: String,
    /// Tables ordered outermost element first.
    pub tables: Vec<ElementTable>,
    /// Sorted element and `element:attribute` names actually produced.
    pub structure: Vec<String>,
    /// Token lines that were skipped.
    pub diagnostics: Vec<Diagnostic>,
}

impl AnnotationLayer {
    pub fn table(&self, kind: ElementKind) -> Option<&ElementTable> {
        self.tables.iter().find(|table| table.kind == kind)
    }

    /// Length of the text in chars.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// The text covered by `span`.
    pub fn slice(&self, span: &Span) -> String {
        self.text
            .chars()
            .skip(span.start.offset)
            .take(span.char_len())
            .collect()
    }
}

/// Build the annotation layer for one file's contents.
///
/// `source` names the file in diagnostics and logs. Either the whole layer is
/// returned or an error; nothing partial escapes.
pub fn parse_str(
    source: &str,
    input: &str,
    options: &ParseOptions,
) -> ConlluResult<AnnotationLayer> {
    log::debug!("parsing source='{}'", source);
    let mut builder = LayerBuilder::new(source, options.clone());
    let records = parse_records(input, builder.diagnostics_mut())?;
    for record in &records {
        builder.push_sentence(record)?;
    }
    builder.finish()
}
