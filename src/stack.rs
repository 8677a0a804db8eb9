//! The per-file structural stack.
//!
//! [`LayerBuilder`] consumes sentence records in file order, keeps at most one
//! open document and one open paragraph, emits sentence, in-sentence paragraph
//! and token instances as each sentence is rendered, and tracks the running
//! character offset. It is owned by the call processing one file.

use crate::config::{MismatchPolicy, ParseOptions};
use crate::diagnostics::Diagnostics;
use crate::element::{AttrBag, Element, Instance};
use crate::errors::{ConlluError, ConlluResult};
use crate::layer::AnnotationLayer;
use crate::normalize::{normalize_sentence, CanonicalToken};
use crate::position::ElementKind;
use crate::reconstruct::{reconstruct, RenderedSentence};
use crate::record::SentenceRecord;
use crate::table::ElementTable;
use std::collections::BTreeMap;

pub(crate) const NEW_DOCUMENT: &str = "newdoc";
pub(crate) const NEW_PARAGRAPH: &str = "newpar";
pub(crate) const SENTENCE_ATTR_PREFIX: &str = "sent_";

/// Structural metadata read from a sentence's comments.
#[derive(Debug, Default)]
struct SentenceMetadata<'r> {
    new_document: Option<AttrBag>,
    new_paragraph: Option<AttrBag>,
    text: Option<&'r str>,
    attrs: AttrBag,
}

impl<'r> SentenceMetadata<'r> {
    fn read(record: &'r SentenceRecord) -> Self {
        let mut meta = Self::default();
        for (key, value) in &record.metadata {
            let value_or_empty = || value.clone().unwrap_or_default();

            if let Some(rest) = marker_attribute(key, NEW_DOCUMENT) {
                let attrs = meta.new_document.get_or_insert_with(AttrBag::new);
                if let Some(name) = rest {
                    attrs.insert(name.to_string(), value_or_empty());
                }
            } else if let Some(rest) = marker_attribute(key, NEW_PARAGRAPH) {
                let attrs = meta.new_paragraph.get_or_insert_with(AttrBag::new);
                if let Some(name) = rest {
                    attrs.insert(name.to_string(), value_or_empty());
                }
            } else if key == "text" {
                if meta.text.is_none() {
                    meta.text = value.as_deref();
                }
            } else if key.starts_with(SENTENCE_ATTR_PREFIX) {
                meta.attrs.insert(key.clone(), value_or_empty());
            }
        }
        meta
    }
}

/// Match `marker` or `marker <attribute>`.
///
/// Returns `Some(None)` for the bare marker and `Some(Some(attribute))` for the
/// qualified form.
pub(crate) fn marker_attribute<'k>(key: &'k str, marker: &str) -> Option<Option<&'k str>> {
    if key == marker {
        return Some(None);
    }
    let rest = key.strip_prefix(marker)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    match rest.trim() {
        "" => Some(None),
        attribute => Some(Some(attribute)),
    }
}

/// Per-file engine state.
#[derive(Debug)]
pub struct LayerBuilder {
    options: ParseOptions,
    diagnostics: Diagnostics,
    text: String,
    /// Char offset where the next sentence starts.
    offset: usize,
    sentences: usize,
    document: Option<Instance>,
    paragraph: Option<Instance>,
    elements: BTreeMap<ElementKind, Element>,
}

impl LayerBuilder {
    pub fn new(source: impl Into<String>, options: ParseOptions) -> Self {
        Self {
            options,
            diagnostics: Diagnostics::new(source),
            text: String::new(),
            offset: 0,
            sentences: 0,
            document: None,
            paragraph: None,
            elements: BTreeMap::new(),
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    /// Char offset where the next sentence will start.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Process one sentence record.
    ///
    /// On error the builder must be discarded; the caller never sees the
    /// partially built layer.
    pub fn push_sentence(&mut self, record: &SentenceRecord) -> ConlluResult<()> {
        let meta = SentenceMetadata::read(record);
        let tokens = normalize_sentence(&record.tokens, &mut self.diagnostics);
        let rendered = self.render(record, &tokens, meta.text)?;

        // end of the previous sentence, where enclosing elements close
        let prior_end = self.offset.saturating_sub(1);

        if self.sentences == 0 || meta.new_document.is_some() {
            self.close_paragraph(prior_end);
            self.close_document(prior_end);
            self.document = Some(Instance::open(
                ElementKind::Document,
                self.offset,
                meta.new_document.unwrap_or_default(),
            ));
        }

        if let Some(attrs) = meta.new_paragraph {
            self.close_paragraph(prior_end);
            self.paragraph = Some(Instance::open(ElementKind::Paragraph, self.offset, attrs));
        }

        let sentence = Instance::open(ElementKind::Sentence, self.offset, meta.attrs);

        let mut sentence_paragraph: Option<Instance> = None;
        for (token, span) in tokens.into_iter().zip(&rendered.token_spans) {
            if token.new_paragraph {
                if let Some(open) = sentence_paragraph.take() {
                    self.emit(open.close(span.start));
                }
                sentence_paragraph = Some(Instance::open(
                    ElementKind::SentenceParagraph,
                    span.start,
                    AttrBag::new(),
                ));
            }
            self.emit(Instance::closed(
                ElementKind::Token,
                span.start,
                span.end,
                token.attrs,
            ));
        }
        if let Some(open) = sentence_paragraph {
            self.emit(open.close(rendered.end()));
        }
        self.emit(sentence.close(rendered.end()));

        if self.sentences > 0 {
            self.text.push(self.options.sentence_separator);
        }
        self.text.push_str(&rendered.text);
        self.offset = rendered.end() + 1;
        self.sentences += 1;
        Ok(())
    }

    fn render(
        &self,
        record: &SentenceRecord,
        tokens: &[CanonicalToken],
        explicit_text: Option<&str>,
    ) -> ConlluResult<RenderedSentence> {
        match reconstruct(tokens, self.offset, explicit_text) {
            Ok(rendered) => Ok(rendered),
            Err(mismatch) => match self.options.on_text_mismatch {
                MismatchPolicy::Fail => Err(ConlluError::TextMismatch {
                    line: record.line,
                    expected: mismatch.expected,
                    reconstructed: mismatch.reconstructed(),
                }),
                MismatchPolicy::Reconstruct => {
                    log::warn!(
                        "{}: sentence at line {}: text metadata has {} chars, forms give {}; using forms",
                        self.diagnostics.source(),
                        record.line,
                        mismatch.expected,
                        mismatch.reconstructed()
                    );
                    Ok(mismatch.fallback)
                }
            },
        }
    }

    fn emit(&mut self, instance: Instance) {
        let kind = instance.kind;
        self.elements
            .entry(kind)
            .or_insert_with(|| Element::new(kind))
            .push(instance);
    }

    fn close_document(&mut self, at: usize) {
        if let Some(document) = self.document.take() {
            self.emit(document.close(at));
        }
    }

    fn close_paragraph(&mut self, at: usize) {
        if let Some(paragraph) = self.paragraph.take() {
            self.emit(paragraph.close(at));
        }
    }

    /// Close everything still open and assemble the layer.
    pub fn finish(mut self) -> ConlluResult<AnnotationLayer> {
        if self.sentences == 0 {
            return Err(ConlluError::NoSentences);
        }

        let end = self.offset - 1;
        self.close_paragraph(end);
        self.close_document(end);
        self.emit(Instance::closed(ElementKind::Text, 0, end, AttrBag::new()));
        debug_assert_eq!(end, self.text.chars().count());

        let tables: Vec<ElementTable> = self.elements.values().map(ElementTable::build).collect();
        let mut structure: Vec<String> = tables.iter().flat_map(|t| t.schema_names()).collect();
        structure.sort();

        log::debug!(
            "{}: {} sentences, {} chars, {} skipped tokens",
            self.diagnostics.source(),
            self.sentences,
            end,
            self.diagnostics.len()
        );

        Ok(AnnotationLayer {
            source: self.diagnostics.source().to_string(),
            text: self.text,
            tables,
            structure,
            diagnostics: self.diagnostics.into_vec(),
        })
    }
}
