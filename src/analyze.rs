//! Schema prediction without building spans.
//!
//! Scans comments and token columns to guess which element and
//! `element:attribute` names a full parse would produce.

use crate::position::ElementKind;
use crate::record::{parse_comment, raw_token, split_fields, FIELD_COUNT};
use crate::stack::{marker_attribute, NEW_DOCUMENT, NEW_PARAGRAPH, SENTENCE_ATTR_PREFIX};
use crate::token::{attr, TokenId};
use std::collections::BTreeSet;

fn qualified(kind: ElementKind, attribute: &str) -> String {
    format!("{}:{}", kind.name(), attribute)
}

/// Predict the name vocabulary of a CoNLL-U file.
pub fn analyze_str(input: &str) -> BTreeSet<String> {
    let mut names: BTreeSet<String> = [
        ElementKind::Text.name().to_string(),
        ElementKind::Document.name().to_string(),
        ElementKind::Sentence.name().to_string(),
        ElementKind::Token.name().to_string(),
        qualified(ElementKind::Token, attr::ID),
    ]
    .into_iter()
    .collect();

    // Comment names count once a token line shows they reach a sentence.
    let mut pending = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with('#') {
            let Some((key, _)) = parse_comment(line) else {
                continue;
            };
            if let Some(attribute) = marker_attribute(&key, NEW_DOCUMENT) {
                if let Some(attribute) = attribute {
                    pending.push(qualified(ElementKind::Document, attribute));
                }
            } else if let Some(attribute) = marker_attribute(&key, NEW_PARAGRAPH) {
                pending.push(ElementKind::Paragraph.name().to_string());
                if let Some(attribute) = attribute {
                    pending.push(qualified(ElementKind::Paragraph, attribute));
                }
            } else if key.starts_with(SENTENCE_ATTR_PREFIX) {
                pending.push(qualified(ElementKind::Sentence, &key));
            }
            continue;
        }

        let fields = split_fields(line);
        if fields.len() != FIELD_COUNT {
            continue;
        }
        let Some(id) = TokenId::parse(fields[0].trim()) else {
            continue;
        };
        names.extend(pending.drain(..));
        if !id.is_plain() {
            continue;
        }
        let token = raw_token(id, &fields, idx + 1);
        for attribute in token.attributes().keys() {
            names.insert(qualified(ElementKind::Token, attribute));
        }
        if token.starts_paragraph() {
            names.insert(ElementKind::SentenceParagraph.name().to_string());
        }
    }

    names
}
