//! Line-oriented CoNLL-U reader.
//!
//! Splits the input into sentence blocks (blank-line separated), collects the
//! `# key = value` comments of each block, and reads the ten-column token lines.
//! Nothing here computes offsets.

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::errors::{ConlluError, ConlluResult};
use crate::token::{RawToken, TokenId};
use once_cell::sync::Lazy;
use regex::Regex;

/// Number of columns on a token line.
pub const FIELD_COUNT: usize = 10;

static COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#\s*(?P<key>[^=]*?)\s*(?:=\s*(?P<value>.*?))?\s*$")
        .expect("Invalid comment regex")
});

// Fallback separator for hand-aligned files without tabs.
static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").expect("Invalid space regex"));

/// One blank-line separated block: its comments and token lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentenceRecord {
    /// 1-based line where the block starts.
    pub line: usize,
    /// Comment pairs in file order. Bare comments (`# newpar`) have no value.
    pub metadata: Vec<(String, Option<String>)>,
    pub tokens: Vec<RawToken>,
}

impl SentenceRecord {
    /// First value recorded for `key`.
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    /// The `# text = ...` metadata, if any.
    pub fn text(&self) -> Option<&str> {
        self.metadata_value("text")
    }

    pub fn token(&self, id: TokenId) -> Option<&RawToken> {
        self.tokens.iter().find(|token| token.id == id)
    }

    fn is_blank(&self) -> bool {
        self.metadata.is_empty() && self.tokens.is_empty()
    }
}

/// Split a token line into its columns.
///
/// Tabs are the separator; a line that does not yield ten tab fields is retried
/// with runs of two or more spaces.
pub fn split_fields(line: &str) -> Vec<&str> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() == FIELD_COUNT {
        return fields;
    }
    SPACE_RUN.split(line.trim()).collect()
}

/// Parse a comment line into `(key, value)`. Returns `None` for an empty key.
pub fn parse_comment(line: &str) -> Option<(String, Option<String>)> {
    let caps = COMMENT.captures(line)?;
    let key = caps.name("key")?.as_str();
    if key.is_empty() {
        return None;
    }
    let value = caps.name("value").map(|v| v.as_str().to_string());
    Some((key.to_string(), value))
}

/// Read all sentence blocks of a file.
///
/// Lines with a malformed id are reported and dropped. A token line with the
/// wrong number of columns makes the whole input unreadable.
pub fn parse_records(
    input: &str,
    diagnostics: &mut Diagnostics,
) -> ConlluResult<Vec<SentenceRecord>> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut records = Vec::new();
    let mut current = SentenceRecord::default();

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim_end_matches('\r');

        if line.trim().is_empty() {
            flush(&mut current, &mut records);
            continue;
        }

        if current.is_blank() {
            current.line = line_no;
        }

        if line.starts_with('#') {
            if let Some(pair) = parse_comment(line) {
                current.metadata.push(pair);
            }
            continue;
        }

        let fields = split_fields(line);
        if fields.len() != FIELD_COUNT {
            return Err(ConlluError::Parse {
                line: line_no,
                message: format!(
                    "expected {} columns, found {}",
                    FIELD_COUNT,
                    fields.len()
                ),
            });
        }

        let Some(id) = TokenId::parse(fields[0].trim()) else {
            diagnostics.report(DiagnosticKind::MalformedId, line_no, fields[0], fields[1]);
            continue;
        };

        current.tokens.push(raw_token(id, &fields, line_no));
    }
    flush(&mut current, &mut records);
    if !current.metadata.is_empty() {
        log::debug!("dropping trailing comments from line {}", current.line);
    }

    Ok(records)
}

/// Build a token from ten already split columns.
pub(crate) fn raw_token(id: TokenId, fields: &[&str], line: usize) -> RawToken {
    RawToken {
        id,
        form: fields[1].to_string(),
        lemma: fields[2].to_string(),
        upos: fields[3].to_string(),
        xpos: fields[4].to_string(),
        feats: fields[5].to_string(),
        head: fields[6].to_string(),
        deprel: fields[7].to_string(),
        deps: fields[8].to_string(),
        misc: fields[9].to_string(),
        line,
    }
}

// A block without tokens keeps its comments for the next sentence.
fn flush(current: &mut SentenceRecord, records: &mut Vec<SentenceRecord>) {
    if !current.tokens.is_empty() {
        records.push(std::mem::take(current));
    }
}
