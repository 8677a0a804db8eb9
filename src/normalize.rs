//! Token normalization.
//!
//! Turns the raw token lines of one sentence into the canonical sequence that
//! supplies surface text: empty nodes and multiword range lines are dropped,
//! out-of-order ids are skipped, and every accepted token gets its serialized
//! attribute bag and trailing-space flag.

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::element::AttrBag;
use crate::token::{RawToken, TokenId};

/// A token that contributes surface text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalToken {
    pub id: usize,
    pub form: String,
    pub attrs: AttrBag,
    /// Whether a space follows the form in reconstructed text.
    pub space_after: bool,
    /// A new in-sentence paragraph starts at this token.
    pub new_paragraph: bool,
}

impl CanonicalToken {
    pub fn char_len(&self) -> usize {
        self.form.chars().count()
    }
}

struct OpenRange<'a> {
    first: usize,
    last: usize,
    space_after: bool,
    raw: &'a RawToken,
}

fn report(diagnostics: &mut Diagnostics, kind: DiagnosticKind, raw: &RawToken) {
    diagnostics.report(kind, raw.line, raw.id.to_string(), raw.form.as_str());
}

/// Normalize one sentence's tokens, reporting every skip.
pub fn normalize_sentence(
    tokens: &[RawToken],
    diagnostics: &mut Diagnostics,
) -> Vec<CanonicalToken> {
    let mut canonical = Vec::with_capacity(tokens.len());
    let mut last_plain = 0;
    let mut open_range: Option<OpenRange<'_>> = None;

    for raw in tokens {
        match raw.id {
            TokenId::Empty(major, _) => {
                if major != last_plain {
                    report(diagnostics, DiagnosticKind::MisplacedEmptyNode, raw);
                }
            }
            TokenId::Range(first, last) => {
                if first <= last_plain {
                    report(diagnostics, DiagnosticKind::OverlappingRange, raw);
                    continue;
                }
                if let Some(previous) = open_range.take() {
                    report(diagnostics, DiagnosticKind::UnclosedRange, previous.raw);
                }
                open_range = Some(OpenRange {
                    first,
                    last,
                    space_after: raw.space_after(),
                    raw,
                });
            }
            TokenId::Plain(n) => {
                if n <= last_plain {
                    report(diagnostics, DiagnosticKind::OutOfOrder, raw);
                    continue;
                }
                last_plain = n;

                let mut space_after = raw.space_after();
                if let Some(range) = open_range.take() {
                    if n > range.last {
                        report(diagnostics, DiagnosticKind::UnclosedRange, range.raw);
                    } else if n == range.last {
                        // the range line carries the spacing of the whole surface word
                        space_after &= range.space_after;
                    } else {
                        if n >= range.first {
                            // sub-tokens of one surface word are written together
                            space_after = false;
                        }
                        open_range = Some(range);
                    }
                }

                canonical.push(CanonicalToken {
                    id: n,
                    form: raw.form.clone(),
                    attrs: raw.attributes(),
                    space_after,
                    new_paragraph: raw.starts_paragraph(),
                });
            }
        }
    }

    if let Some(range) = open_range {
        report(diagnostics, DiagnosticKind::UnclosedRange, range.raw);
    }

    canonical
}
