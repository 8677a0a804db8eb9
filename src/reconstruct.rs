//! Sentence text reconstruction.
//!
//! Forms are joined with one space unless a token has `SpaceAfter=No`; the
//! final trailing space is dropped. Token spans are file-absolute character
//! offsets.

use crate::normalize::CanonicalToken;
use std::ops::Range;

/// A sentence's rendered text and the character range of each token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSentence {
    pub text: String,
    /// Offset of the first character in the whole file.
    pub start: usize,
    /// Length of `text` in chars.
    pub char_len: usize,
    /// One range per canonical token, in order.
    pub token_spans: Vec<Range<usize>>,
}

impl RenderedSentence {
    /// Offset just past the last character.
    pub fn end(&self) -> usize {
        self.start + self.char_len
    }
}

/// `# text` metadata whose length disagrees with the forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMismatch {
    /// Char length of the metadata text.
    pub expected: usize,
    /// The rendering built from forms alone.
    pub fallback: RenderedSentence,
}

impl TextMismatch {
    pub fn reconstructed(&self) -> usize {
        self.fallback.char_len
    }
}

/// Render tokens from their forms and spacing flags, starting at `start`.
pub fn render_forms(tokens: &[CanonicalToken], start: usize) -> RenderedSentence {
    let mut text = String::new();
    let mut token_spans = Vec::with_capacity(tokens.len());
    let mut cursor = start;

    for (idx, token) in tokens.iter().enumerate() {
        let token_start = cursor;
        let token_end = token_start + token.char_len();
        text.push_str(&token.form);
        token_spans.push(token_start..token_end);
        cursor = token_end;

        let is_last = idx + 1 == tokens.len();
        if token.space_after && !is_last {
            text.push(' ');
            cursor += 1;
        }
    }

    RenderedSentence {
        text,
        start,
        char_len: cursor - start,
        token_spans,
    }
}

/// Render one sentence, preferring explicit `# text` metadata when given.
///
/// Token spans always come from walking the forms. Explicit text is only
/// accepted when its length agrees with that walk.
pub fn reconstruct(
    tokens: &[CanonicalToken],
    start: usize,
    explicit_text: Option<&str>,
) -> Result<RenderedSentence, TextMismatch> {
    let rendered = render_forms(tokens, start);
    let Some(explicit) = explicit_text else {
        return Ok(rendered);
    };

    let expected = explicit.chars().count();
    if expected != rendered.char_len {
        return Err(TextMismatch {
            expected,
            fallback: rendered,
        });
    }

    Ok(RenderedSentence {
        text: explicit.to_string(),
        ..rendered
    })
}
