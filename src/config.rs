//! Parse options.

use serde::Deserialize;

/// What to do when `# text` metadata disagrees with the token forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchPolicy {
    /// Abort the file.
    #[default]
    Fail,
    /// Warn and use the text rebuilt from forms.
    Reconstruct,
}

/// Options for turning one file into an annotation layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Inserted between consecutive sentences.
    pub sentence_separator: char,
    pub on_text_mismatch: MismatchPolicy,
}

impl ParseOptions {
    /// Newline-separated sentences, mismatches are fatal.
    pub fn standard() -> Self {
        Self {
            sentence_separator: '\n',
            on_text_mismatch: MismatchPolicy::Fail,
        }
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.sentence_separator = separator;
        self
    }

    pub fn with_mismatch_policy(mut self, policy: MismatchPolicy) -> Self {
        self.on_text_mismatch = policy;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::standard()
    }
}
