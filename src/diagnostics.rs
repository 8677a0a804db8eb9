//! Warnings collected while skipping malformed tokens.
//!
//! Every skip is logged through `log::warn!` and also buffered, so callers and
//! tests can inspect what was dropped without installing a logger.

use std::fmt;

/// What kind of recoverable anomaly was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// The id column is neither `n`, `n-m` nor `n.m`.
    MalformedId,
    /// A plain id not greater than the last accepted one.
    OutOfOrder,
    /// A multiword range starting at or before the last accepted id.
    OverlappingRange,
    /// A multiword range whose sub-tokens did not all appear.
    UnclosedRange,
    /// An empty node not placed directly after its major id.
    MisplacedEmptyNode,
}

impl DiagnosticKind {
    pub fn describe(self) -> &'static str {
        match self {
            DiagnosticKind::MalformedId => "malformed token id",
            DiagnosticKind::OutOfOrder => "token id out of order or duplicated",
            DiagnosticKind::OverlappingRange => "multiword range overlaps accepted tokens",
            DiagnosticKind::UnclosedRange => "multiword range not covered by its sub-tokens",
            DiagnosticKind::MisplacedEmptyNode => "empty node out of place",
        }
    }
}

/// One skipped or suspicious token line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// 1-based line in the source file.
    pub line: usize,
    /// The id column exactly as written.
    pub token_id: String,
    pub form: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {} (id '{}', form '{}')",
            self.line,
            self.kind.describe(),
            self.token_id,
            self.form
        )
    }
}

/// Buffered diagnostics for one file.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    source: String,
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            entries: Vec::new(),
        }
    }

    /// Name of the file these diagnostics belong to.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn report(
        &mut self,
        kind: DiagnosticKind,
        line: usize,
        token_id: impl Into<String>,
        form: impl Into<String>,
    ) {
        let diagnostic = Diagnostic {
            kind,
            line,
            token_id: token_id.into(),
            form: form.into(),
        };
        log::warn!("{}: {}", self.source, diagnostic);
        self.entries.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
