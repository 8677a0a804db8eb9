//! Character positions with a tie-break rank.
//!
//! Several element boundaries may fall on the same character offset (a
//! document and its first sentence both start at offset 120, say). Each
//! [`Position`] therefore carries a `subpos` taken from a fixed per-kind
//! table, so that at a shared offset enclosing elements open first and close
//! last.

use std::fmt;

/// A point in the reconstructed text.
///
/// Ordered by `offset`, then `subpos`. Offsets count `char`s, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub offset: usize,
    pub subpos: u8,
}

impl Position {
    pub fn new(offset: usize, subpos: u8) -> Self {
        Self { offset, subpos }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.offset, self.subpos)
    }
}

/// Half-open span between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Span for `kind` covering `start..end`, with the kind's tie-break ranks.
    pub fn of_kind(kind: ElementKind, start: usize, end: usize) -> Self {
        Self {
            start: kind.boundary(start, Boundary::Start),
            end: kind.boundary(end, Boundary::End),
        }
    }

    /// Number of characters covered.
    pub fn char_len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    /// Returns true if `other` lies inside this span, offsets inclusive-exclusive.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Returns true if the character ranges of both spans intersect.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start.offset < other.end.offset && other.start.offset < self.end.offset
    }
}

/// Which end of a span a boundary belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Start,
    End,
}

/// The element kinds of an annotation layer, outermost first.
///
/// The declaration order is the nesting order and drives `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementKind {
    Text,
    Document,
    Paragraph,
    Sentence,
    /// Paragraph break declared inside a sentence via `NewPar=Yes`.
    SentenceParagraph,
    Token,
}

impl ElementKind {
    pub const ALL: [ElementKind; 6] = [
        ElementKind::Text,
        ElementKind::Document,
        ElementKind::Paragraph,
        ElementKind::Sentence,
        ElementKind::SentenceParagraph,
        ElementKind::Token,
    ];

    /// Element name as it appears in the realized schema.
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Document => "document",
            ElementKind::Paragraph => "paragraph",
            ElementKind::Sentence => "sentence",
            ElementKind::SentenceParagraph => "sentence_paragraph",
            ElementKind::Token => "token",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// `(start_subpos, end_subpos)` for this kind.
    ///
    /// Start ranks grow and end ranks shrink with nesting depth.
    pub fn tie_break(self) -> (u8, u8) {
        match self {
            ElementKind::Text => (0, 5),
            ElementKind::Document => (1, 4),
            ElementKind::Paragraph => (2, 3),
            ElementKind::Sentence => (3, 2),
            ElementKind::SentenceParagraph => (4, 1),
            ElementKind::Token => (5, 0),
        }
    }

    pub fn boundary(self, offset: usize, which: Boundary) -> Position {
        let (start_subpos, end_subpos) = self.tie_break();
        match which {
            Boundary::Start => Position::new(offset, start_subpos),
            Boundary::End => Position::new(offset, end_subpos),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
