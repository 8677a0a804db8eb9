use crate::layer::AnnotationLayer;
use crate::position::{ElementKind, Span};
use crate::table::ElementTable;
use std::fmt::Write;
use unicode_width::UnicodeWidthChar;

/// Shown in place of the sentence separator so the text stays on one line.
const NEWLINE_GLYPH: char = '␤';

struct IncludedSpan {
    span: Span,
    label: String,
}

/// Renders the layer text with one rule per included instance underneath.
///
/// ```text
/// The quick brown fox.
/// ╰─╯token(id=1, baseform=the)
/// ╰──────────────────╯sentence(sent_id=s1)
/// ```
pub struct LayerDisplay<'a> {
    layer: &'a AnnotationLayer,
    include_spans: Vec<IncludedSpan>,
}

fn label(table: &ElementTable, index: usize) -> String {
    let attrs: Vec<String> = table
        .attributes
        .iter()
        .filter_map(|(name, column)| {
            let value = column.get(index)?;
            (!value.is_empty()).then(|| format!("{}={}", name, value))
        })
        .collect();

    if attrs.is_empty() {
        table.name().to_string()
    } else {
        format!("{}({})", table.name(), attrs.join(", "))
    }
}

impl<'a> std::fmt::Display for LayerDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // display column of each char offset, plus one past the end
        let mut columns = Vec::with_capacity(self.layer.text.len() + 1);
        let mut opening_line = String::new();
        let mut width = 0;
        for ch in self.layer.text.chars() {
            columns.push(width);
            let ch = if ch == '\n' { NEWLINE_GLYPH } else { ch };
            opening_line.push(ch);
            width += UnicodeWidthChar::width(ch).unwrap_or(0);
        }
        columns.push(width);

        f.write_str(&opening_line)?;

        let column_at = |offset: usize| columns[offset.min(columns.len() - 1)];

        for included in self.include_spans.iter() {
            f.write_char('\n')?;

            let start_col = column_at(included.span.start.offset);
            for _ in 0..start_col {
                f.write_char(' ')?;
            }

            f.write_char('╰')?;

            let end_col = column_at(included.span.end.offset);
            let col_len = end_col.saturating_sub(start_col);
            for _ in (start_col + 1)..end_col.saturating_sub(1) {
                f.write_char('─')?;
            }

            if col_len > 1 {
                f.write_char('╯')?;
            }

            f.write_str(&included.label)?;
        }

        Ok(())
    }
}

impl<'a> LayerDisplay<'a> {
    pub fn new(layer: &'a AnnotationLayer) -> Self {
        LayerDisplay {
            layer,
            include_spans: Vec::new(),
        }
    }

    /// Add a rule for every instance of `kind`, in table order.
    pub fn include(&mut self, kind: ElementKind) {
        let Some(table) = self.layer.table(kind) else {
            return;
        };
        for (index, span) in table.spans.iter().enumerate() {
            self.include_spans.push(IncludedSpan {
                span: *span,
                label: label(table, index),
            });
        }
    }

    /// Takes self
    pub fn with(mut self, kind: ElementKind) -> Self {
        self.include(kind);
        self
    }
}
