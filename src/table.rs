//! Position-sorted span tables with one value column per attribute.

use crate::element::Element;
use crate::position::{ElementKind, Span};
use indexmap::IndexMap;

/// All instances of one element, sorted by start position.
///
/// `attributes[name][i]` belongs to `spans[i]`; instances lacking an
/// attribute get `""`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementTable {
    pub kind: ElementKind,
    pub spans: Vec<Span>,
    pub attributes: IndexMap<String, Vec<String>>,
}

impl ElementTable {
    /// Build the table for an element.
    ///
    /// The sort is stable and keyed on the start position alone, so instances
    /// starting at the same position keep their insertion order.
    pub fn build(element: &Element) -> Self {
        let mut order: Vec<_> = element.instances().iter().collect();
        order.sort_by_key(|instance| instance.span.start);

        let spans = order.iter().map(|instance| instance.span).collect();
        let attributes = element
            .attribute_names()
            .iter()
            .map(|name| {
                let column = order
                    .iter()
                    .map(|instance| instance.attrs.get(name).cloned().unwrap_or_default())
                    .collect();
                (name.clone(), column)
            })
            .collect();

        Self {
            kind: element.kind,
            spans,
            attributes,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// The value column for `attribute`.
    pub fn values(&self, attribute: &str) -> Option<&[String]> {
        self.attributes.get(attribute).map(|column| column.as_slice())
    }

    pub fn value(&self, index: usize, attribute: &str) -> Option<&str> {
        self.values(attribute)?.get(index).map(|value| value.as_str())
    }

    /// `element` followed by one `element:attribute` per column.
    pub fn schema_names(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(self.name().to_string()).chain(
            self.attributes
                .keys()
                .map(move |attribute| format!("{}:{}", self.name(), attribute)),
        )
    }
}
