//! Elements and their instances.

use crate::position::{Boundary, ElementKind, Span};
use indexmap::{IndexMap, IndexSet};

/// Attribute name to value, in insertion order.
pub type AttrBag = IndexMap<String, String>;

/// One occurrence of an element.
///
/// Opened with `end == start`; [`Instance::close`] fixes the end once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub kind: ElementKind,
    pub span: Span,
    pub attrs: AttrBag,
}

impl Instance {
    pub fn open(kind: ElementKind, offset: usize, attrs: AttrBag) -> Self {
        let start = kind.boundary(offset, Boundary::Start);
        Self {
            kind,
            span: Span::new(start, start),
            attrs,
        }
    }

    /// Finalize the end position and hand the instance back.
    pub fn close(mut self, offset: usize) -> Self {
        debug_assert!(offset >= self.span.start.offset);
        self.span.end = self.kind.boundary(offset, Boundary::End);
        self
    }

    /// Shorthand for an instance that is closed as soon as it is created.
    pub fn closed(kind: ElementKind, start: usize, end: usize, attrs: AttrBag) -> Self {
        Self::open(kind, start, attrs).close(end)
    }
}

/// All instances of one element kind plus the union of their attribute names.
#[derive(Debug, Clone)]
pub struct Element {
    pub kind: ElementKind,
    attribute_names: IndexSet<String>,
    instances: Vec<Instance>,
}

impl Element {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            attribute_names: IndexSet::new(),
            instances: Vec::new(),
        }
    }

    pub fn push(&mut self, instance: Instance) {
        debug_assert_eq!(instance.kind, self.kind);
        for name in instance.attrs.keys() {
            if !self.attribute_names.contains(name) {
                self.attribute_names.insert(name.clone());
            }
        }
        self.instances.push(instance);
    }

    pub fn attribute_names(&self) -> &IndexSet<String> {
        &self.attribute_names
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
