#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! CoNLL-U treebanks as character-offset annotation layers.
//!
//! A CoNLL-U file is turned into one reconstructed text plus a set of span
//! tables: `text`, `document`, `paragraph`, `sentence`, `sentence_paragraph`
//! and `token`. Every span is a pair of [`Position`]s whose tie-break `subpos`
//! keeps nested elements correctly ordered when they start or end at the same
//! character offset.
//!
//! ## Pipeline
//!
//! - [`record`] - Splits the file into sentence blocks and token columns
//! - [`normalize`] - Drops malformed, out-of-order and empty-node tokens,
//!   folding multiword ranges into their sub-tokens
//! - [`reconstruct`] - Rebuilds sentence text from forms and `SpaceAfter`
//! - [`stack`] - Opens and closes documents and paragraphs, emits instances
//! - [`table`] - Sorts instances and lays out attribute columns
//! - [`analyze`] - Predicts the name vocabulary without building spans
//!
//! ## Example
//!
//! ```
//! use layered_conllu::{parse_str, ElementKind, ParseOptions};
//!
//! let input = "1\tHello\thello\tINTJ\t_\t_\t0\troot\t_\tSpaceAfter=No\n\
//!              2\t!\t!\tPUNCT\t_\t_\t1\tpunct\t_\t_\n";
//! let layer = parse_str("hello.conllu", input, &ParseOptions::default()).unwrap();
//! assert_eq!(layer.text, "Hello!");
//! assert_eq!(layer.table(ElementKind::Token).unwrap().len(), 2);
//! ```

pub mod analyze;
pub mod config;
pub mod diagnostics;
mod display;
pub mod element;
pub mod errors;
mod layer;
pub mod normalize;
pub mod position;
pub mod reconstruct;
pub mod record;
mod root;
pub mod stack;
pub mod table;
pub mod token;

pub use analyze::analyze_str;
pub use config::{MismatchPolicy, ParseOptions};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use display::LayerDisplay;
pub use element::{AttrBag, Element, Instance};
pub use errors::{ConlluError, ConlluResult};
pub use layer::{parse_str, AnnotationLayer};
pub use position::{Boundary, ElementKind, Position, Span};
pub use record::{parse_records, SentenceRecord};
pub use root::RootError;
pub use stack::LayerBuilder;
pub use table::ElementTable;
pub use token::{RawToken, TokenId};
