//! Immutable XML document tree for cursor-based reading.
//!
//! This crate turns an XML buffer into a tree of nodes: elements with
//! ordered children and attributes, and text fragments. The tree is an
//! arena: nodes live in a flat array, reference each other by [`NodeId`],
//! and the [`Document`] exclusively owns the whole graph, so navigation
//! state held elsewhere is just a handful of indices.
//!
//! Parsing is best-effort: malformed markup is recovered from where
//! possible rather than rejected outright, and insignificant whitespace
//! between elements is stripped.
//!
//! # Example
//!
//! ```
//! use leshy_dom::Document;
//!
//! let doc = Document::parse_str("<book><title>Go</title></book>")?;
//! let root = doc.root().unwrap();
//! assert_eq!(doc.name(root), Some("book"));
//! # Ok::<(), leshy_dom::Error>(())
//! ```

mod attribute;
mod document;
mod error;
mod node;
mod parser;

pub use attribute::Attribute;
pub use document::Document;
pub use error::{Error, Result};
pub use node::{Node, NodeId, NodeKind};
