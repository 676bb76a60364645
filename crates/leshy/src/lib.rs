//! Leshy - cursor based XML reading library.
//!
//! This crate provides a unified interface to the Leshy crates for walking
//! XML documents with a cursor: load a document, then enter and leave each
//! desired element, reading text and attributes as you go.
//!
//! # Crates
//!
//! - [`leshy_dom`] - immutable parsed document tree (node arena, attributes)
//! - [`leshy_reader`] - the cursor reader built on top of it
//!
//! # Example
//!
//! ```
//! use leshy::prelude::*;
//!
//! let mut reader = XmlReader::new();
//! reader.load_from_str("<book><author>Jane</author></book>")?;
//!
//! reader.enter_element("book");
//! reader.enter_element("author");
//! assert_eq!(reader.element_value(), Some("Jane"));
//! reader.leave_element();
//! reader.leave_element();
//! # Ok::<(), leshy_reader::Error>(())
//! ```

// Re-export all sub-crates
pub use leshy_dom as dom;
pub use leshy_reader as reader;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use leshy_dom::{Attribute, Document, Node, NodeId, NodeKind};
    pub use leshy_reader::{Error, ErrorKind, XmlReader};
}

// Re-export the main entry point at the crate root
pub use leshy_reader::XmlReader;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
