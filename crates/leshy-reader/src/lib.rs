//! Cursor based XML reader.
//!
//! [`XmlReader`] walks the nodes of a parsed XML document by simply
//! entering and leaving each desired element. The cursor remembers the
//! current element, one level of parent, the nesting depth and the decoded
//! values of the current element text and selected attribute; every read
//! is an in-memory lookup against the tree built at load time.
//!
//! A failed [`enter_element`](XmlReader::enter_element) is recoverable:
//! the reader drops into an error state and the next
//! [`leave_element`](XmlReader::leave_element) restores the position held
//! before the failed call, so callers can keep a uniform enter/leave
//! bracketing pattern even around speculative lookups.
//!
//! # Example
//!
//! ```
//! use leshy_reader::XmlReader;
//!
//! let mut reader = XmlReader::new();
//! reader.load_from_str("<book><author>Jane</author><title>Go</title></book>")?;
//!
//! reader.enter_element("book");
//! reader.enter_element("author");
//! assert_eq!(reader.element_value(), Some("Jane"));
//! reader.leave_element();
//! reader.enter_element("title");
//! assert_eq!(reader.element_value(), Some("Go"));
//! reader.leave_element();
//! reader.leave_element();
//! # Ok::<(), leshy_reader::Error>(())
//! ```

mod cursor;
mod error;
mod reader;

pub use error::{Error, ErrorKind, Result};
pub use reader::XmlReader;
