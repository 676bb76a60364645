//! The reader facade: document loading plus cursor pass-through.

use std::path::{Path, PathBuf};

use leshy_dom::Document;
use tracing::debug;

use crate::cursor::Cursor;
use crate::{Error, ErrorKind, Result};

/// A cursor based XML reader.
///
/// A reader owns one parsed document at a time and a cursor into it.
/// Loading a new document discards the previous one along with every
/// cached value derived from it, error state included.
///
/// # Example
///
/// ```
/// use leshy_reader::XmlReader;
///
/// let mut reader = XmlReader::new();
/// reader.load_from_str(r#"<node role="admin" dir="rtl">payload</node>"#)?;
///
/// reader.enter_element("node");
/// reader.select_attribute("role");
/// assert_eq!(reader.attribute_value(), Some("admin"));
/// assert_eq!(reader.element_value(), Some("payload"));
/// reader.leave_element();
/// # Ok::<(), leshy_reader::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct XmlReader {
    document: Option<Document>,
    cursor: Cursor,
    filename: Option<PathBuf>,
}

impl XmlReader {
    /// Create an empty reader. Load a document into it before walking.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `buffer` and make it the reader's current document.
    ///
    /// Any previously loaded document and all cursor state are discarded
    /// first, whether or not the reader was in an error state.
    pub fn load_from_buffer(&mut self, buffer: &[u8]) -> Result<()> {
        self.filename = None;
        self.load(buffer)
    }

    /// Parse XML text; see [`load_from_buffer`](XmlReader::load_from_buffer).
    pub fn load_from_str(&mut self, xml: &str) -> Result<()> {
        self.load_from_buffer(xml.as_bytes())
    }

    /// Read the file at `path` and load its contents.
    ///
    /// Parse failures are tagged with the path.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let buffer = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.filename = Some(path.to_path_buf());
        self.load(&buffer)
    }

    fn load(&mut self, buffer: &[u8]) -> Result<()> {
        // Release the previous document before installing the new one; no
        // two trees are ever alive in the same reader.
        self.document = None;
        self.cursor = Cursor::new();

        let document = Document::parse(buffer).map_err(|source| match &self.filename {
            Some(path) => Error::ParseFile {
                path: path.clone(),
                source,
            },
            None => Error::ParseBuffer(source),
        })?;

        debug!(nodes = document.node_count(), "XML document loaded");
        self.document = Some(document);

        Ok(())
    }

    /// Path of the last document loaded through
    /// [`load_from_file`](XmlReader::load_from_file).
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Whether the reader is in the recoverable error state left behind by
    /// a failed [`enter_element`](XmlReader::enter_element).
    ///
    /// Traversal operations carry no error argument; on failure they
    /// return an invalid value (`false` or `None`) and the kind of the
    /// last error stays retrievable through
    /// [`last_error`](XmlReader::last_error).
    pub fn is_in_error(&self) -> bool {
        self.cursor.in_error()
    }

    /// Kind of the error the reader is currently in, if any.
    pub fn last_error(&self) -> Option<ErrorKind> {
        self.cursor.error()
    }

    /// Count of currently open elements.
    pub fn depth(&self) -> u32 {
        self.cursor.depth()
    }

    /// Move the cursor to the first child element named `name`; the very
    /// first call after a load must name the document root.
    ///
    /// Returns `false` and drops the reader into the error state when no
    /// such element exists; a matching
    /// [`leave_element`](XmlReader::leave_element) recovers.
    pub fn enter_element(&mut self, name: &str) -> bool {
        match &self.document {
            Some(document) => self.cursor.enter_element(document, name),
            None => false,
        }
    }

    /// Close the current element, or recover from a failed
    /// [`enter_element`](XmlReader::enter_element).
    pub fn leave_element(&mut self) {
        if let Some(document) = &self.document {
            self.cursor.leave_element(document);
        }
    }

    /// Name of the element the cursor is on.
    pub fn element_name(&self) -> Option<&str> {
        self.document
            .as_ref()
            .and_then(|document| self.cursor.element_name(document))
    }

    /// Text of the element the cursor is on, entities resolved. Absent
    /// when the element has no leading text.
    pub fn element_value(&self) -> Option<&str> {
        self.cursor.element_value()
    }

    /// Whether the current element carries attributes.
    pub fn has_attributes(&self) -> bool {
        self.document
            .as_ref()
            .is_some_and(|document| self.cursor.has_attributes(document))
    }

    /// Number of attributes on the current element.
    pub fn attribute_count(&self) -> Option<usize> {
        self.document
            .as_ref()
            .and_then(|document| self.cursor.attribute_count(document))
    }

    /// Select the attribute at `index` (zero-based) and decode its value.
    pub fn select_attribute_at(&mut self, index: usize) -> bool {
        match &self.document {
            Some(document) => self.cursor.select_attribute_at(document, index),
            None => false,
        }
    }

    /// Select the attribute named `name` and decode its value. A miss
    /// leaves any previous selection untouched.
    pub fn select_attribute(&mut self, name: &str) -> bool {
        match &self.document {
            Some(document) => self.cursor.select_attribute(document, name),
            None => false,
        }
    }

    /// Name of the selected attribute, if a selection is active.
    pub fn selected_attribute_name(&self) -> Option<&str> {
        self.document
            .as_ref()
            .and_then(|document| self.cursor.selected_attribute_name(document))
    }

    /// Decoded value of the last selected attribute.
    ///
    /// This read intentionally skips the error-state and position checks
    /// the other reads perform and returns whatever was cached last;
    /// check the return value of the preceding selection when freshness
    /// matters.
    pub fn attribute_value(&self) -> Option<&str> {
        self.cursor.attribute_value()
    }
}
