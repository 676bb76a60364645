//! Error types for document parsing.

use thiserror::Error;

/// Errors that can occur when parsing an XML buffer into a [`Document`].
///
/// [`Document`]: crate::Document
#[derive(Debug, Error)]
pub enum Error {
    /// The buffer contained no root element.
    #[error("no root element found in XML")]
    NoRootElement,

    /// The tokenizer failed before a complete element was seen.
    #[error("XML error: {0}")]
    Xml(String),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, Error>;
