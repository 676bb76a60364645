//! Error types for loading and traversal.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by [`XmlReader`] load operations.
///
/// Traversal itself never returns these; see [`ErrorKind`] for the
/// on-demand error channel used while walking.
///
/// [`XmlReader`]: crate::XmlReader
#[derive(Debug, Error)]
pub enum Error {
    /// The buffer could not be parsed.
    #[error("unable to parse XML buffer")]
    ParseBuffer(#[source] leshy_dom::Error),

    /// The file could not be parsed.
    #[error("unable to parse file `{}`", .path.display())]
    ParseFile {
        /// Path the document was read from.
        path: PathBuf,
        #[source]
        source: leshy_dom::Error,
    },

    /// The file could not be read.
    #[error("unable to read `{}`: {source}", .path.display())]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    /// The kind of this error. Load failures are all [`ErrorKind::Invalid`].
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Invalid
    }
}

/// Result type for reader operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The fixed set of error kinds a reader can report.
///
/// Traversal operations signal failure through their primary return value
/// (`false` or `None`) so tight read loops stay cheap; the richer kind is
/// kept aside and retrieved on demand through
/// [`XmlReader::last_error`](crate::XmlReader::last_error).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The document failed to load.
    Invalid,
    /// A named element search found nothing.
    UnknownNode,
}
