//! Error types for the unstyle library.

use std::io;
use thiserror::Error;

/// Result type alias for unstyle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or evaluating a document.
///
/// Only the load errors (`Io`, `ZipArchive`, `XmlParse`, `MissingComponent`)
/// abort an evaluation. Everything else is reported per style or per lookup
/// and the pass carries on with the feature treated as absent.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A required document part is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// The based-on chain of a style loops back on itself.
    #[error("Style inheritance cycle at style '{style_id}'")]
    StyleCycle {
        /// The style whose chain revisited an in-progress style.
        style_id: String,
    },

    /// A numbering level index outside 0-8 was passed to a catalog lookup.
    #[error("Numbering level {0} is out of range (expected 0-8)")]
    LevelOutOfRange(u8),

    /// Error during rendering.
    #[error("Render error: {0}")]
    Render(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}
