//! Error types for the embosser library.

use std::io;
use thiserror::Error;

/// Result type alias for embosser operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading, transforming or rendering braille documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The XML underneath a PEF document could not be read.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed PEF: unexpected element, wrong child count or invalid attribute value.
    #[error("PEF format error: {0}")]
    Format(String),

    /// An event was delivered to a handler in a state that does not accept it.
    #[error("invalid event {event} for state {state}")]
    ProtocolViolation {
        /// Name of the offending event
        event: String,
        /// Name of the state at the top of the stack
        state: String,
    },

    /// Builder parameters outside the supported range.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// A document tree mutation would break a structural invariant.
    #[error("Invalid document structure: {0}")]
    InvalidStructure(String),

    /// Error during rendering (JSON dumps and similar).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Format(format!("malformed attribute: {}", err))
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Format(format!("invalid UTF-8: {}", err))
    }
}
