//! # embosser
//!
//! Braille embosser core library for Rust.
//!
//! Documents are exchanged as a stream of [`DocumentEvent`]s. Readers for
//! BRF and PEF produce such streams, filters reshape them lazily and the
//! rendering engines turn them into embosser bytes or printable pages.
//!
//! ## Quick Start
//!
//! ```no_run
//! use embosser::{emboss_file, EmbossingAttributes, Rectangle, TextEmbosser};
//!
//! fn main() -> embosser::Result<()> {
//!     let embosser = TextEmbosser::new("generic.text", "Text only");
//!     let attributes = EmbossingAttributes::new().with_paper(Rectangle::LETTER);
//!     let bytes = emboss_file("book.pef", &embosser, &attributes)?;
//!     std::fs::write("book.txt", bytes)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Event protocol**: a checked state machine over document events
//! - **Formats**: BRF reading, PEF reading and writing, BRF to PEF conversion
//! - **Rendering**: generic text embosser output and a printable page model
//! - **Filters**: page ranges and interpoint graphic separation
//! - **Async**: optional tokio file reading behind the `async` feature

pub mod braille;
pub mod brf;
pub mod convert;
pub mod detect;
pub mod document;
pub mod embosser;
pub mod error;
pub mod filter;
pub mod pef;
pub mod render;

// Re-export commonly used types
pub use braille::{ascii_to_unicode, unicode_to_ascii, BrlCell};
pub use convert::{
    ConvertOptions, ConvertResult, ConverterRegistry, DocumentConverter, OutputFormat,
};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pef, DocumentFormat};
pub use document::{DocumentEvent, DocumentHandler, StateMachine};
pub use embosser::{EmbossingAttributes, Margins, Rectangle, TextEmbosser};
pub use error::{Error, Result};
pub use filter::{EventStreamExt, PageRanges};
pub use pef::PefDocument;
pub use render::{JsonFormat, LineEnding, PageEnding, TextRenderOptions};

use std::path::Path;

/// Parse BRF bytes into document events.
///
/// # Example
///
/// ```
/// use embosser::parse_brf;
///
/// let events = parse_brf(b"AB\r\nCD");
/// assert_eq!(events.len(), 14);
/// ```
pub fn parse_brf(data: &[u8]) -> Vec<DocumentEvent> {
    brf::parse_bytes(data)
}

/// Parse PEF bytes into document events.
pub fn parse_pef(data: &[u8]) -> Result<Vec<DocumentEvent>> {
    pef::parse_event_bytes(data)
}

/// Read a PEF file into a document tree.
///
/// # Example
///
/// ```no_run
/// use embosser::read_pef;
///
/// let doc = read_pef("book.pef").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn read_pef<P: AsRef<Path>>(path: P) -> Result<PefDocument> {
    pef::read_file(path)
}

/// Parse BRF or PEF bytes, detecting the format from the content.
pub fn parse_bytes(data: &[u8]) -> Result<Vec<DocumentEvent>> {
    match detect_format_from_bytes(data)? {
        DocumentFormat::Pef => parse_pef(data),
        DocumentFormat::Brf => Ok(parse_brf(data)),
    }
}

/// Emboss BRF or PEF bytes with a text embosser.
///
/// The format is detected from the content. Documents which do not follow
/// the event protocol are rejected with [`Error::ProtocolViolation`].
pub fn emboss_bytes(
    data: &[u8],
    embosser: &TextEmbosser,
    attributes: &EmbossingAttributes,
) -> Result<Vec<u8>> {
    let events = parse_bytes(data)?;
    document::validate(&events)?;
    embosser.emboss(events, attributes)
}

/// Emboss a BRF or PEF file with a text embosser.
pub fn emboss_file<P: AsRef<Path>>(
    path: P,
    embosser: &TextEmbosser,
    attributes: &EmbossingAttributes,
) -> Result<Vec<u8>> {
    let data = std::fs::read(path)?;
    emboss_bytes(&data, embosser, attributes)
}

/// Emboss a BRF or PEF file, reading it with tokio.
#[cfg(feature = "async")]
pub async fn emboss_file_async<P: AsRef<Path>>(
    path: P,
    embosser: &TextEmbosser,
    attributes: &EmbossingAttributes,
) -> Result<Vec<u8>> {
    let data = tokio::fs::read(path).await?;
    emboss_bytes(&data, embosser, attributes)
}
