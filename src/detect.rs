//! Input format detection.

use crate::error::Result;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Input formats the library can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// Portable Embosser Format XML
    Pef,
    /// Braille Ready Format ASCII braille
    Brf,
}

impl DocumentFormat {
    /// Usual file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pef => "pef",
            DocumentFormat::Brf => "brf",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::Pef => f.write_str("PEF"),
            DocumentFormat::Brf => f.write_str("BRF"),
        }
    }
}

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";
const HEADER_LEN: u64 = 512;

/// Detect the format from a file path.
///
/// Only the start of the file is read.
///
/// # Example
/// ```no_run
/// use embosser::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("book.pef").unwrap();
/// println!("Format: {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<DocumentFormat> {
    let file = File::open(path)?;
    let mut header = Vec::new();
    file.take(HEADER_LEN).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the format from the start of a document.
///
/// # Returns
/// * `Ok(DocumentFormat::Pef)` for XML starting with `<?xml` or `<pef`
/// * `Ok(DocumentFormat::Brf)` for anything else, since any byte sequence
///   is readable as BRF
pub fn detect_format_from_bytes(data: &[u8]) -> Result<DocumentFormat> {
    if is_pef_bytes(data) {
        return Ok(DocumentFormat::Pef);
    }
    Ok(DocumentFormat::Brf)
}

/// Check if bytes look like a PEF document.
pub fn is_pef_bytes(data: &[u8]) -> bool {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    let data = &data[start..];
    data.starts_with(b"<?xml") || data.starts_with(b"<pef")
}

/// Check if a file looks like a PEF document.
pub fn is_pef<P: AsRef<Path>>(path: P) -> bool {
    matches!(detect_format_from_path(path), Ok(DocumentFormat::Pef))
}
