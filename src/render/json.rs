//! JSON rendering for event streams and printable pages.

use serde::Serialize;

use crate::document::DocumentEvent;
use crate::error::{Error, Result};

use super::Page;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Convert an event stream to JSON.
pub fn to_json(events: &[DocumentEvent], format: JsonFormat) -> Result<String> {
    serialize(events, format)
}

/// Convert printable pages to JSON.
pub fn pages_to_json(pages: &[Page], format: JsonFormat) -> Result<String> {
    serialize(pages, format)
}

/// Read an event stream back from JSON.
pub fn from_json(json: &str) -> Result<Vec<DocumentEvent>> {
    serde_json::from_str(json).map_err(|e| Error::Render(format!("JSON parse error: {}", e)))
}
