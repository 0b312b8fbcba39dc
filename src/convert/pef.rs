//! PEF document converter implementation.

use crate::document::DocumentEvent;
use crate::error::Result;
use crate::pef::parse_event_bytes;

use super::DocumentConverter;

/// PEF document converter.
///
/// Layout attributes in the PEF reach the renderer as scoped options, so
/// pages narrower than the render options are honoured.
#[derive(Debug, Clone, Default)]
pub struct PefConverter {
    _private: (),
}

impl PefConverter {
    /// Create a new PEF converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentConverter for PefConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["pef"]
    }

    fn name(&self) -> &str {
        "pef"
    }

    fn parse(&self, bytes: &[u8]) -> Result<Vec<DocumentEvent>> {
        parse_event_bytes(bytes)
    }
}
