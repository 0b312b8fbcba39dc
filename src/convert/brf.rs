//! BRF document converter implementation.

use crate::document::DocumentEvent;
use crate::error::Result;

use super::DocumentConverter;

/// BRF document converter.
///
/// Parses Braille Ready Format files, which are always one volume with one
/// section.
#[derive(Debug, Clone, Default)]
pub struct BrfConverter {
    _private: (),
}

impl BrfConverter {
    /// Create a new BRF converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentConverter for BrfConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["brf", "brl"]
    }

    fn name(&self) -> &str {
        "brf"
    }

    fn parse(&self, bytes: &[u8]) -> Result<Vec<DocumentEvent>> {
        Ok(crate::brf::parse_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::ConvertOptions;

    #[test]
    fn test_brf_converter_extensions() {
        let converter = BrfConverter::new();
        assert_eq!(converter.supported_extensions(), &["brf", "brl"]);
        assert!(converter.supports_extension("BRF"));
        assert!(!converter.supports_extension("pef"));
        assert_eq!(converter.name(), "brf");
    }

    #[test]
    fn test_brf_convert_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.brf");
        std::fs::write(&path, b"AB\r\nCD").unwrap();
        let result = BrfConverter::new()
            .convert(&path, &ConvertOptions::default())
            .unwrap();
        assert_eq!(result.content, b"AB\r\nCD\x0c");
    }
}
