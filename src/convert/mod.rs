//! Document converter module dispatching input formats by file extension.
//!
//! Each converter parses one input format into document events; the shared
//! pipeline then selects pages, optionally separates graphics for interpoint
//! and renders the requested output.
//!
//! # Example
//!
//! ```no_run
//! use embosser::convert::{ConverterRegistry, ConvertOptions};
//! use std::path::Path;
//!
//! fn main() -> embosser::Result<()> {
//!     let registry = ConverterRegistry::with_defaults();
//!     let result = registry.convert(Path::new("book.pef"), &ConvertOptions::default())?;
//!     std::fs::write("book.txt", &result.content)?;
//!     Ok(())
//! }
//! ```

mod brf;
mod pef;

pub use brf::BrfConverter;
pub use pef::PefConverter;

use crate::document::{validate, DocumentEvent};
use crate::error::{Error, Result};
use crate::filter::{EventStreamExt, PageRanges};
use crate::render::{pages_to_json, to_bytes, to_json, to_pages, JsonFormat, TextRenderOptions};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Text rendering options
    pub render: TextRenderOptions,

    /// Pages to keep
    pub page_ranges: PageRanges,

    /// Insert blank pages so graphics are not backed by other content
    pub interpoint_graphics: bool,

    /// Output format
    pub output_format: OutputFormat,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: TextRenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Select pages.
    pub fn with_page_ranges(mut self, ranges: PageRanges) -> Self {
        self.page_ranges = ranges;
        self
    }

    /// Enable the interpoint graphics transform.
    pub fn with_interpoint_graphics(mut self, enabled: bool) -> Self {
        self.interpoint_graphics = enabled;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Embosser bytes
    #[default]
    Text,

    /// The document event stream as JSON
    Json,

    /// Printable pages as JSON
    Pages,
}

impl OutputFormat {
    /// MIME type of the output.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text/plain",
            OutputFormat::Json | OutputFormat::Pages => "application/json",
        }
    }
}

/// Result of document conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Converted content
    pub content: Vec<u8>,

    /// Events that reached the output after page selection
    pub event_count: usize,

    /// MIME type of the output
    pub mime_type: &'static str,
}

impl ConvertResult {
    /// Create a new conversion result.
    pub fn new(content: Vec<u8>, event_count: usize) -> Self {
        Self {
            content,
            event_count,
            mime_type: "text/plain",
        }
    }

    /// Set MIME type.
    pub fn with_mime_type(mut self, mime_type: &'static str) -> Self {
        self.mime_type = mime_type;
        self
    }

    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Run parsed events through page selection and render the requested output.
///
/// Streams breaking the document protocol are rejected before rendering.
pub fn convert_events(events: Vec<DocumentEvent>, options: &ConvertOptions) -> Result<ConvertResult> {
    let selected = events.into_iter().filter_pages(options.page_ranges.clone());
    let events: Vec<DocumentEvent> = if options.interpoint_graphics {
        selected.interpoint_graphics().collect()
    } else {
        selected.collect()
    };
    validate(&events)?;
    let event_count = events.len();

    let content = match options.output_format {
        OutputFormat::Text => to_bytes(events, &options.render)?,
        OutputFormat::Json => to_json(&events, JsonFormat::Pretty)?.into_bytes(),
        OutputFormat::Pages => {
            let pages = to_pages(events, options.render.interpoint);
            pages_to_json(&pages, JsonFormat::Pretty)?.into_bytes()
        }
    };
    Ok(ConvertResult::new(content, event_count).with_mime_type(options.output_format.mime_type()))
}

/// Trait for document converters.
///
/// Implement this trait to add support for a new input format.
pub trait DocumentConverter: Send + Sync {
    /// Get the supported file extensions for this converter.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["pef"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Parse bytes into document events.
    fn parse(&self, bytes: &[u8]) -> Result<Vec<DocumentEvent>>;

    /// Convert a file at the given path.
    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let bytes = std::fs::read(path)?;
        self.convert_bytes(&bytes, options)
    }

    /// Convert from bytes.
    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult> {
        convert_events(self.parse(bytes)?, options)
    }

    /// Check if this converter supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for document converters.
///
/// The registry maps file extensions to converters and provides
/// convenient methods for converting documents.
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn DocumentConverter>>,
    by_name: HashMap<String, Arc<dyn DocumentConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the BRF and PEF converters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(BrfConverter::new()));
        registry.register(Arc::new(PefConverter::new()));
        registry
    }

    /// Register a converter.
    ///
    /// The converter will be registered for all its supported extensions.
    pub fn register(&mut self, converter: Arc<dyn DocumentConverter>) {
        for ext in converter.supported_extensions() {
            self.converters
                .insert(ext.to_lowercase(), converter.clone());
        }
        self.by_name
            .insert(converter.name().to_lowercase(), converter);
    }

    /// Get a converter by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.converters.get(&ext.to_lowercase()).cloned()
    }

    /// Get a converter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.converters.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions.
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.converters.keys().map(|s| s.as_str()).collect()
    }

    /// Convert a file using the appropriate converter.
    pub fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::Other("File has no extension".into()))?;

        let converter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::Other(format!("No converter for extension: {}", ext)))?;

        converter.convert(path, options)
    }

    /// Convert bytes using the specified extension to determine the converter.
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        ext: &str,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let converter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::Other(format!("No converter for extension: {}", ext)))?;

        converter.convert_bytes(bytes, options)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_options_builder() {
        let options = ConvertOptions::new()
            .with_page_ranges(PageRanges::single(2).unwrap())
            .with_interpoint_graphics(true)
            .with_format(OutputFormat::Pages);

        assert!(options.page_ranges.contains(2));
        assert!(!options.page_ranges.contains(1));
        assert!(options.interpoint_graphics);
        assert_eq!(options.output_format, OutputFormat::Pages);
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = ConverterRegistry::with_defaults();
        assert!(registry.supports("brf"));
        assert!(registry.supports("PEF"));
        assert!(!registry.supports("docx"));
        assert_eq!(registry.supported_extensions().len(), 2);
    }

    #[test]
    fn test_registry_get_by_name() {
        let registry = ConverterRegistry::with_defaults();
        assert_eq!(registry.get_by_name("PEF").unwrap().name(), "pef");
        assert!(registry.get_by_name("docx").is_none());
    }

    #[test]
    fn test_convert_bytes_formats() {
        let registry = ConverterRegistry::with_defaults();
        let text = registry
            .convert_bytes(b"AB", "brf", &ConvertOptions::default())
            .unwrap();
        assert_eq!(text.content, b"AB\x0c");
        assert_eq!(text.mime_type, "text/plain");
        assert_eq!(text.event_count, 11);

        let json = registry
            .convert_bytes(b"AB", "brf", &ConvertOptions::new().with_format(OutputFormat::Json))
            .unwrap();
        let json = String::from_utf8(json.content).unwrap();
        assert!(json.contains("\"braille\": \"AB\""));

        let pages = registry
            .convert_bytes(b"AB", "brf", &ConvertOptions::new().with_format(OutputFormat::Pages))
            .unwrap();
        assert_eq!(pages.mime_type, "application/json");
    }

    #[test]
    fn test_unknown_extension() {
        let registry = ConverterRegistry::with_defaults();
        let result = registry.convert_bytes(b"", "docx", &ConvertOptions::default());
        assert!(matches!(result, Err(Error::Other(_))));
        let result = registry.convert(Path::new("noext"), &ConvertOptions::default());
        assert!(matches!(result, Err(Error::Other(_))));
    }
}
