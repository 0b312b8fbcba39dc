//! The document event vocabulary.

use super::options::{GraphicOptions, LayoutOptions, RowOptions, ScopeOptions};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One event of a braille document stream.
///
/// A well-formed stream follows the nesting
/// `Document > Volume+ > Section+ > Page+ > (Line | Graphic)*`, where a
/// graphic may itself contain lines of alternative braille text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentEvent {
    /// Start of the document
    StartDocument(LayoutOptions),
    /// Start of a volume
    StartVolume(LayoutOptions),
    /// Start of a section
    StartSection(LayoutOptions),
    /// Start of a page
    StartPage(LayoutOptions),
    /// Start of a line
    StartLine(RowOptions),
    /// Braille text of the current line
    Braille(String),
    /// End of the current line
    EndLine,
    /// Start of a graphic
    StartGraphic(GraphicOptions),
    /// End of the current graphic
    EndGraphic,
    /// End of the current page
    EndPage,
    /// End of the current section
    EndSection,
    /// End of the current volume
    EndVolume,
    /// End of the document
    EndDocument,
}

impl DocumentEvent {
    /// Document start without options.
    pub fn start_document() -> Self {
        DocumentEvent::StartDocument(LayoutOptions::default())
    }

    /// Volume start without options.
    pub fn start_volume() -> Self {
        DocumentEvent::StartVolume(LayoutOptions::default())
    }

    /// Section start without options.
    pub fn start_section() -> Self {
        DocumentEvent::StartSection(LayoutOptions::default())
    }

    /// Page start without options.
    pub fn start_page() -> Self {
        DocumentEvent::StartPage(LayoutOptions::default())
    }

    /// Line start without options.
    pub fn start_line() -> Self {
        DocumentEvent::StartLine(RowOptions::default())
    }

    /// Braille text event.
    pub fn braille(text: impl Into<String>) -> Self {
        DocumentEvent::Braille(text.into())
    }

    /// Variant name, used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            DocumentEvent::StartDocument(_) => "StartDocument",
            DocumentEvent::StartVolume(_) => "StartVolume",
            DocumentEvent::StartSection(_) => "StartSection",
            DocumentEvent::StartPage(_) => "StartPage",
            DocumentEvent::StartLine(_) => "StartLine",
            DocumentEvent::Braille(_) => "Braille",
            DocumentEvent::EndLine => "EndLine",
            DocumentEvent::StartGraphic(_) => "StartGraphic",
            DocumentEvent::EndGraphic => "EndGraphic",
            DocumentEvent::EndPage => "EndPage",
            DocumentEvent::EndSection => "EndSection",
            DocumentEvent::EndVolume => "EndVolume",
            DocumentEvent::EndDocument => "EndDocument",
        }
    }

    /// Options opened by a start event.
    pub fn scope_options(&self) -> Option<ScopeOptions> {
        match self {
            DocumentEvent::StartDocument(o)
            | DocumentEvent::StartVolume(o)
            | DocumentEvent::StartSection(o)
            | DocumentEvent::StartPage(o) => Some(ScopeOptions::Layout(o.clone())),
            DocumentEvent::StartLine(o) => Some(ScopeOptions::Row(o.clone())),
            DocumentEvent::StartGraphic(o) => Some(ScopeOptions::Graphic(o.clone())),
            _ => None,
        }
    }

    /// Check if this is a document, volume or section boundary.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            DocumentEvent::StartDocument(_)
                | DocumentEvent::StartVolume(_)
                | DocumentEvent::StartSection(_)
                | DocumentEvent::EndSection
                | DocumentEvent::EndVolume
                | DocumentEvent::EndDocument
        )
    }

    /// Check if this is a page boundary.
    pub fn is_page_boundary(&self) -> bool {
        matches!(self, DocumentEvent::StartPage(_) | DocumentEvent::EndPage)
    }
}

impl fmt::Display for DocumentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Wrap lines of braille text in a single-page document.
///
/// Convenient for callers that only have a list of lines.
pub fn single_page_document<I, S>(lines: I) -> Vec<DocumentEvent>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut events = vec![
        DocumentEvent::start_document(),
        DocumentEvent::start_volume(),
        DocumentEvent::start_section(),
        DocumentEvent::start_page(),
    ];
    for line in lines {
        events.push(DocumentEvent::start_line());
        events.push(DocumentEvent::braille(line));
        events.push(DocumentEvent::EndLine);
    }
    events.extend([
        DocumentEvent::EndPage,
        DocumentEvent::EndSection,
        DocumentEvent::EndVolume,
        DocumentEvent::EndDocument,
    ]);
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_equality() {
        assert_eq!(DocumentEvent::start_page(), DocumentEvent::StartPage(LayoutOptions::new()));
        assert_ne!(
            DocumentEvent::start_page(),
            DocumentEvent::StartPage(LayoutOptions::new().with_lines_per_page(3))
        );
        assert_eq!(DocumentEvent::braille("AB"), DocumentEvent::Braille("AB".to_string()));
    }

    #[test]
    fn test_event_names() {
        assert_eq!(DocumentEvent::EndLine.to_string(), "EndLine");
        assert_eq!(DocumentEvent::start_volume().name(), "StartVolume");
    }

    #[test]
    fn test_scope_options() {
        let event = DocumentEvent::StartLine(RowOptions::new().with_row_gap(1));
        assert_eq!(
            event.scope_options(),
            Some(ScopeOptions::Row(RowOptions::new().with_row_gap(1)))
        );
        assert!(DocumentEvent::EndPage.scope_options().is_none());
    }

    #[test]
    fn test_boundaries() {
        assert!(DocumentEvent::start_section().is_structural());
        assert!(!DocumentEvent::start_page().is_structural());
        assert!(DocumentEvent::EndPage.is_page_boundary());
    }

    #[test]
    fn test_single_page_document() {
        let events = single_page_document(["AB", "CD"]);
        assert_eq!(events.len(), 14);
        assert_eq!(events[5], DocumentEvent::braille("AB"));
    }

    #[test]
    fn test_event_serializes_to_json() {
        let json = serde_json::to_string(&DocumentEvent::braille("A")).unwrap();
        assert_eq!(json, r#"{"braille":"A"}"#);
        let json = serde_json::to_string(&DocumentEvent::EndPage).unwrap();
        assert_eq!(json, r#""end_page""#);
    }
}
