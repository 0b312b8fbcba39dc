//! Page model rendering for printer-style embossers.
//!
//! Instead of bytes, this engine produces a list of [`Page`]s holding rows
//! of braille and positioned graphics, ready to be drawn by a printing
//! backend.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::debug;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::document::{DocumentEvent, DocumentHandler, OptionStack, ScopeOptions, StateMachine};

/// One element placed on a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageElement {
    /// A line of braille followed by `rowgap` blank lines
    Row {
        /// Braille text of the line
        braille: String,
        /// Blank lines after the line
        rowgap: u32,
    },
    /// An image occupying a block of lines
    Graphic {
        /// Encoded image bytes
        #[serde(serialize_with = "encode_image", deserialize_with = "decode_image")]
        image: Vec<u8>,
        /// Width in cells
        width: u32,
        /// Height in lines
        height: u32,
        /// Indent in cells
        indent: u32,
    },
}

impl PageElement {
    /// A row without a gap.
    pub fn row(braille: impl Into<String>) -> Self {
        PageElement::Row {
            braille: braille.into(),
            rowgap: 0,
        }
    }
}

fn encode_image<S: Serializer>(image: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(image))
}

fn decode_image<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    STANDARD
        .decode(encoded.as_bytes())
        .map_err(serde::de::Error::custom)
}

/// A rendered page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Page {
    /// Elements in top to bottom order
    pub elements: Vec<PageElement>,
}

impl Page {
    /// Create a page from its elements.
    pub fn new(elements: Vec<PageElement>) -> Self {
        Self { elements }
    }

    /// Check if nothing is placed on this page.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Rows of braille on this page.
    pub fn rows(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match e {
            PageElement::Row { braille, .. } => Some(braille.as_str()),
            PageElement::Graphic { .. } => None,
        })
    }
}

/// Handler collecting a document event stream into pages.
#[derive(Debug, Clone, Default)]
pub struct PrintableHandler {
    duplex: bool,
    machine: StateMachine,
    scopes: OptionStack,
    pages: Vec<Page>,
    elements: Vec<PageElement>,
    braille: String,
    graphic_height: u32,
}

impl PrintableHandler {
    /// Create a handler; with `duplex` every volume starts on a front side.
    pub fn new(duplex: bool) -> Self {
        Self {
            duplex,
            ..Self::default()
        }
    }

    /// Pages collected so far.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Number of pages collected so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Consume the handler, returning its pages.
    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    fn in_graphic(&self) -> bool {
        self.scopes.image_data().is_some()
    }

    fn end_line(&mut self) {
        let rowgap = self.scopes.row_gap().unwrap_or(0);
        if self.in_graphic() {
            self.graphic_height += rowgap + 1;
        } else {
            self.elements.push(PageElement::Row {
                braille: std::mem::take(&mut self.braille),
                rowgap,
            });
        }
    }

    fn end_graphic(&mut self) {
        let Some(graphic) = self.scopes.graphic() else {
            return;
        };
        if let Some(image) = &graphic.image_data {
            let element = PageElement::Graphic {
                image: image.clone(),
                width: graphic.width.unwrap_or(0),
                height: graphic.height.unwrap_or(self.graphic_height),
                indent: graphic.indent.unwrap_or(0),
            };
            self.elements.push(element);
        }
    }
}

impl DocumentHandler for PrintableHandler {
    fn on_event(&mut self, event: DocumentEvent) {
        self.machine.accept(&event);
        match event {
            DocumentEvent::StartDocument(options) => {
                self.scopes.clear();
                self.scopes.push(ScopeOptions::Layout(options));
                self.pages.clear();
            }
            DocumentEvent::StartVolume(options) => {
                self.scopes.push(ScopeOptions::Layout(options));
                if self.duplex && self.pages.len() % 2 != 0 {
                    debug!("Inserting blank page before volume {}", self.pages.len());
                    self.pages.push(Page::default());
                }
            }
            DocumentEvent::StartSection(options) => {
                self.scopes.push(ScopeOptions::Layout(options));
            }
            DocumentEvent::StartPage(options) => {
                self.scopes.push(ScopeOptions::Layout(options));
                self.elements.clear();
            }
            DocumentEvent::StartLine(options) => {
                self.scopes.push(ScopeOptions::Row(options));
                if !self.in_graphic() {
                    self.braille.clear();
                }
            }
            DocumentEvent::Braille(text) => {
                if !self.in_graphic() {
                    self.braille.push_str(&text);
                }
            }
            DocumentEvent::EndLine => {
                self.end_line();
                self.scopes.pop();
            }
            DocumentEvent::StartGraphic(options) => {
                self.graphic_height = 0;
                self.scopes.push(ScopeOptions::Graphic(options));
            }
            DocumentEvent::EndGraphic => {
                self.end_graphic();
                self.scopes.pop();
            }
            DocumentEvent::EndPage => {
                let elements = std::mem::take(&mut self.elements);
                self.pages.push(Page::new(elements));
                self.scopes.pop();
            }
            DocumentEvent::EndSection | DocumentEvent::EndVolume => {
                self.scopes.pop();
            }
            DocumentEvent::EndDocument => {
                self.scopes.pop();
                debug!("Collected {} printable pages", self.pages.len());
            }
        }
    }
}

/// Collect a complete event stream into pages.
///
/// # Panics
///
/// Panics if the events do not follow the document grammar.
pub fn to_pages<I>(events: I, duplex: bool) -> Vec<Page>
where
    I: IntoIterator<Item = DocumentEvent>,
{
    let mut handler = PrintableHandler::new(duplex);
    handler.on_events(events);
    handler.into_pages()
}
