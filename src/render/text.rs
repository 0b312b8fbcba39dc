//! Generic text rendering for braille embossers.
//!
//! Lines of braille are written as ASCII braille, one line per end-of-line
//! sequence, with a form feed (or the configured end-of-page bytes) after
//! each page. Margins, row gaps, bottom padding and interpoint blank pages
//! are handled here; the device specific framing is left to the caller.

use log::debug;

use crate::braille::unicode_to_ascii;
use crate::document::{DocumentEvent, DocumentHandler, OptionStack, ScopeOptions, StateMachine};
use crate::error::Result;

use super::TextRenderOptions;

/// Handler rendering a document event stream into embosser bytes.
#[derive(Debug, Clone)]
pub struct GenericTextHandler {
    options: TextRenderOptions,
    machine: StateMachine,
    scopes: OptionStack,
    output: Vec<u8>,
    lines_remaining: i64,
    cells_per_line: u32,
    cells_remaining: u32,
    pending_lines: i64,
    right_page: bool,
}

impl GenericTextHandler {
    /// Create a handler, rejecting invalid options.
    pub fn new(options: TextRenderOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            cells_per_line: options.cells_per_line,
            options,
            machine: StateMachine::new(),
            scopes: OptionStack::new(),
            output: Vec::new(),
            lines_remaining: 0,
            cells_remaining: 0,
            pending_lines: 0,
            right_page: true,
        })
    }

    /// Options in use.
    pub fn options(&self) -> &TextRenderOptions {
        &self.options
    }

    /// Bytes rendered so far.
    ///
    /// Copies are only applied once the document has ended.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Consume the handler, returning the rendered bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.output
    }

    fn write_end_of_lines(&mut self, count: i64) {
        for _ in 0..count {
            self.output.extend_from_slice(&self.options.end_of_line);
        }
    }

    fn write_end_of_page(&mut self) {
        self.output.extend_from_slice(&self.options.end_of_page);
        self.right_page = !self.right_page;
    }

    // Sections always begin on the front of a sheet when embossing interpoint.
    fn ensure_right_page(&mut self) {
        if self.options.interpoint && !self.right_page {
            self.write_end_of_page();
        }
    }

    fn start_page(&mut self) {
        let max_lines = self.options.lines_per_page;
        let max_cells = self.options.cells_per_line;
        let lines = self.scopes.lines_per_page().unwrap_or(max_lines).min(max_lines);
        self.lines_remaining = i64::from(lines) - 1;
        self.cells_per_line = self.scopes.cells_per_line().unwrap_or(max_cells).min(max_cells);
        self.pending_lines = i64::from(self.options.top_margin);

        if self.options.interpoint && !self.right_page && self.scopes.duplex() == Some(false) {
            self.write_end_of_page();
        }
    }

    fn start_line(&mut self) {
        if self.pending_lines > 0 {
            self.write_end_of_lines(self.pending_lines);
        }
        self.pending_lines = 0;
        self.cells_remaining = self.cells_per_line;
        // Lines past the bottom of the page are dropped, margin included.
        if self.lines_remaining >= 0 {
            let margin = self.options.left_margin as usize;
            self.output.extend(std::iter::repeat(b' ').take(margin));
        }
    }

    fn write_braille(&mut self, text: &str) {
        if self.lines_remaining < 0 {
            return;
        }
        let visible: String = text.chars().take(self.cells_remaining as usize).collect();
        let written = visible.chars().count() as u32;
        self.output.extend_from_slice(unicode_to_ascii(&visible).as_bytes());
        self.cells_remaining -= written;
    }

    fn end_line(&mut self) {
        let row_gap = i64::from(self.scopes.row_gap().unwrap_or(self.options.default_row_gap)) + 1;
        self.pending_lines = self.lines_remaining.min(row_gap);
        self.lines_remaining -= row_gap;
    }

    fn end_page(&mut self) {
        self.pending_lines += self.lines_remaining.max(0);
        if self.options.pad_with_blank_lines && self.pending_lines > 0 {
            self.write_end_of_lines(self.pending_lines);
        }
        self.pending_lines = 0;
        self.write_end_of_page();
    }

    fn end_document(&mut self) {
        let copies = self.options.copies as usize;
        if copies > 1 {
            self.output = self.output.repeat(copies);
        }
        debug!(
            "Rendered document: {} bytes in {} copies",
            self.output.len(),
            copies
        );
    }
}

impl DocumentHandler for GenericTextHandler {
    fn on_event(&mut self, event: DocumentEvent) {
        self.machine.accept(&event);
        match event {
            DocumentEvent::StartDocument(options) => {
                self.output.clear();
                self.scopes.clear();
                self.scopes.push(ScopeOptions::Layout(options));
                self.right_page = true;
            }
            DocumentEvent::StartVolume(options) => {
                self.scopes.push(ScopeOptions::Layout(options));
            }
            DocumentEvent::StartSection(options) => {
                self.scopes.push(ScopeOptions::Layout(options));
                self.ensure_right_page();
            }
            DocumentEvent::StartPage(options) => {
                self.scopes.push(ScopeOptions::Layout(options));
                self.start_page();
            }
            DocumentEvent::StartLine(options) => {
                self.scopes.push(ScopeOptions::Row(options));
                self.start_line();
            }
            DocumentEvent::Braille(text) => self.write_braille(&text),
            DocumentEvent::EndLine => {
                self.end_line();
                self.scopes.pop();
            }
            DocumentEvent::StartGraphic(options) => {
                self.scopes.push(ScopeOptions::Graphic(options));
            }
            DocumentEvent::EndGraphic => {
                self.scopes.pop();
            }
            DocumentEvent::EndPage => {
                self.end_page();
                self.scopes.pop();
            }
            DocumentEvent::EndSection => {
                self.ensure_right_page();
                self.scopes.pop();
            }
            DocumentEvent::EndVolume => {
                self.scopes.pop();
            }
            DocumentEvent::EndDocument => {
                self.scopes.pop();
                self.end_document();
            }
        }
    }
}

/// Render a complete event stream to embosser bytes.
///
/// # Panics
///
/// Panics if the events do not follow the document grammar.
pub fn to_bytes<I>(events: I, options: &TextRenderOptions) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = DocumentEvent>,
{
    let mut handler = GenericTextHandler::new(options.clone())?;
    handler.on_events(events);
    Ok(handler.into_bytes())
}
