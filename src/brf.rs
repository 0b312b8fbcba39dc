//! Reading Braille Ready Format (BRF) files.
//!
//! A BRF file is ASCII braille with CR/LF/CRLF line breaks and form feeds
//! between pages. The whole file becomes one volume with one section.

use std::collections::VecDeque;
use std::io::Read;

use log::debug;

use crate::document::DocumentEvent;
use crate::error::Result;

const FORM_FEED: u8 = 0x0c;

/// Internal state for the BRF parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Document envelope not yet emitted
    Initial,
    /// Reading bytes
    Body,
    /// Document closed
    Done,
}

/// Lazy parser yielding document events from BRF bytes.
///
/// Blank lines between text lines become lines without braille; breaks at
/// the end of the input produce nothing.
#[derive(Debug, Clone)]
pub struct BrfParser<'a> {
    input: &'a [u8],
    position: usize,
    state: ParseState,
    queue: VecDeque<DocumentEvent>,
    line: String,
    new_lines: u32,
    new_pages: u32,
    previous: Option<u8>,
}

impl<'a> BrfParser<'a> {
    /// Create a parser over BRF bytes.
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            position: 0,
            state: ParseState::Initial,
            queue: VecDeque::new(),
            line: String::new(),
            new_lines: 0,
            new_pages: 0,
            previous: None,
        }
    }

    fn flush_line(&mut self) {
        if !self.line.is_empty() {
            self.queue.push_back(DocumentEvent::start_line());
            self.queue
                .push_back(DocumentEvent::Braille(std::mem::take(&mut self.line)));
            self.queue.push_back(DocumentEvent::EndLine);
        }
    }

    fn process(&mut self, byte: u8) {
        match byte {
            FORM_FEED => {
                self.new_lines = 0;
                self.new_pages += 1;
                self.flush_line();
            }
            b'\n' => {
                if self.previous != Some(b'\r') {
                    self.new_lines += 1;
                    self.flush_line();
                }
            }
            b'\r' => {
                self.new_lines += 1;
                self.flush_line();
            }
            _ => {
                for _ in 0..self.new_pages {
                    self.queue.push_back(DocumentEvent::EndPage);
                    self.queue.push_back(DocumentEvent::start_page());
                }
                self.new_pages = 0;
                for _ in 1..self.new_lines {
                    self.queue.push_back(DocumentEvent::start_line());
                    self.queue.push_back(DocumentEvent::EndLine);
                }
                self.new_lines = 0;
                self.line.push(if byte.is_ascii() {
                    char::from(byte)
                } else {
                    char::REPLACEMENT_CHARACTER
                });
            }
        }
        self.previous = Some(byte);
    }
}

impl Iterator for BrfParser<'_> {
    type Item = DocumentEvent;

    fn next(&mut self) -> Option<DocumentEvent> {
        loop {
            if let Some(event) = self.queue.pop_front() {
                return Some(event);
            }
            match self.state {
                ParseState::Initial => {
                    self.queue.extend([
                        DocumentEvent::start_document(),
                        DocumentEvent::start_volume(),
                        DocumentEvent::start_section(),
                        DocumentEvent::start_page(),
                    ]);
                    self.state = ParseState::Body;
                }
                ParseState::Body => match self.input.get(self.position) {
                    Some(&byte) => {
                        self.position += 1;
                        self.process(byte);
                    }
                    None => {
                        self.flush_line();
                        self.queue.extend([
                            DocumentEvent::EndPage,
                            DocumentEvent::EndSection,
                            DocumentEvent::EndVolume,
                            DocumentEvent::EndDocument,
                        ]);
                        self.state = ParseState::Done;
                        debug!("Parsed {} bytes of BRF", self.input.len());
                    }
                },
                ParseState::Done => return None,
            }
        }
    }
}

/// Parse BRF bytes into a complete event stream.
pub fn parse_bytes(input: &[u8]) -> Vec<DocumentEvent> {
    BrfParser::new(input).collect()
}

/// Read and parse a BRF stream.
pub fn parse_reader<R: Read>(mut reader: R) -> Result<Vec<DocumentEvent>> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    Ok(parse_bytes(&buffer))
}
