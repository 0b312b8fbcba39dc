//! Text rendering options and configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Options for the generic text rendering engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRenderOptions {
    /// Maximum braille cells per line
    pub cells_per_line: u32,

    /// Maximum lines per page
    pub lines_per_page: u32,

    /// Emboss on both sides of the sheet
    pub interpoint: bool,

    /// Spaces written before every line
    pub left_margin: u32,

    /// Blank lines written at the top of every page
    pub top_margin: u32,

    /// Number of copies of the whole document
    pub copies: u32,

    /// Bytes ending a line
    pub end_of_line: Vec<u8>,

    /// Bytes ending a page
    pub end_of_page: Vec<u8>,

    /// Fill the rest of every page with blank lines
    pub pad_with_blank_lines: bool,

    /// Row gap used when no scope sets one
    pub default_row_gap: u32,
}

impl TextRenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum cells per line.
    pub fn with_cells_per_line(mut self, cells: u32) -> Self {
        self.cells_per_line = cells;
        self
    }

    /// Set the maximum lines per page.
    pub fn with_lines_per_page(mut self, lines: u32) -> Self {
        self.lines_per_page = lines;
        self
    }

    /// Enable or disable interpoint.
    pub fn with_interpoint(mut self, interpoint: bool) -> Self {
        self.interpoint = interpoint;
        self
    }

    /// Set the left margin in cells.
    pub fn with_left_margin(mut self, cells: u32) -> Self {
        self.left_margin = cells;
        self
    }

    /// Set the top margin in lines.
    pub fn with_top_margin(mut self, lines: u32) -> Self {
        self.top_margin = lines;
        self
    }

    /// Set the number of copies.
    pub fn with_copies(mut self, copies: u32) -> Self {
        self.copies = copies;
        self
    }

    /// Set raw end-of-line bytes.
    pub fn with_end_of_line(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.end_of_line = bytes.into();
        self
    }

    /// Set raw end-of-page bytes.
    pub fn with_end_of_page(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.end_of_page = bytes.into();
        self
    }

    /// Set the end-of-line convention.
    pub fn with_line_ending(mut self, ending: LineEnding) -> Self {
        self.end_of_line = ending.bytes().to_vec();
        self
    }

    /// Set the end-of-page convention, built from the current end-of-line bytes.
    pub fn with_page_ending(mut self, ending: PageEnding) -> Self {
        self.end_of_page = ending.bytes(&self.end_of_line);
        self
    }

    /// Enable or disable bottom padding.
    pub fn with_padding(mut self, pad: bool) -> Self {
        self.pad_with_blank_lines = pad;
        self
    }

    /// Set the default row gap.
    pub fn with_default_row_gap(mut self, gap: u32) -> Self {
        self.default_row_gap = gap;
        self
    }

    /// Check the options describe something an embosser can produce.
    pub fn validate(&self) -> Result<()> {
        if self.cells_per_line == 0 {
            return Err(Error::Configuration(
                "cells per line must be at least 1".to_string(),
            ));
        }
        if self.lines_per_page == 0 {
            return Err(Error::Configuration(
                "lines per page must be at least 1".to_string(),
            ));
        }
        if self.copies == 0 {
            return Err(Error::Configuration("copies must be at least 1".to_string()));
        }
        if self.left_margin >= self.cells_per_line {
            return Err(Error::Configuration(format!(
                "left margin of {} cells leaves no room on a {} cell line",
                self.left_margin, self.cells_per_line
            )));
        }
        if self.end_of_page.is_empty() {
            return Err(Error::Configuration(
                "end of page bytes must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for TextRenderOptions {
    fn default() -> Self {
        Self {
            cells_per_line: 40,
            lines_per_page: 25,
            interpoint: false,
            left_margin: 0,
            top_margin: 0,
            copies: 1,
            end_of_line: b"\r\n".to_vec(),
            end_of_page: b"\x0c".to_vec(),
            pad_with_blank_lines: false,
            default_row_gap: 0,
        }
    }
}

/// End-of-line convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LineEnding {
    /// Carriage return followed by line feed
    #[default]
    CrLf,
    /// Line feed only
    Lf,
    /// Carriage return only
    Cr,
}

impl LineEnding {
    /// Bytes of this line ending.
    pub fn bytes(&self) -> &'static [u8] {
        match self {
            LineEnding::CrLf => b"\r\n",
            LineEnding::Lf => b"\n",
            LineEnding::Cr => b"\r",
        }
    }
}

/// End-of-page convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PageEnding {
    /// Form feed only
    #[default]
    Ff,
    /// Line ending then form feed
    EolFf,
    /// Line ending only
    Eol,
}

impl PageEnding {
    /// Bytes of this page ending given the line ending in use.
    pub fn bytes(&self, end_of_line: &[u8]) -> Vec<u8> {
        match self {
            PageEnding::Ff => b"\x0c".to_vec(),
            PageEnding::EolFf => {
                let mut bytes = end_of_line.to_vec();
                bytes.push(0x0c);
                bytes
            }
            PageEnding::Eol => end_of_line.to_vec(),
        }
    }
}
