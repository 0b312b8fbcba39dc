//! Generic text embosser configuration.
//!
//! A [`TextEmbosser`] describes a device which accepts plain ASCII braille.
//! Combined with [`EmbossingAttributes`] for a particular job it produces the
//! [`TextRenderOptions`] used by the rendering engine.

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::braille::BrlCell;
use crate::document::DocumentEvent;
use crate::error::{Error, Result};
use crate::filter::{EventStreamExt, PageRanges};
use crate::render::{to_bytes, LineEnding, PageEnding, TextRenderOptions};

const fn millimetres(units: u32, scale: u32) -> Decimal {
    Decimal::from_parts(units, 0, 0, false, scale)
}

/// A paper or page size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    pub width: Decimal,
    pub height: Decimal,
}

impl Rectangle {
    /// US letter, 216 x 279.4 mm.
    pub const LETTER: Rectangle = Rectangle::new(millimetres(216, 0), millimetres(2794, 1));

    /// ISO A4, 210 x 297 mm.
    pub const A4: Rectangle = Rectangle::new(millimetres(210, 0), millimetres(297, 0));

    /// Braille paper, 11.5 x 11 inches.
    pub const BRAILLE_11_5X11: Rectangle = Rectangle::new(millimetres(2921, 1), millimetres(2794, 1));

    /// Largest paper a generic embosser accepts.
    pub const LARGE_GENERIC: Rectangle = Rectangle::new(millimetres(1000, 0), millimetres(1000, 0));

    /// Smallest paper a generic embosser accepts.
    pub const SMALL_GENERIC: Rectangle = Rectangle::new(millimetres(30, 0), millimetres(30, 0));

    /// Create a rectangle.
    pub const fn new(width: Decimal, height: Decimal) -> Self {
        Self { width, height }
    }

    /// Whether this rectangle fits within `max` and covers `min`.
    pub fn fits_between(&self, min: &Rectangle, max: &Rectangle) -> bool {
        self.width >= min.width
            && self.height >= min.height
            && self.width <= max.width
            && self.height <= max.height
    }
}

/// Page margins in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Margins {
    pub left: Decimal,
    pub right: Decimal,
    pub top: Decimal,
    pub bottom: Decimal,
}

impl Margins {
    /// No margins at all.
    pub const NONE: Margins = Margins::new(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);

    /// Create margins.
    pub const fn new(left: Decimal, right: Decimal, top: Decimal, bottom: Decimal) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    fn clamped(&self) -> Self {
        let clamp = |m: Decimal| m.max(Decimal::ZERO);
        Self::new(
            clamp(self.left),
            clamp(self.right),
            clamp(self.top),
            clamp(self.bottom),
        )
    }
}

/// Settings for one embossing job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbossingAttributes {
    /// Cell geometry, NLS when unset
    pub cell: Option<BrlCell>,

    /// Paper size, the embosser's largest paper when unset
    pub paper: Option<Rectangle>,

    /// Requested margins
    pub margins: Margins,

    /// Number of copies
    pub copies: Option<u32>,

    /// Emboss on both sides
    pub interpoint: bool,

    /// Pages to emboss
    pub page_ranges: PageRanges,
}

impl EmbossingAttributes {
    /// Create empty attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cell type.
    pub fn with_cell(mut self, cell: BrlCell) -> Self {
        self.cell = Some(cell);
        self
    }

    /// Set the paper size.
    pub fn with_paper(mut self, paper: Rectangle) -> Self {
        self.paper = Some(paper);
        self
    }

    /// Set the margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Set the number of copies.
    pub fn with_copies(mut self, copies: u32) -> Self {
        self.copies = Some(copies);
        self
    }

    /// Enable or disable interpoint.
    pub fn with_interpoint(mut self, interpoint: bool) -> Self {
        self.interpoint = interpoint;
        self
    }

    /// Restrict embossing to some pages.
    pub fn with_page_ranges(mut self, ranges: PageRanges) -> Self {
        self.page_ranges = ranges;
        self
    }
}

/// An embosser accepting plain text ASCII braille.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEmbosser {
    id: String,
    model: String,
    max_paper: Rectangle,
    min_paper: Rectangle,
    add_margins: bool,
    line_ending: LineEnding,
    page_ending: PageEnding,
    pad_page: bool,
}

impl TextEmbosser {
    /// Create an embosser accepting any generic paper size.
    pub fn new(id: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            model: model.into(),
            max_paper: Rectangle::LARGE_GENERIC,
            min_paper: Rectangle::SMALL_GENERIC,
            add_margins: false,
            line_ending: LineEnding::default(),
            page_ending: PageEnding::default(),
            pad_page: false,
        }
    }

    /// Write margins as spaces and blank lines.
    pub fn with_add_margins(mut self, add_margins: bool) -> Self {
        self.add_margins = add_margins;
        self
    }

    /// Set the line ending.
    pub fn with_line_ending(mut self, ending: LineEnding) -> Self {
        self.line_ending = ending;
        self
    }

    /// Set the page ending.
    pub fn with_page_ending(mut self, ending: PageEnding) -> Self {
        self.page_ending = ending;
        self
    }

    /// Pad every page to its full length.
    pub fn with_pad_page(mut self, pad: bool) -> Self {
        self.pad_page = pad;
        self
    }

    /// Set the paper size limits.
    pub fn with_paper_limits(mut self, min: Rectangle, max: Rectangle) -> Self {
        self.min_paper = min;
        self.max_paper = max;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn manufacturer(&self) -> &str {
        "Generic"
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn maximum_paper(&self) -> Rectangle {
        self.max_paper
    }

    pub fn minimum_paper(&self) -> Rectangle {
        self.min_paper
    }

    pub fn adds_margins(&self) -> bool {
        self.add_margins
    }

    /// Compute render options for a job.
    pub fn create_renderer(&self, attributes: &EmbossingAttributes) -> Result<TextRenderOptions> {
        let cell = attributes.cell.unwrap_or_default();
        let paper = attributes.paper.unwrap_or(self.max_paper);
        if !paper.fits_between(&self.min_paper, &self.max_paper) {
            return Err(Error::Configuration(format!(
                "paper {}x{} mm is outside the range supported by {}",
                paper.width, paper.height, self.model
            )));
        }
        let margins = attributes.margins.clamped();

        let cells_per_line = cell.cells_for_width(paper.width - margins.left - margins.right);
        let lines_per_page = cell.lines_for_height(paper.height - margins.top - margins.bottom);
        let (left_margin, top_margin) = if self.add_margins {
            (
                cell.cells_for_width(margins.left),
                cell.lines_for_height(margins.top),
            )
        } else {
            (0, 0)
        };

        let end_of_line = self.line_ending.bytes();
        let options = TextRenderOptions::new()
            .with_cells_per_line(cells_per_line)
            .with_lines_per_page(lines_per_page)
            .with_left_margin(left_margin)
            .with_top_margin(top_margin)
            .with_copies(attributes.copies.unwrap_or(1))
            .with_interpoint(attributes.interpoint)
            .with_end_of_line(end_of_line)
            .with_end_of_page(self.page_ending.bytes(end_of_line))
            .with_padding(self.pad_page);
        options.validate()?;
        debug!(
            "{} renders {} cells by {} lines on {} cells",
            self.id, cells_per_line, lines_per_page, cell
        );
        Ok(options)
    }

    /// Emboss an event stream, keeping only the selected pages.
    pub fn emboss<I>(&self, events: I, attributes: &EmbossingAttributes) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = DocumentEvent>,
    {
        let options = self.create_renderer(attributes)?;
        let filtered = events
            .into_iter()
            .filter_pages(attributes.page_ranges.clone());
        to_bytes(filtered, &options)
    }
}

impl Default for TextEmbosser {
    fn default() -> Self {
        Self::new("generic.text", "Text only")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::single_page_document;

    fn mm(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn test_letter_nls_geometry() {
        let embosser = TextEmbosser::default();
        let attrs = EmbossingAttributes::new().with_paper(Rectangle::LETTER);
        let options = embosser.create_renderer(&attrs).unwrap();
        // 216 / 6.2 and 279.4 / 10
        assert_eq!(options.cells_per_line, 34);
        assert_eq!(options.lines_per_page, 27);
        assert_eq!(options.left_margin, 0);
        assert_eq!(options.end_of_line, b"\r\n");
        assert_eq!(options.end_of_page, b"\x0c");
        assert_eq!(options.copies, 1);
    }

    #[test]
    fn test_margins_reduce_area() {
        let embosser = TextEmbosser::default();
        let attrs = EmbossingAttributes::new()
            .with_paper(Rectangle::new(mm(248), mm(250)))
            .with_margins(Margins::new(mm(31), mm(31), mm(20), mm(-5)));
        let options = embosser.create_renderer(&attrs).unwrap();
        assert_eq!(options.cells_per_line, 30);
        assert_eq!(options.lines_per_page, 23);
        assert_eq!((options.left_margin, options.top_margin), (0, 0));

        let options = embosser
            .clone()
            .with_add_margins(true)
            .create_renderer(&attrs)
            .unwrap();
        assert_eq!((options.left_margin, options.top_margin), (5, 2));
    }

    #[test]
    fn test_paper_limits() {
        let embosser = TextEmbosser::default();
        let small = EmbossingAttributes::new().with_paper(Rectangle::new(mm(20), mm(100)));
        let large = EmbossingAttributes::new().with_paper(Rectangle::new(mm(100), mm(1001)));
        assert!(matches!(embosser.create_renderer(&small), Err(Error::Configuration(_))));
        assert!(matches!(embosser.create_renderer(&large), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_line_and_page_endings() {
        let embosser = TextEmbosser::default()
            .with_line_ending(LineEnding::Lf)
            .with_page_ending(PageEnding::EolFf);
        let options = embosser.create_renderer(&EmbossingAttributes::new()).unwrap();
        assert_eq!(options.end_of_line, b"\n");
        assert_eq!(options.end_of_page, b"\n\x0c");

        let embosser = embosser.with_page_ending(PageEnding::Eol);
        let options = embosser.create_renderer(&EmbossingAttributes::new()).unwrap();
        assert_eq!(options.end_of_page, b"\n");
    }

    #[test]
    fn test_emboss_with_page_ranges() {
        let mut events = single_page_document(["\u{2801}"]);
        let last = events.len() - 4;
        events.splice(
            last..last,
            [
                DocumentEvent::EndPage,
                DocumentEvent::start_page(),
                DocumentEvent::start_line(),
                DocumentEvent::braille("\u{2803}"),
                DocumentEvent::EndLine,
            ],
        );
        let embosser = TextEmbosser::default();
        let attrs = EmbossingAttributes::new()
            .with_paper(Rectangle::LETTER)
            .with_page_ranges(PageRanges::single(2).unwrap());
        assert_eq!(embosser.emboss(events, &attrs).unwrap(), b"B\x0c");
    }
}
