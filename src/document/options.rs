//! Options attached to start events and the scoped lookup over them.

use serde::{Deserialize, Serialize};

/// Layout options carried by document, volume, section and page start events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Braille cells per line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cells_per_line: Option<u32>,

    /// Lines per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines_per_page: Option<u32>,

    /// Blank lines added after each line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_gap: Option<u32>,

    /// Whether pages in this scope are embossed on both sides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplex: Option<bool>,
}

impl LayoutOptions {
    /// Create empty layout options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set cells per line.
    pub fn with_cells_per_line(mut self, cells: u32) -> Self {
        self.cells_per_line = Some(cells);
        self
    }

    /// Set lines per page.
    pub fn with_lines_per_page(mut self, lines: u32) -> Self {
        self.lines_per_page = Some(lines);
        self
    }

    /// Set the row gap.
    pub fn with_row_gap(mut self, gap: u32) -> Self {
        self.row_gap = Some(gap);
        self
    }

    /// Set duplex.
    pub fn with_duplex(mut self, duplex: bool) -> Self {
        self.duplex = Some(duplex);
        self
    }

    /// True when no option is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Options carried by a line start event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowOptions {
    /// Blank lines added after this line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_gap: Option<u32>,
}

impl RowOptions {
    /// Create empty row options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the row gap.
    pub fn with_row_gap(mut self, gap: u32) -> Self {
        self.row_gap = Some(gap);
        self
    }
}

/// Options carried by a graphic start event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphicOptions {
    /// Height of the graphic in lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Width of the graphic in cells
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Indent of the graphic in cells
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent: Option<u32>,

    /// Encoded image bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_data: Option<Vec<u8>>,
}

impl GraphicOptions {
    /// Create empty graphic options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the height in lines.
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Set the width in cells.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the indent in cells.
    pub fn with_indent(mut self, indent: u32) -> Self {
        self.indent = Some(indent);
        self
    }

    /// Attach image bytes.
    pub fn with_image_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.image_data = Some(data.into());
        self
    }
}

/// The options of one open scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeOptions {
    /// Document, volume, section or page scope
    Layout(LayoutOptions),
    /// Line scope
    Row(RowOptions),
    /// Graphic scope
    Graphic(GraphicOptions),
}

impl ScopeOptions {
    fn cells_per_line(&self) -> Option<u32> {
        match self {
            ScopeOptions::Layout(o) => o.cells_per_line,
            _ => None,
        }
    }

    fn lines_per_page(&self) -> Option<u32> {
        match self {
            ScopeOptions::Layout(o) => o.lines_per_page,
            _ => None,
        }
    }

    fn row_gap(&self) -> Option<u32> {
        match self {
            ScopeOptions::Layout(o) => o.row_gap,
            ScopeOptions::Row(o) => o.row_gap,
            ScopeOptions::Graphic(_) => None,
        }
    }

    fn duplex(&self) -> Option<bool> {
        match self {
            ScopeOptions::Layout(o) => o.duplex,
            _ => None,
        }
    }

    fn graphic(&self) -> Option<&GraphicOptions> {
        match self {
            ScopeOptions::Graphic(o) => Some(o),
            _ => None,
        }
    }
}

/// Stack of open scopes, innermost last.
///
/// Lookups return the value from the nearest enclosing scope that sets it.
#[derive(Debug, Clone, Default)]
pub struct OptionStack {
    scopes: Vec<ScopeOptions>,
}

impl OptionStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a scope.
    pub fn push(&mut self, options: ScopeOptions) {
        self.scopes.push(options);
    }

    /// Close the innermost scope.
    pub fn pop(&mut self) -> Option<ScopeOptions> {
        self.scopes.pop()
    }

    /// Drop every scope.
    pub fn clear(&mut self) {
        self.scopes.clear();
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Nearest value produced by `f`.
    pub fn nearest<T>(&self, f: impl Fn(&ScopeOptions) -> Option<T>) -> Option<T> {
        self.scopes.iter().rev().find_map(f)
    }

    /// Nearest cells-per-line option.
    pub fn cells_per_line(&self) -> Option<u32> {
        self.nearest(ScopeOptions::cells_per_line)
    }

    /// Nearest lines-per-page option.
    pub fn lines_per_page(&self) -> Option<u32> {
        self.nearest(ScopeOptions::lines_per_page)
    }

    /// Nearest row gap option.
    pub fn row_gap(&self) -> Option<u32> {
        self.nearest(ScopeOptions::row_gap)
    }

    /// Nearest duplex option.
    pub fn duplex(&self) -> Option<bool> {
        self.nearest(ScopeOptions::duplex)
    }

    /// Nearest open graphic scope.
    pub fn graphic(&self) -> Option<&GraphicOptions> {
        self.scopes.iter().rev().find_map(ScopeOptions::graphic)
    }

    /// Nearest image data of an open graphic scope.
    pub fn image_data(&self) -> Option<&[u8]> {
        self.scopes
            .iter()
            .rev()
            .filter_map(ScopeOptions::graphic)
            .find_map(|g| g.image_data.as_deref())
    }
}
