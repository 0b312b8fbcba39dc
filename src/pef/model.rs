//! The PEF document tree.
//!
//! Layout attributes on sections, pages and rows are optional and inherit
//! from the enclosing node. Inheritance is resolved by passing the enclosing
//! nodes to the `*_value` methods.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Namespace of PEF elements.
pub const PEF_NAMESPACE: &str = "http://www.daisy.org/ns/2008/pef";

/// Namespace of Dublin Core metadata elements.
pub const DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";

/// Namespace of the tactile graphics extension.
pub const TG_NAMESPACE: &str = "http://www.aph.org/ns/tactile-graphics/1.0";

/// PEF version written when none is given.
pub const DEFAULT_VERSION: &str = "2008-1";

/// Media type stored in `dc:format`.
pub const PEF_FORMAT: &str = "application/x-pef+xml";

/// Dublin Core metadata elements, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DcField {
    Contributor,
    Coverage,
    Creator,
    Date,
    Description,
    Format,
    Identifier,
    Language,
    Publisher,
    Relation,
    Rights,
    Source,
    Subject,
    Title,
    Type,
}

impl DcField {
    /// Every field in the order they are written.
    pub const ALL: [DcField; 15] = [
        DcField::Contributor,
        DcField::Coverage,
        DcField::Creator,
        DcField::Date,
        DcField::Description,
        DcField::Format,
        DcField::Identifier,
        DcField::Language,
        DcField::Publisher,
        DcField::Relation,
        DcField::Rights,
        DcField::Source,
        DcField::Subject,
        DcField::Title,
        DcField::Type,
    ];

    /// Local element name.
    pub fn name(&self) -> &'static str {
        match self {
            DcField::Contributor => "contributor",
            DcField::Coverage => "coverage",
            DcField::Creator => "creator",
            DcField::Date => "date",
            DcField::Description => "description",
            DcField::Format => "format",
            DcField::Identifier => "identifier",
            DcField::Language => "language",
            DcField::Publisher => "publisher",
            DcField::Relation => "relation",
            DcField::Rights => "rights",
            DcField::Source => "source",
            DcField::Subject => "subject",
            DcField::Title => "title",
            DcField::Type => "type",
        }
    }

    /// Look a field up by local element name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Whether the field holds at most one value.
    pub fn is_single(&self) -> bool {
        matches!(
            self,
            DcField::Date
                | DcField::Description
                | DcField::Format
                | DcField::Identifier
                | DcField::Title
        )
    }
}

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub identifier: String,
    pub format: String,
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub contributors: Vec<String>,
    pub coverages: Vec<String>,
    pub creators: Vec<String>,
    pub languages: Vec<String>,
    pub publishers: Vec<String>,
    pub relations: Vec<String>,
    pub rights: Vec<String>,
    pub sources: Vec<String>,
    pub subjects: Vec<String>,
    pub types: Vec<String>,
}

impl Meta {
    /// Metadata with an identifier and the PEF format.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            format: PEF_FORMAT.to_string(),
            title: None,
            date: None,
            description: None,
            contributors: Vec::new(),
            coverages: Vec::new(),
            creators: Vec::new(),
            languages: Vec::new(),
            publishers: Vec::new(),
            relations: Vec::new(),
            rights: Vec::new(),
            sources: Vec::new(),
            subjects: Vec::new(),
            types: Vec::new(),
        }
    }

    fn list_mut(&mut self, field: DcField) -> Option<&mut Vec<String>> {
        match field {
            DcField::Contributor => Some(&mut self.contributors),
            DcField::Coverage => Some(&mut self.coverages),
            DcField::Creator => Some(&mut self.creators),
            DcField::Language => Some(&mut self.languages),
            DcField::Publisher => Some(&mut self.publishers),
            DcField::Relation => Some(&mut self.relations),
            DcField::Rights => Some(&mut self.rights),
            DcField::Source => Some(&mut self.sources),
            DcField::Subject => Some(&mut self.subjects),
            DcField::Type => Some(&mut self.types),
            _ => None,
        }
    }

    /// Set a single field, or append to a repeatable one.
    pub fn add(&mut self, field: DcField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DcField::Identifier => self.identifier = value,
            DcField::Format => self.format = value,
            DcField::Title => self.title = Some(value),
            DcField::Date => self.date = Some(value),
            DcField::Description => self.description = Some(value),
            _ => {
                if let Some(list) = self.list_mut(field) {
                    list.push(value);
                }
            }
        }
    }

    /// Values of a field; single fields yield at most one.
    pub fn values(&self, field: DcField) -> Vec<&str> {
        fn single(v: &Option<String>) -> Vec<&str> {
            v.iter().map(String::as_str).collect()
        }
        fn many(v: &[String]) -> Vec<&str> {
            v.iter().map(String::as_str).collect()
        }
        match field {
            DcField::Identifier => vec![self.identifier.as_str()],
            DcField::Format => vec![self.format.as_str()],
            DcField::Title => single(&self.title),
            DcField::Date => single(&self.date),
            DcField::Description => single(&self.description),
            DcField::Contributor => many(&self.contributors),
            DcField::Coverage => many(&self.coverages),
            DcField::Creator => many(&self.creators),
            DcField::Language => many(&self.languages),
            DcField::Publisher => many(&self.publishers),
            DcField::Relation => many(&self.relations),
            DcField::Rights => many(&self.rights),
            DcField::Source => many(&self.sources),
            DcField::Subject => many(&self.subjects),
            DcField::Type => many(&self.types),
        }
    }
}

/// A row of braille.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Unicode braille text
    pub braille: String,
    /// Blank lines after the row, inherited when unset
    pub row_gap: Option<u32>,
}

impl Row {
    /// A row of braille text.
    pub fn new(braille: impl Into<String>) -> Self {
        Self {
            braille: braille.into(),
            row_gap: None,
        }
    }

    /// Set the row gap.
    pub fn with_row_gap(mut self, gap: u32) -> Self {
        self.row_gap = Some(gap);
        self
    }

    /// Effective row gap.
    pub fn row_gap_value(&self, page: &Page, section: &Section, volume: &Volume) -> u32 {
        self.row_gap
            .unwrap_or_else(|| page.row_gap_value(section, volume))
    }
}

/// A page of rows; a page may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Blank lines after each row, inherited when unset
    pub row_gap: Option<u32>,
    /// Rows in order
    pub rows: Vec<Row>,
}

impl Page {
    /// An empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row of braille, returning it.
    pub fn append_row(&mut self, braille: impl Into<String>) -> &mut Row {
        self.rows.push(Row::new(braille));
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    /// Effective row gap.
    pub fn row_gap_value(&self, section: &Section, volume: &Volume) -> u32 {
        self.row_gap
            .unwrap_or_else(|| section.row_gap_value(volume))
    }
}

/// A section of pages; always holds at least one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub cols: Option<u32>,
    pub rows: Option<u32>,
    pub row_gap: Option<u32>,
    pub duplex: Option<bool>,
    pages: Vec<Page>,
}

impl Default for Section {
    fn default() -> Self {
        Self {
            cols: None,
            rows: None,
            row_gap: None,
            duplex: None,
            pages: vec![Page::default()],
        }
    }
}

impl Section {
    /// A section holding one empty page.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_pages(mut self, pages: Vec<Page>) -> Self {
        self.pages = pages;
        self
    }

    /// Pages in order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page at an index.
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Mutable page at an index.
    pub fn page_mut(&mut self, index: usize) -> Option<&mut Page> {
        self.pages.get_mut(index)
    }

    /// Append an empty page, returning it.
    pub fn append_page(&mut self) -> &mut Page {
        self.pages.push(Page::default());
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Insert an empty page before `index`.
    pub fn insert_page(&mut self, index: usize) -> Result<&mut Page> {
        if index > self.pages.len() {
            return Err(Error::InvalidStructure(format!(
                "page index {} out of range for {} pages",
                index,
                self.pages.len()
            )));
        }
        self.pages.insert(index, Page::default());
        Ok(&mut self.pages[index])
    }

    /// Remove a page; the last page cannot be removed.
    pub fn remove_page(&mut self, index: usize) -> Result<Page> {
        remove_child(&mut self.pages, index, "section", "page")
    }

    /// Effective cells per line.
    pub fn cols_value(&self, volume: &Volume) -> u32 {
        self.cols.unwrap_or(volume.cols)
    }

    /// Effective lines per page.
    pub fn rows_value(&self, volume: &Volume) -> u32 {
        self.rows.unwrap_or(volume.rows)
    }

    /// Effective row gap.
    pub fn row_gap_value(&self, volume: &Volume) -> u32 {
        self.row_gap.unwrap_or(volume.row_gap)
    }

    /// Effective duplex flag.
    pub fn duplex_value(&self, volume: &Volume) -> bool {
        self.duplex.unwrap_or(volume.duplex)
    }
}

/// A volume of sections; always holds at least one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    pub cols: u32,
    pub rows: u32,
    pub row_gap: u32,
    pub duplex: bool,
    sections: Vec<Section>,
}

impl Default for Volume {
    fn default() -> Self {
        Self {
            cols: 1,
            rows: 1,
            row_gap: 0,
            duplex: false,
            sections: vec![Section::default()],
        }
    }
}

impl Volume {
    /// A volume holding one section with one empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// A volume with the given page geometry.
    pub fn with_layout(cols: u32, rows: u32, duplex: bool) -> Self {
        Self {
            cols,
            rows,
            duplex,
            ..Self::default()
        }
    }

    pub(crate) fn with_sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = sections;
        self
    }

    /// Sections in order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Section at an index.
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Mutable section at an index.
    pub fn section_mut(&mut self, index: usize) -> Option<&mut Section> {
        self.sections.get_mut(index)
    }

    /// Append a section holding one empty page, returning it.
    pub fn append_section(&mut self) -> &mut Section {
        self.sections.push(Section::default());
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    /// Remove a section; the last section cannot be removed.
    pub fn remove_section(&mut self, index: usize) -> Result<Section> {
        remove_child(&mut self.sections, index, "volume", "section")
    }
}

/// A PEF document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PefDocument {
    pub version: String,
    pub meta: Meta,
    volumes: Vec<Volume>,
}

impl PefDocument {
    /// A document holding one default volume.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            meta: Meta::new(identifier),
            volumes: vec![Volume::default()],
        }
    }

    /// Set the PEF version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub(crate) fn from_parts(version: String, meta: Meta, volumes: Vec<Volume>) -> Self {
        Self {
            version,
            meta,
            volumes,
        }
    }

    /// Volumes in order.
    pub fn volumes(&self) -> &[Volume] {
        &self.volumes
    }

    /// Number of volumes.
    pub fn volume_count(&self) -> usize {
        self.volumes.len()
    }

    /// Volume at an index.
    pub fn volume(&self, index: usize) -> Option<&Volume> {
        self.volumes.get(index)
    }

    /// Mutable volume at an index.
    pub fn volume_mut(&mut self, index: usize) -> Option<&mut Volume> {
        self.volumes.get_mut(index)
    }

    /// Append a default volume, returning it.
    pub fn append_volume(&mut self) -> &mut Volume {
        self.volumes.push(Volume::default());
        let last = self.volumes.len() - 1;
        &mut self.volumes[last]
    }

    /// Remove a volume; the last volume cannot be removed.
    pub fn remove_volume(&mut self, index: usize) -> Result<Volume> {
        remove_child(&mut self.volumes, index, "document", "volume")
    }

    /// Total number of pages.
    pub fn page_count(&self) -> usize {
        self.volumes
            .iter()
            .flat_map(|v| v.sections())
            .map(Section::page_count)
            .sum()
    }
}

fn remove_child<T>(children: &mut Vec<T>, index: usize, parent: &str, child: &str) -> Result<T> {
    if index >= children.len() {
        return Err(Error::InvalidStructure(format!(
            "{} index {} out of range for {} {}s",
            child,
            index,
            children.len(),
            child
        )));
    }
    if children.len() == 1 {
        return Err(Error::InvalidStructure(format!(
            "a {} must keep at least one {}",
            parent, child
        )));
    }
    Ok(children.remove(index))
}
