//! Reading PEF XML into a [`PefDocument`].
//!
//! The reader validates the structure of the PEF and Dublin Core elements
//! it understands. Elements from any other namespace are skipped along with
//! everything inside them.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::NsReader;

use super::model::{DcField, Meta, Page, PefDocument, Row, Section, Volume, DEFAULT_VERSION};
use super::xml::{attribute, decode, local_name, Ns};
use crate::error::{Error, Result};

const UNBOUNDED: usize = usize::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Element {
    Pef,
    Head,
    Meta,
    Body,
    Volume,
    Section,
    Page,
    Row,
    Dc(DcField),
}

impl Element {
    fn classify(ns: Ns, name: &str) -> Result<Option<Self>> {
        let element = match ns {
            Ns::Pef => match name {
                "pef" => Element::Pef,
                "head" => Element::Head,
                "meta" => Element::Meta,
                "body" => Element::Body,
                "volume" => Element::Volume,
                "section" => Element::Section,
                "page" => Element::Page,
                "row" => Element::Row,
                _ => return Err(Error::Format(format!("Unexpected element {}", name))),
            },
            Ns::Dc => match DcField::from_name(name) {
                Some(field) => Element::Dc(field),
                None => return Err(Error::Format(format!("Unexpected element dc:{}", name))),
            },
            Ns::Tg | Ns::Other => return Ok(None),
        };
        Ok(Some(element))
    }

    fn name(&self) -> String {
        match self {
            Element::Pef => "pef".to_string(),
            Element::Head => "head".to_string(),
            Element::Meta => "meta".to_string(),
            Element::Body => "body".to_string(),
            Element::Volume => "volume".to_string(),
            Element::Section => "section".to_string(),
            Element::Page => "page".to_string(),
            Element::Row => "row".to_string(),
            Element::Dc(field) => format!("dc:{}", field.name()),
        }
    }

    /// Permitted children with their minimum and maximum occurrences.
    fn children(&self) -> Vec<(Element, usize, usize)> {
        match self {
            Element::Pef => vec![(Element::Head, 1, 1), (Element::Body, 1, 1)],
            Element::Head => vec![(Element::Meta, 1, 1)],
            Element::Meta => DcField::ALL
                .iter()
                .map(|&field| {
                    let min = usize::from(field == DcField::Identifier);
                    let max = if field.is_single() { 1 } else { UNBOUNDED };
                    (Element::Dc(field), min, max)
                })
                .collect(),
            Element::Body => vec![(Element::Volume, 1, UNBOUNDED)],
            Element::Volume => vec![(Element::Section, 1, UNBOUNDED)],
            Element::Section => vec![(Element::Page, 1, UNBOUNDED)],
            Element::Page => vec![(Element::Row, 0, UNBOUNDED)],
            Element::Row | Element::Dc(_) => Vec::new(),
        }
    }

    fn has_text(&self) -> bool {
        matches!(self, Element::Row | Element::Dc(_))
    }
}

#[derive(Debug)]
struct Frame {
    element: Element,
    counts: HashMap<Element, usize>,
}

impl Frame {
    fn new(element: Element) -> Self {
        Self {
            element,
            counts: HashMap::new(),
        }
    }

    fn add_child(&mut self, child: Element) -> Result<()> {
        let rule = self
            .element
            .children()
            .into_iter()
            .find(|(e, _, _)| *e == child);
        let Some((_, _, max)) = rule else {
            return Err(Error::Format(format!(
                "Unexpected element {} in {}",
                child.name(),
                self.element.name()
            )));
        };
        let count = self.counts.entry(child).or_insert(0);
        *count += 1;
        if *count > max {
            return Err(Error::Format(format!(
                "{} allows at most {} {}",
                self.element.name(),
                max,
                child.name()
            )));
        }
        Ok(())
    }

    fn check_minimums(&self) -> Result<()> {
        for (child, min, _) in self.element.children() {
            let count = self.counts.get(&child).copied().unwrap_or(0);
            if count < min {
                return Err(Error::Format(format!(
                    "{} requires at least {} {}, found {}",
                    self.element.name(),
                    min,
                    child.name(),
                    count
                )));
            }
        }
        Ok(())
    }
}

fn parse_number(value: &str, name: &str) -> Result<u32> {
    value.trim().parse().map_err(|_| {
        Error::Format(format!("invalid value \"{}\" for attribute {}", value, name))
    })
}

fn parse_flag(value: &str, name: &str) -> Result<bool> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(Error::Format(format!(
            "invalid value \"{}\" for attribute {}",
            value, name
        ))),
    }
}

fn number_attribute(e: &BytesStart<'_>, name: &str) -> Result<Option<u32>> {
    attribute(e, name)?
        .map(|v| parse_number(&v, name))
        .transpose()
}

fn flag_attribute(e: &BytesStart<'_>, name: &str) -> Result<Option<bool>> {
    attribute(e, name)?.map(|v| parse_flag(&v, name)).transpose()
}

/// Builds the tree while walking the XML events.
#[derive(Debug, Default)]
struct TreeBuilder {
    stack: Vec<Frame>,
    skip_depth: usize,
    found_root: bool,
    version: Option<String>,
    meta: Option<Meta>,
    volumes: Vec<Volume>,
    sections: Vec<Section>,
    pages: Vec<Page>,
    volume: Option<Volume>,
    section: Option<Section>,
    page: Option<Page>,
    row_gap: Option<u32>,
    text: String,
}

impl TreeBuilder {
    fn start(&mut self, ns: Ns, e: &BytesStart<'_>) -> Result<()> {
        if self.skip_depth > 0 {
            self.skip_depth += 1;
            return Ok(());
        }
        let name = local_name(e)?;
        let element = match Element::classify(ns, &name)? {
            Some(element) => element,
            None if self.stack.is_empty() => {
                return Err(Error::Format(format!(
                    "root element {} is not a PEF document",
                    name
                )))
            }
            None => {
                debug!("Skipping foreign element {}", name);
                self.skip_depth = 1;
                return Ok(());
            }
        };

        match self.stack.last_mut() {
            Some(parent) => parent.add_child(element)?,
            None if element == Element::Pef && !self.found_root => self.found_root = true,
            None => {
                return Err(Error::Format(format!(
                    "root element {} is not a PEF document",
                    element.name()
                )))
            }
        }

        match element {
            Element::Pef => self.version = attribute(e, "version")?,
            Element::Meta => self.meta = Some(Meta::new(String::new())),
            Element::Volume => {
                let mut volume = Volume::default();
                if let Some(cols) = number_attribute(e, "cols")? {
                    volume.cols = cols;
                }
                if let Some(rows) = number_attribute(e, "rows")? {
                    volume.rows = rows;
                }
                if let Some(gap) = number_attribute(e, "rowgap")? {
                    volume.row_gap = gap;
                }
                if let Some(duplex) = flag_attribute(e, "duplex")? {
                    volume.duplex = duplex;
                }
                self.volume = Some(volume);
                self.sections.clear();
            }
            Element::Section => {
                let mut section = Section::default();
                section.cols = number_attribute(e, "cols")?;
                section.rows = number_attribute(e, "rows")?;
                section.row_gap = number_attribute(e, "rowgap")?;
                section.duplex = flag_attribute(e, "duplex")?;
                self.section = Some(section);
                self.pages.clear();
            }
            Element::Page => {
                self.page = Some(Page {
                    row_gap: number_attribute(e, "rowgap")?,
                    rows: Vec::new(),
                });
            }
            Element::Row => {
                self.row_gap = number_attribute(e, "rowgap")?;
                self.text.clear();
            }
            Element::Dc(_) => self.text.clear(),
            Element::Head | Element::Body => {}
        }

        self.stack.push(Frame::new(element));
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        if self.skip_depth > 0 {
            self.skip_depth -= 1;
            return Ok(());
        }
        let Some(frame) = self.stack.pop() else {
            return Err(Error::Format("unbalanced end element".to_string()));
        };
        frame.check_minimums()?;

        match frame.element {
            Element::Row => {
                if let Some(page) = self.page.as_mut() {
                    page.rows.push(Row {
                        braille: std::mem::take(&mut self.text),
                        row_gap: self.row_gap.take(),
                    });
                }
            }
            Element::Page => {
                if let Some(page) = self.page.take() {
                    self.pages.push(page);
                }
            }
            Element::Section => {
                if let Some(section) = self.section.take() {
                    let pages = std::mem::take(&mut self.pages);
                    self.sections.push(section.with_pages(pages));
                }
            }
            Element::Volume => {
                if let Some(volume) = self.volume.take() {
                    let sections = std::mem::take(&mut self.sections);
                    self.volumes.push(volume.with_sections(sections));
                }
            }
            Element::Dc(field) => {
                if let Some(meta) = self.meta.as_mut() {
                    meta.add(field, std::mem::take(&mut self.text));
                }
            }
            Element::Pef | Element::Head | Element::Meta | Element::Body => {}
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if self.skip_depth > 0 {
            return;
        }
        if self.stack.last().is_some_and(|f| f.element.has_text()) {
            self.text.push_str(text);
        }
    }

    fn finish(self) -> Result<PefDocument> {
        if !self.found_root {
            return Err(Error::Format("no pef element found".to_string()));
        }
        if !self.stack.is_empty() {
            return Err(Error::Format("unexpected end of document".to_string()));
        }
        let meta = self
            .meta
            .ok_or_else(|| Error::Format("pef requires a meta element".to_string()))?;
        let version = self.version.unwrap_or_else(|| DEFAULT_VERSION.to_string());
        debug!(
            "Read PEF {} with {} volumes",
            meta.identifier,
            self.volumes.len()
        );
        Ok(PefDocument::from_parts(version, meta, self.volumes))
    }
}

/// Read a PEF document from XML text.
pub fn read_str(xml: &str) -> Result<PefDocument> {
    let mut reader = NsReader::from_str(xml);
    let mut builder = TreeBuilder::default();
    loop {
        let (resolved, event) = reader.read_resolved_event()?;
        let ns = Ns::of(&resolved)?;
        match event {
            Event::Start(e) => builder.start(ns, &e)?,
            Event::Empty(e) => {
                builder.start(ns, &e)?;
                builder.end()?;
            }
            Event::End(_) => builder.end()?,
            Event::Text(e) => builder.text(&e.unescape()?),
            Event::CData(e) => builder.text(std::str::from_utf8(&e)?),
            Event::Eof => break,
            _ => {}
        }
    }
    builder.finish()
}

/// Read a PEF document from UTF-8 bytes.
pub fn read_bytes(bytes: &[u8]) -> Result<PefDocument> {
    read_str(decode(bytes)?)
}

/// Read a PEF document from a reader.
pub fn read<R: Read>(mut reader: R) -> Result<PefDocument> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    read_bytes(&buffer)
}

/// Read a PEF document from a file.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<PefDocument> {
    let bytes = std::fs::read(path)?;
    read_bytes(&bytes)
}
