//! Turning PEF XML into a document event stream.
//!
//! Unlike the tree reader this is lenient: unknown PEF elements are walked
//! through, invalid numbers are ignored and unresolvable graphics lose their
//! image. Rows inside `tg:graphic` become lines of the graphic.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::NsReader;

use super::xml::{attribute, decode, local_name, Ns};
use crate::document::{DocumentEvent, GraphicOptions, LayoutOptions, RowOptions};
use crate::error::{Error, Result};

/// An embedded image from `tg:images`.
#[derive(Debug, Default)]
struct ImageResource {
    encoding: Option<String>,
    data: String,
}

impl ImageResource {
    fn decode(&self, id: &str) -> Option<Vec<u8>> {
        let encoding = self.encoding.as_deref().unwrap_or_default();
        if !encoding.eq_ignore_ascii_case("base64") {
            warn!("Image {} has unsupported encoding \"{}\"", id, encoding);
            return None;
        }
        let compact: String = self.data.chars().filter(|c| !c.is_whitespace()).collect();
        match STANDARD.decode(compact) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("Image {} could not be decoded: {}", id, e);
                None
            }
        }
    }
}

/// Collect `/pef/tg:images/tg:imageData` elements by id.
fn collect_images(xml: &str) -> Result<HashMap<String, ImageResource>> {
    let mut reader = NsReader::from_str(xml);
    let mut path: Vec<(Ns, String)> = Vec::new();
    let mut images = HashMap::new();
    let mut current: Option<(String, ImageResource)> = None;

    loop {
        let (resolved, event) = reader.read_resolved_event()?;
        let ns = Ns::of(&resolved)?;
        match event {
            Event::Start(e) => {
                let name = local_name(&e)?;
                if let Some(image) = image_start(&path, ns, &name, &e)? {
                    current = Some(image);
                }
                path.push((ns, name));
            }
            Event::Empty(e) => {
                let name = local_name(&e)?;
                if let Some((id, image)) = image_start(&path, ns, &name, &e)? {
                    images.insert(id, image);
                }
            }
            Event::End(_) => {
                path.pop();
                if path.len() == 2 {
                    if let Some((id, image)) = current.take() {
                        images.insert(id, image);
                    }
                }
            }
            Event::Text(e) => {
                if let Some((_, image)) = current.as_mut() {
                    image.data.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some((_, image)) = current.as_mut() {
                    image.data.push_str(std::str::from_utf8(&e)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(images)
}

fn image_start(
    path: &[(Ns, String)],
    ns: Ns,
    name: &str,
    e: &BytesStart<'_>,
) -> Result<Option<(String, ImageResource)>> {
    let under_images = matches!(
        path,
        [(Ns::Pef, root), (Ns::Tg, images)] if root == "pef" && images == "images"
    );
    if !under_images || ns != Ns::Tg || name != "imageData" {
        return Ok(None);
    }
    let Some(id) = attribute(e, "id")? else {
        return Ok(None);
    };
    let image = ImageResource {
        encoding: attribute(e, "encoding")?,
        data: String::new(),
    };
    Ok(Some((id, image)))
}

fn number(e: &BytesStart<'_>, name: &str) -> Result<Option<u32>> {
    Ok(attribute(e, name)?.and_then(|value| match value.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!("Ignoring invalid {} value \"{}\"", name, value);
            None
        }
    }))
}

fn duplex(e: &BytesStart<'_>) -> Result<Option<bool>> {
    Ok(attribute(e, "duplex")?.and_then(|value| {
        match value.to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => {
                warn!("Ignoring invalid duplex value \"{}\"", value);
                None
            }
        }
    }))
}

fn layout(e: &BytesStart<'_>, with_duplex: bool) -> Result<LayoutOptions> {
    Ok(LayoutOptions {
        cells_per_line: number(e, "cols")?,
        lines_per_page: number(e, "rows")?,
        row_gap: number(e, "rowgap")?,
        duplex: if with_duplex { duplex(e)? } else { None },
    })
}

/// What leaving an element produces.
#[derive(Debug)]
enum Exit {
    Nothing,
    Event(DocumentEvent),
    Row,
}

struct EventBuilder {
    images: HashMap<String, ImageResource>,
    events: Vec<DocumentEvent>,
    exits: Vec<Exit>,
    skip_depth: usize,
    row_text: Option<String>,
    found_root: bool,
}

impl EventBuilder {
    fn start(&mut self, ns: Ns, e: &BytesStart<'_>) -> Result<()> {
        if self.skip_depth > 0 {
            self.skip_depth += 1;
            return Ok(());
        }
        let name = local_name(e)?;
        if self.exits.is_empty() {
            if self.found_root || !(ns == Ns::Pef && name == "pef") {
                return Err(Error::Format(format!(
                    "root element {} is not a PEF document",
                    name
                )));
            }
            self.found_root = true;
        }

        let exit = match (ns, name.as_str()) {
            (Ns::Pef, "head") => {
                self.skip_depth = 1;
                return Ok(());
            }
            (Ns::Pef, "body") => {
                self.events.push(DocumentEvent::start_document());
                Exit::Event(DocumentEvent::EndDocument)
            }
            (Ns::Pef, "volume") => {
                self.events
                    .push(DocumentEvent::StartVolume(layout(e, true)?));
                Exit::Event(DocumentEvent::EndVolume)
            }
            (Ns::Pef, "section") => {
                self.events
                    .push(DocumentEvent::StartSection(layout(e, true)?));
                Exit::Event(DocumentEvent::EndSection)
            }
            (Ns::Pef, "page") => {
                self.events
                    .push(DocumentEvent::StartPage(layout(e, false)?));
                Exit::Event(DocumentEvent::EndPage)
            }
            (Ns::Pef, "row") => {
                self.events.push(DocumentEvent::StartLine(RowOptions {
                    row_gap: number(e, "rowgap")?,
                }));
                self.row_text = Some(String::new());
                Exit::Row
            }
            (Ns::Tg, "graphic") => {
                let options = GraphicOptions {
                    height: number(e, "height")?,
                    width: number(e, "width")?,
                    indent: number(e, "indent")?,
                    image_data: self.resolve_image(e)?,
                };
                self.events.push(DocumentEvent::StartGraphic(options));
                Exit::Event(DocumentEvent::EndGraphic)
            }
            _ => Exit::Nothing,
        };
        self.exits.push(exit);
        Ok(())
    }

    fn resolve_image(&self, e: &BytesStart<'_>) -> Result<Option<Vec<u8>>> {
        let Some(id) = attribute(e, "idref")? else {
            return Ok(None);
        };
        match self.images.get(&id) {
            Some(image) => Ok(image.decode(&id)),
            None => {
                warn!("Graphic refers to missing image {}", id);
                Ok(None)
            }
        }
    }

    fn end(&mut self) {
        if self.skip_depth > 0 {
            self.skip_depth -= 1;
            return;
        }
        match self.exits.pop() {
            Some(Exit::Event(event)) => self.events.push(event),
            Some(Exit::Row) => {
                let text = self.row_text.take().unwrap_or_default();
                self.events.push(DocumentEvent::Braille(
                    text.trim_matches(|c: char| c <= ' ').to_string(),
                ));
                self.events.push(DocumentEvent::EndLine);
            }
            Some(Exit::Nothing) | None => {}
        }
    }

    fn text(&mut self, text: &str) {
        // Only direct text children of a row count.
        if self.skip_depth > 0 || !matches!(self.exits.last(), Some(Exit::Row)) {
            return;
        }
        if let Some(row) = self.row_text.as_mut() {
            row.push_str(text);
        }
    }

    fn start_nested(&mut self, ns: Ns, e: &BytesStart<'_>) -> Result<()> {
        // Elements inside a row contribute nothing.
        if self.skip_depth == 0 && matches!(self.exits.last(), Some(Exit::Row)) {
            self.skip_depth = 1;
            return Ok(());
        }
        self.start(ns, e)
    }
}

/// Parse PEF XML text into document events.
pub fn parse_events(xml: &str) -> Result<Vec<DocumentEvent>> {
    let mut builder = EventBuilder {
        images: collect_images(xml)?,
        events: Vec::new(),
        exits: Vec::new(),
        skip_depth: 0,
        row_text: None,
        found_root: false,
    };
    let mut reader = NsReader::from_str(xml);
    loop {
        let (resolved, event) = reader.read_resolved_event()?;
        let ns = Ns::of(&resolved)?;
        match event {
            Event::Start(e) => builder.start_nested(ns, &e)?,
            Event::Empty(e) => {
                builder.start_nested(ns, &e)?;
                builder.end();
            }
            Event::End(_) => builder.end(),
            Event::Text(e) => builder.text(&e.unescape()?),
            Event::CData(e) => builder.text(std::str::from_utf8(&e)?),
            Event::Eof => break,
            _ => {}
        }
    }
    if !builder.found_root {
        return Err(Error::Format("no pef element found".to_string()));
    }
    debug!(
        "Parsed {} events from PEF with {} images",
        builder.events.len(),
        builder.images.len()
    );
    Ok(builder.events)
}

/// Parse PEF bytes into document events.
pub fn parse_event_bytes(bytes: &[u8]) -> Result<Vec<DocumentEvent>> {
    parse_events(decode(bytes)?)
}
