//! Writing a [`PefDocument`] as indented PEF XML.

use std::io::Write;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::model::{
    DcField, Page, PefDocument, Section, Volume, DC_NAMESPACE, PEF_NAMESPACE,
};
use crate::error::Result;

fn flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

struct PefWriter<W: Write> {
    xml: Writer<W>,
}

impl<W: Write> PefWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            xml: Writer::new_with_indent(inner, b' ', 1),
        }
    }

    fn document(&mut self, doc: &PefDocument) -> Result<()> {
        self.xml
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("pef");
        root.push_attribute(("xmlns", PEF_NAMESPACE));
        root.push_attribute(("version", doc.version.as_str()));
        self.xml.write_event(Event::Start(root))?;

        self.xml.write_event(Event::Start(BytesStart::new("head")))?;
        let mut meta = BytesStart::new("meta");
        meta.push_attribute(("xmlns:dc", DC_NAMESPACE));
        self.xml.write_event(Event::Start(meta))?;
        for field in DcField::ALL {
            let name = format!("dc:{}", field.name());
            for value in doc.meta.values(field) {
                self.text_element(&name, value)?;
            }
        }
        self.xml.write_event(Event::End(BytesEnd::new("meta")))?;
        self.xml.write_event(Event::End(BytesEnd::new("head")))?;

        self.xml.write_event(Event::Start(BytesStart::new("body")))?;
        for volume in doc.volumes() {
            self.volume(volume)?;
        }
        self.xml.write_event(Event::End(BytesEnd::new("body")))?;
        self.xml.write_event(Event::End(BytesEnd::new("pef")))?;
        self.xml.get_mut().write_all(b"\n")?;
        Ok(())
    }

    fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        if text.is_empty() {
            self.xml.write_event(Event::Empty(BytesStart::new(name)))?;
        } else {
            self.xml.write_event(Event::Start(BytesStart::new(name)))?;
            self.xml.write_event(Event::Text(BytesText::new(text)))?;
            self.xml.write_event(Event::End(BytesEnd::new(name)))?;
        }
        Ok(())
    }

    fn volume(&mut self, volume: &Volume) -> Result<()> {
        let mut start = BytesStart::new("volume");
        start.push_attribute(("cols", volume.cols.to_string().as_str()));
        start.push_attribute(("duplex", flag(volume.duplex)));
        start.push_attribute(("rowgap", volume.row_gap.to_string().as_str()));
        start.push_attribute(("rows", volume.rows.to_string().as_str()));
        self.xml.write_event(Event::Start(start))?;
        for section in volume.sections() {
            self.section(section)?;
        }
        self.xml.write_event(Event::End(BytesEnd::new("volume")))?;
        Ok(())
    }

    fn section(&mut self, section: &Section) -> Result<()> {
        let mut start = BytesStart::new("section");
        if let Some(cols) = section.cols {
            start.push_attribute(("cols", cols.to_string().as_str()));
        }
        if let Some(duplex) = section.duplex {
            start.push_attribute(("duplex", flag(duplex)));
        }
        if let Some(gap) = section.row_gap {
            start.push_attribute(("rowgap", gap.to_string().as_str()));
        }
        if let Some(rows) = section.rows {
            start.push_attribute(("rows", rows.to_string().as_str()));
        }
        self.xml.write_event(Event::Start(start))?;
        for page in section.pages() {
            self.page(page)?;
        }
        self.xml.write_event(Event::End(BytesEnd::new("section")))?;
        Ok(())
    }

    fn page(&mut self, page: &Page) -> Result<()> {
        let mut start = BytesStart::new("page");
        if let Some(gap) = page.row_gap {
            start.push_attribute(("rowgap", gap.to_string().as_str()));
        }
        if page.rows.is_empty() {
            self.xml.write_event(Event::Empty(start))?;
            return Ok(());
        }
        self.xml.write_event(Event::Start(start))?;
        for row in &page.rows {
            let mut start = BytesStart::new("row");
            if let Some(gap) = row.row_gap {
                start.push_attribute(("rowgap", gap.to_string().as_str()));
            }
            if row.braille.is_empty() {
                self.xml.write_event(Event::Empty(start))?;
            } else {
                self.xml.write_event(Event::Start(start))?;
                self.xml
                    .write_event(Event::Text(BytesText::new(&row.braille)))?;
                self.xml.write_event(Event::End(BytesEnd::new("row")))?;
            }
        }
        self.xml.write_event(Event::End(BytesEnd::new("page")))?;
        Ok(())
    }
}

/// Serialize a document as PEF XML.
pub fn write<W: Write>(doc: &PefDocument, writer: W) -> Result<()> {
    PefWriter::new(writer).document(doc)
}

/// Serialize a document to a PEF file.
pub fn write_file<P: AsRef<Path>>(doc: &PefDocument, path: P) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut buffered = std::io::BufWriter::new(file);
    write(doc, &mut buffered)?;
    buffered.flush()?;
    Ok(())
}

/// Serialize a document as a PEF XML string.
pub fn to_xml_string(doc: &PefDocument) -> Result<String> {
    let mut buffer = Vec::new();
    write(doc, &mut buffer)?;
    let xml = String::from_utf8(buffer).map_err(|e| e.utf8_error())?;
    Ok(xml)
}

impl PefDocument {
    /// Serialize as a PEF XML string.
    pub fn to_xml_string(&self) -> Result<String> {
        to_xml_string(self)
    }
}
