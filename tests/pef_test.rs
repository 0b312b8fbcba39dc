//! Integration tests for PEF reading, writing and event parsing.

use embosser::document::{validate, DocumentEvent};
use embosser::error::Error;
use embosser::pef::{self, DcField, PefDocument};
use embosser::render::{to_bytes, TextRenderOptions};
use proptest::prelude::*;

const BOOK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<pef version="2008-1" xmlns="http://www.daisy.org/ns/2008/pef">
 <head>
  <meta xmlns:dc="http://purl.org/dc/elements/1.1/">
   <dc:format>application/x-pef+xml</dc:format>
   <dc:identifier>book-1</dc:identifier>
   <dc:title>Book</dc:title>
   <dc:creator>First</dc:creator>
   <dc:creator>Second</dc:creator>
  </meta>
 </head>
 <body>
  <volume cols="10" rows="4" rowgap="0" duplex="false">
   <section>
    <page>
     <row>⠁⠃</row>
     <row/>
     <row>⠉⠙</row>
    </page>
    <page>
     <row>⠑</row>
    </page>
   </section>
   <section cols="2">
    <page rowgap="1">
     <row>⠁⠃⠉</row>
    </page>
   </section>
  </volume>
 </body>
</pef>
"#;

type Shape = Vec<Vec<Vec<Vec<String>>>>;

fn build(identifier: &str, volumes: &Shape) -> PefDocument {
    let mut doc = PefDocument::new(identifier);
    for (v, sections) in volumes.iter().enumerate() {
        let volume = if v == 0 {
            doc.volume_mut(0).unwrap()
        } else {
            doc.append_volume()
        };
        volume.cols = 40;
        volume.rows = 25;
        for (s, pages) in sections.iter().enumerate() {
            let section = if s == 0 {
                volume.section_mut(0).unwrap()
            } else {
                volume.append_section()
            };
            for (p, rows) in pages.iter().enumerate() {
                let page = if p == 0 {
                    section.page_mut(0).unwrap()
                } else {
                    section.append_page()
                };
                for row in rows {
                    page.append_row(row.as_str());
                }
            }
        }
    }
    doc
}

#[test]
fn test_read_book() {
    let doc = pef::read_str(BOOK).unwrap();
    assert_eq!(doc.meta.identifier, "book-1");
    assert_eq!(doc.meta.values(DcField::Creator), vec!["First", "Second"]);
    assert_eq!(doc.volume_count(), 1);
    assert_eq!(doc.page_count(), 3);

    let volume = &doc.volumes()[0];
    let second = &volume.sections()[1];
    assert_eq!(second.cols_value(volume), 2);
    assert_eq!(second.rows_value(volume), 4);
    assert_eq!(second.pages()[0].row_gap_value(second, volume), 1);
    assert_eq!(volume.sections()[0].pages()[0].rows[1].braille, "");
}

#[test]
fn test_write_then_read_book() {
    let doc = pef::read_str(BOOK).unwrap();
    let xml = doc.to_xml_string().unwrap();
    assert!(xml.contains("<row/>"));
    assert!(xml.contains(r#"<section cols="2">"#));
    assert_eq!(pef::read_str(&xml).unwrap(), doc);
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.pef");
    let doc = pef::read_str(BOOK).unwrap();
    pef::write_file(&doc, &path).unwrap();
    assert_eq!(pef::read_file(&path).unwrap(), doc);
    assert_eq!(embosser::read_pef(&path).unwrap(), doc);
}

#[test]
fn test_book_events_render() {
    let events = pef::parse_events(BOOK).unwrap();
    validate(&events).unwrap();
    let output = to_bytes(events, &TextRenderOptions::default()).unwrap();
    assert_eq!(output, b"AB\r\n\r\nCD\x0cE\x0cAB\x0c");
}

#[test]
fn test_event_layout_options() {
    let events = pef::parse_events(BOOK).unwrap();
    let sections: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            DocumentEvent::StartSection(options) => Some(options.cells_per_line),
            _ => None,
        })
        .collect();
    assert_eq!(sections, vec![None, Some(2)]);
}

#[test]
fn test_brf_to_pef() {
    let doc = pef::from_brf(b"AB\r\nCD\r\n\r\n\x0cEF", "brf-1", 40, 25, true);
    assert_eq!(doc.page_count(), 2);
    let volume = &doc.volumes()[0];
    assert!(volume.duplex);
    let rows: Vec<_> = volume.sections()[0].pages()[0]
        .rows
        .iter()
        .map(|r| r.braille.as_str())
        .collect();
    assert_eq!(rows, vec!["\u{2801}\u{2803}", "\u{2809}\u{2819}"]);

    let xml = doc.to_xml_string().unwrap();
    assert_eq!(pef::read_str(&xml).unwrap(), doc);
}

#[test]
fn test_missing_identifier_rejected() {
    let xml = BOOK.replace("<dc:identifier>book-1</dc:identifier>", "");
    assert!(matches!(pef::read_str(&xml), Err(Error::Format(_))));
}

#[test]
fn test_volume_without_section_rejected() {
    let xml = r#"<pef xmlns="http://www.daisy.org/ns/2008/pef" version="2008-1">
<head><meta xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:identifier>x</dc:identifier></meta></head>
<body><volume cols="1" rows="1" rowgap="0" duplex="false"></volume></body></pef>"#;
    assert!(matches!(pef::read_str(xml), Err(Error::Format(_))));
}

fn shape() -> impl Strategy<Value = Shape> {
    let row = "[\u{2801}-\u{283f}]{0,6}";
    let page = proptest::collection::vec(row, 0..4);
    let section = proptest::collection::vec(page, 1..3);
    let volume = proptest::collection::vec(section, 1..3);
    proptest::collection::vec(volume, 1..3)
}

proptest! {
    #[test]
    fn test_write_read_round_trip(id in "[a-z0-9-]{1,12}", volumes in shape()) {
        let doc = build(&id, &volumes);
        let xml = pef::to_xml_string(&doc).unwrap();
        let read = pef::read_str(&xml).unwrap();
        prop_assert_eq!(read, doc);
    }

    #[test]
    fn test_written_documents_are_valid_streams(volumes in shape()) {
        let doc = build("id", &volumes);
        let xml = pef::to_xml_string(&doc).unwrap();
        let events = pef::parse_events(&xml).unwrap();
        prop_assert!(validate(&events).is_ok());
    }
}
