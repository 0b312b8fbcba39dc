//! Integration tests for BRF parsing and embossing.

use embosser::brf::{parse_bytes, parse_reader, BrfParser};
use embosser::document::{validate, DocumentEvent};
use embosser::{emboss_bytes, EmbossingAttributes, PageRanges, Rectangle, TextEmbosser};
use proptest::prelude::*;

fn lines(events: &[DocumentEvent]) -> Vec<Vec<String>> {
    let mut pages = Vec::new();
    for event in events {
        match event {
            DocumentEvent::StartPage(_) => pages.push(Vec::new()),
            DocumentEvent::StartLine(_) => {
                if let Some(page) = pages.last_mut() {
                    page.push(String::new());
                }
            }
            DocumentEvent::Braille(text) => {
                if let Some(line) = pages.last_mut().and_then(|p| p.last_mut()) {
                    line.push_str(text);
                }
            }
            _ => {}
        }
    }
    pages
}

#[test]
fn test_blank_lines_between_text() {
    let events = parse_bytes(b"AB\n\n\nCD");
    assert_eq!(lines(&events), vec![vec!["AB", "", "", "CD"]]);
}

#[test]
fn test_mixed_line_endings() {
    let events = parse_bytes(b"A\r\nB\nC\rD");
    assert_eq!(lines(&events), vec![vec!["A", "B", "C", "D"]]);
}

#[test]
fn test_form_feeds_start_pages() {
    let events = parse_bytes(b"AB\x0cCD\r\nEF\x0c");
    assert_eq!(lines(&events), vec![vec!["AB"], vec!["CD", "EF"]]);
}

#[test]
fn test_parser_is_lazy() {
    let mut parser = BrfParser::new(b"AB\x0cCD");
    assert_eq!(parser.next(), Some(DocumentEvent::start_document()));
    assert_eq!(parser.next(), Some(DocumentEvent::start_volume()));
    assert_eq!(parser.by_ref().count(), 14);
    assert_eq!(parser.next(), None);
}

#[test]
fn test_parse_reader_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.brf");
    std::fs::write(&path, b"AB\r\nCD").unwrap();
    let file = std::fs::File::open(&path).unwrap();
    assert_eq!(parse_reader(file).unwrap(), parse_bytes(b"AB\r\nCD"));
}

#[test]
fn test_emboss_selected_pages() {
    let attributes = EmbossingAttributes::new()
        .with_paper(Rectangle::LETTER)
        .with_page_ranges(PageRanges::single(2).unwrap());
    let output = emboss_bytes(b"AB\x0cCD\x0cEF", &TextEmbosser::default(), &attributes).unwrap();
    assert_eq!(output, b"CD\x0c");
}

#[test]
fn test_emboss_lowercase_is_uppercased() {
    let attributes = EmbossingAttributes::new().with_paper(Rectangle::LETTER);
    let output = emboss_bytes(b",a te/", &TextEmbosser::default(), &attributes).unwrap();
    assert_eq!(output, b",A TE/\x0c");
}

proptest! {
    #[test]
    fn test_any_ascii_is_a_valid_stream(input in proptest::collection::vec(0u8..0x80, 0..200)) {
        let events = parse_bytes(&input);
        prop_assert!(validate(&events).is_ok());
    }

    #[test]
    fn test_text_survives_parsing(text in "[A-Z ]{1,30}") {
        let events = parse_bytes(text.as_bytes());
        prop_assert_eq!(lines(&events), vec![vec![text]]);
    }
}
