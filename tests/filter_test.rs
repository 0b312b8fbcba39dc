//! Integration tests for page selection and interpoint graphic separation.

use std::collections::BTreeSet;

use embosser::document::{validate, DocumentEvent, GraphicOptions};
use embosser::filter::{EventStreamExt, PageRanges};
use proptest::prelude::*;

fn content_page(text: &str) -> Vec<DocumentEvent> {
    vec![
        DocumentEvent::start_page(),
        DocumentEvent::start_line(),
        DocumentEvent::braille(text),
        DocumentEvent::EndLine,
        DocumentEvent::EndPage,
    ]
}

fn graphic_page() -> Vec<DocumentEvent> {
    vec![
        DocumentEvent::start_page(),
        DocumentEvent::StartGraphic(GraphicOptions::new().with_image_data(b"png".to_vec())),
        DocumentEvent::EndGraphic,
        DocumentEvent::EndPage,
    ]
}

fn blank_page() -> Vec<DocumentEvent> {
    vec![DocumentEvent::start_page(), DocumentEvent::EndPage]
}

/// A document with the given number of pages in each section.
fn document(sections: &[usize]) -> Vec<DocumentEvent> {
    let mut events = vec![DocumentEvent::start_document(), DocumentEvent::start_volume()];
    let mut page = 0;
    for &count in sections {
        events.push(DocumentEvent::start_section());
        for _ in 0..count {
            page += 1;
            events.extend(content_page(&page.to_string()));
        }
        events.push(DocumentEvent::EndSection);
    }
    events.extend([DocumentEvent::EndVolume, DocumentEvent::EndDocument]);
    events
}

fn wrap(pages: Vec<Vec<DocumentEvent>>) -> Vec<DocumentEvent> {
    let mut events = vec![
        DocumentEvent::start_document(),
        DocumentEvent::start_volume(),
        DocumentEvent::start_section(),
    ];
    events.extend(pages.into_iter().flatten());
    events.extend([
        DocumentEvent::EndSection,
        DocumentEvent::EndVolume,
        DocumentEvent::EndDocument,
    ]);
    events
}

fn braille(events: &[DocumentEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            DocumentEvent::Braille(text) => Some(text.clone()),
            _ => None,
        })
        .collect()
}

fn boundaries(events: &[DocumentEvent]) -> Vec<DocumentEvent> {
    events
        .iter()
        .filter(|e| e.is_structural())
        .cloned()
        .collect()
}

#[test]
fn test_select_pages() {
    let events = document(&[3, 2]);
    let ranges: PageRanges = "1,4-5".parse().unwrap();
    let selected: Vec<_> = events.into_iter().filter_pages(ranges).collect();
    assert_eq!(braille(&selected), vec!["1", "4", "5"]);
    assert!(validate(&selected).is_ok());
}

#[test]
fn test_deselected_section_keeps_boundaries() {
    let events = document(&[2, 1]);
    let selected: Vec<_> = events
        .clone()
        .into_iter()
        .filter_pages(PageRanges::single(3).unwrap())
        .collect();
    assert_eq!(braille(&selected), vec!["3"]);
    assert_eq!(boundaries(&selected), boundaries(&events));
    assert!(validate(&selected).is_ok());
}

#[test]
fn test_ranges_beyond_document() {
    let selected: Vec<_> = document(&[2])
        .into_iter()
        .filter_pages("5-9".parse().unwrap())
        .collect();
    assert!(braille(&selected).is_empty());
}

#[test]
fn test_ranges_serde() {
    let ranges: PageRanges = serde_json::from_str("\"1, 3:5\"").unwrap();
    assert!(ranges.contains(4));
    assert!(!ranges.contains(2));
    assert!(serde_json::from_str::<PageRanges>("\"0-2\"").is_err());
}

#[test]
fn test_blank_page_before_back_side_graphic() {
    let events = wrap(vec![content_page("A"), graphic_page()]);
    let output: Vec<_> = events.into_iter().interpoint_graphics().collect();
    assert_eq!(output, wrap(vec![content_page("A"), blank_page(), graphic_page()]));
}

#[test]
fn test_blank_page_after_graphic() {
    let events = wrap(vec![graphic_page(), content_page("A")]);
    let output: Vec<_> = events.into_iter().interpoint_graphics().collect();
    assert_eq!(output, wrap(vec![graphic_page(), blank_page(), content_page("A")]));
}

#[test]
fn test_interpoint_transform_is_idempotent() {
    let events = wrap(vec![
        content_page("A"),
        graphic_page(),
        content_page("B"),
        graphic_page(),
    ]);
    let once: Vec<_> = events.into_iter().interpoint_graphics().collect();
    let twice: Vec<_> = once.clone().into_iter().interpoint_graphics().collect();
    assert_eq!(once, twice);
    assert!(validate(&once).is_ok());
}

#[test]
fn test_graphic_on_front_side_untouched() {
    let events = wrap(vec![graphic_page(), blank_page(), content_page("A")]);
    let output: Vec<_> = events.clone().into_iter().interpoint_graphics().collect();
    assert_eq!(output, events);
}

proptest! {
    #[test]
    fn test_filter_preserves_structure(
        sections in proptest::collection::vec(1usize..5, 1..4),
        picks in proptest::collection::btree_set(1u32..16, 1..8),
    ) {
        let events = document(&sections);
        let text = picks.iter().map(u32::to_string).collect::<Vec<_>>().join(",");
        let ranges: PageRanges = text.parse().unwrap();
        let selected: Vec<_> = events.clone().into_iter().filter_pages(ranges).collect();

        prop_assert_eq!(boundaries(&selected), boundaries(&events));
        let total: usize = sections.iter().sum();
        let kept: BTreeSet<u32> = braille(&selected).iter().map(|t| t.parse().unwrap()).collect();
        let expected: BTreeSet<u32> = picks.into_iter().filter(|&p| p as usize <= total).collect();
        prop_assert_eq!(kept, expected);
        prop_assert!(validate(&selected).is_ok());
    }
}
