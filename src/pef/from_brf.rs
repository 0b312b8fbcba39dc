//! Building a PEF document from BRF bytes.

use log::debug;

use super::model::{Meta, Page, PefDocument, Row, Section, Volume, DEFAULT_VERSION};
use crate::braille::ascii_to_unicode;

const FORM_FEED: u8 = 0x0c;

fn push_row(page: &mut Page, line: &mut Vec<u8>) {
    let text: String = line
        .iter()
        .map(|&b| if b.is_ascii() { char::from(b) } else { char::REPLACEMENT_CHARACTER })
        .collect();
    page.rows.push(Row::new(ascii_to_unicode(&text)));
    line.clear();
}

fn finish_page(pages: &mut Vec<Page>, mut page: Page) {
    while page.rows.last().is_some_and(|r| r.braille.is_empty()) {
        page.rows.pop();
    }
    pages.push(page);
}

/// Convert BRF bytes into a single volume PEF document.
///
/// The geometry arguments become the volume attributes. Each form feed
/// starts a new page and trailing blank rows are dropped from every page.
pub fn from_brf(
    input: &[u8],
    identifier: impl Into<String>,
    cells: u32,
    lines: u32,
    duplex: bool,
) -> PefDocument {
    let mut pages = Vec::new();
    let mut page = Page::new();
    let mut line = Vec::new();
    let mut previous = None;

    for &byte in input {
        match byte {
            b'\n' if previous == Some(b'\r') && line.is_empty() => {}
            b'\r' | b'\n' => push_row(&mut page, &mut line),
            FORM_FEED => {
                if !line.is_empty() {
                    push_row(&mut page, &mut line);
                }
                finish_page(&mut pages, std::mem::take(&mut page));
            }
            _ => line.push(byte),
        }
        previous = Some(byte);
    }
    if !line.is_empty() {
        push_row(&mut page, &mut line);
    }
    finish_page(&mut pages, page);
    debug!("Converted {} BRF bytes into {} pages", input.len(), pages.len());

    let section = Section::default().with_pages(pages);
    let volume = Volume::with_layout(cells, lines, duplex).with_sections(vec![section]);
    PefDocument::from_parts(DEFAULT_VERSION.to_string(), Meta::new(identifier), vec![volume])
}
