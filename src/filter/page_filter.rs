//! Dropping pages outside a page range selection.

use crate::document::DocumentEvent;

use super::PageRanges;

/// Lazy adapter keeping only the events of selected pages.
///
/// Document, volume and section boundaries always pass so the output stays
/// a well formed document. Pages are counted from 1 at every document start.
#[derive(Debug, Clone)]
pub struct PageFilter<I> {
    inner: I,
    ranges: PageRanges,
    page: u32,
    pass: bool,
}

impl<I> PageFilter<I>
where
    I: Iterator<Item = DocumentEvent>,
{
    /// Wrap an event stream.
    pub fn new(inner: I, ranges: PageRanges) -> Self {
        Self {
            inner,
            ranges,
            page: 1,
            pass: true,
        }
    }

    /// The page selection in use.
    pub fn ranges(&self) -> &PageRanges {
        &self.ranges
    }

    fn retain(&mut self, event: &DocumentEvent) -> bool {
        match event {
            DocumentEvent::StartDocument(_) => {
                self.page = 1;
                self.pass = true;
            }
            DocumentEvent::StartPage(_) => {
                self.pass = self.ranges.contains(self.page);
            }
            _ => {}
        }
        let retained = self.pass;
        if let DocumentEvent::EndPage = event {
            self.pass = true;
            self.page += 1;
        }
        retained
    }
}

impl<I> Iterator for PageFilter<I>
where
    I: Iterator<Item = DocumentEvent>,
{
    type Item = DocumentEvent;

    fn next(&mut self) -> Option<DocumentEvent> {
        loop {
            let event = self.inner.next()?;
            if self.retain(&event) {
                return Some(event);
            }
        }
    }
}
