//! Keeping graphics and braille off opposite sides of the same sheet.

use std::collections::VecDeque;

use log::debug;

use crate::document::DocumentEvent;

/// Lazy adapter inserting blank pages so a graphic never shares a sheet
/// with content on its reverse side.
///
/// Pages are buffered until their end so the whole page can be inspected.
/// A blank page is added before an even (back side) page when either that
/// page has a graphic and the previous page has content, or the previous
/// page has a graphic and this page has content.
#[derive(Debug, Clone)]
pub struct InterpointGraphicTransform<I> {
    inner: I,
    queue: VecDeque<DocumentEvent>,
    page: Vec<DocumentEvent>,
    in_page: bool,
    page_counter: u32,
    has_graphic: bool,
    has_content: bool,
    prev_has_graphic: bool,
    prev_has_content: bool,
}

impl<I> InterpointGraphicTransform<I>
where
    I: Iterator<Item = DocumentEvent>,
{
    /// Wrap an event stream.
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            queue: VecDeque::new(),
            page: Vec::new(),
            in_page: false,
            page_counter: 0,
            has_graphic: false,
            has_content: false,
            prev_has_graphic: false,
            prev_has_content: false,
        }
    }

    fn process(&mut self, event: DocumentEvent) {
        match &event {
            DocumentEvent::StartDocument(_) => {
                self.page_counter = 0;
                self.prev_has_graphic = false;
                self.prev_has_content = false;
            }
            DocumentEvent::StartPage(_) => {
                self.page_counter += 1;
                self.page.clear();
                self.in_page = true;
                self.has_graphic = false;
                self.has_content = false;
            }
            _ => {}
        }

        if !self.in_page {
            self.queue.push_back(event);
            return;
        }

        match &event {
            DocumentEvent::StartGraphic(_) => {
                self.has_graphic = true;
                self.has_content = true;
            }
            DocumentEvent::Braille(_) => self.has_content = true,
            _ => {}
        }
        let page_ended = matches!(event, DocumentEvent::EndPage);
        self.page.push(event);

        if page_ended {
            self.end_page();
        }
    }

    fn end_page(&mut self) {
        let back_side = self.page_counter % 2 == 0;
        let clash = (self.prev_has_content && self.has_graphic)
            || (self.prev_has_graphic && self.has_content);
        if back_side && clash {
            debug!("Inserting blank page before page {}", self.page_counter);
            self.queue.push_back(DocumentEvent::start_page());
            self.queue.push_back(DocumentEvent::EndPage);
            self.page_counter += 1;
        }
        self.queue.extend(self.page.drain(..));
        self.prev_has_graphic = self.has_graphic;
        self.prev_has_content = self.has_content;
        self.in_page = false;
    }
}

impl<I> Iterator for InterpointGraphicTransform<I>
where
    I: Iterator<Item = DocumentEvent>,
{
    type Item = DocumentEvent;

    fn next(&mut self) -> Option<DocumentEvent> {
        loop {
            if let Some(event) = self.queue.pop_front() {
                return Some(event);
            }
            match self.inner.next() {
                Some(event) => self.process(event),
                None => {
                    // A stream cut off mid page still yields what it had.
                    if self.page.is_empty() {
                        return None;
                    }
                    self.queue.extend(self.page.drain(..));
                    self.in_page = false;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::GraphicOptions;

    enum Content {
        Blank,
        Text,
        Graphic,
    }

    fn page(content: &Content) -> Vec<DocumentEvent> {
        let mut events = vec![DocumentEvent::start_page()];
        match content {
            Content::Blank => {}
            Content::Text => events.extend([
                DocumentEvent::start_line(),
                DocumentEvent::braille("AB"),
                DocumentEvent::EndLine,
            ]),
            Content::Graphic => events.extend([
                DocumentEvent::StartGraphic(GraphicOptions::new().with_height(2)),
                DocumentEvent::EndGraphic,
            ]),
        }
        events.push(DocumentEvent::EndPage);
        events
    }

    fn document(pages: &[Content]) -> Vec<DocumentEvent> {
        let mut events = vec![
            DocumentEvent::start_document(),
            DocumentEvent::start_volume(),
            DocumentEvent::start_section(),
        ];
        for content in pages {
            events.extend(page(content));
        }
        events.extend([
            DocumentEvent::EndSection,
            DocumentEvent::EndVolume,
            DocumentEvent::EndDocument,
        ]);
        events
    }

    fn transform(events: Vec<DocumentEvent>) -> Vec<DocumentEvent> {
        InterpointGraphicTransform::new(events.into_iter()).collect()
    }

    #[test]
    fn test_text_only_unchanged() {
        let events = document(&[Content::Text, Content::Text, Content::Text]);
        assert_eq!(transform(events.clone()), events);
    }

    #[test]
    fn test_graphic_on_back_of_text() {
        let events = document(&[Content::Text, Content::Graphic]);
        let expected = document(&[Content::Text, Content::Blank, Content::Graphic]);
        assert_eq!(transform(events), expected);
    }

    #[test]
    fn test_text_on_back_of_graphic() {
        let events = document(&[Content::Graphic, Content::Text, Content::Text]);
        let expected = document(&[Content::Graphic, Content::Blank, Content::Text, Content::Text]);
        assert_eq!(transform(events), expected);
    }

    #[test]
    fn test_graphic_on_front_unchanged() {
        let events = document(&[Content::Text, Content::Blank, Content::Graphic]);
        assert_eq!(transform(events.clone()), events);
    }

    #[test]
    fn test_idempotent() {
        let events = document(&[Content::Text, Content::Graphic, Content::Text, Content::Graphic]);
        let once = transform(events);
        assert_eq!(transform(once.clone()), once);
    }

    #[test]
    fn test_truncated_stream_is_flushed() {
        let mut events = document(&[Content::Text]);
        events.truncate(6);
        assert_eq!(transform(events.clone()), events);
    }
}
