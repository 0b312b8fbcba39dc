//! Consumers of document events.

use super::event::DocumentEvent;

/// A consumer of a document event stream.
///
/// Implementations validate each event against the document grammar and
/// panic on an out-of-order event.
pub trait DocumentHandler {
    /// Handle one event.
    fn on_event(&mut self, event: DocumentEvent);

    /// Handle every event of a stream in order.
    fn on_events<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = DocumentEvent>,
        Self: Sized,
    {
        for event in events {
            self.on_event(event);
        }
    }
}

/// Collecting handler; records events without validating them.
impl DocumentHandler for Vec<DocumentEvent> {
    fn on_event(&mut self, event: DocumentEvent) {
        self.push(event);
    }
}
