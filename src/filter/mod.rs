//! Lazy transforms over document event streams.

mod interpoint;
mod page_filter;
mod ranges;

pub use interpoint::InterpointGraphicTransform;
pub use page_filter::PageFilter;
pub use ranges::PageRanges;

use crate::document::DocumentEvent;

/// Adapter methods for event iterators.
pub trait EventStreamExt: Iterator<Item = DocumentEvent> + Sized {
    /// Keep only the pages selected by `ranges`.
    fn filter_pages(self, ranges: PageRanges) -> PageFilter<Self> {
        PageFilter::new(self, ranges)
    }

    /// Insert blank pages so graphics do not back onto other content.
    fn interpoint_graphics(self) -> InterpointGraphicTransform<Self> {
        InterpointGraphicTransform::new(self)
    }
}

impl<I> EventStreamExt for I where I: Iterator<Item = DocumentEvent> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::single_page_document;

    #[test]
    fn test_adapters_chain() {
        let events: Vec<_> = single_page_document(["AB"])
            .into_iter()
            .interpoint_graphics()
            .filter_pages(PageRanges::All)
            .collect();
        assert_eq!(events, single_page_document(["AB"]));
    }
}
