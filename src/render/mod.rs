//! Rendering engines turning document event streams into embosser output.

mod json;
mod options;
mod printable;
mod text;

pub use json::{from_json, pages_to_json, to_json, JsonFormat};
pub use options::{LineEnding, PageEnding, TextRenderOptions};
pub use printable::{to_pages, Page, PageElement, PrintableHandler};
pub use text::{to_bytes, GenericTextHandler};
