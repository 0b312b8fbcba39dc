//! Portable Embosser Format (PEF) support.
//!
//! [`read_str`] and friends build a validated [`PefDocument`] tree and
//! [`write`] serializes it back. [`parse_events`] turns PEF XML straight
//! into a document event stream for rendering.

pub mod events;
mod from_brf;
mod model;
mod reader;
mod writer;
mod xml;

pub use events::{parse_event_bytes, parse_events};
pub use from_brf::from_brf;
pub use model::{
    DcField, Meta, Page, PefDocument, Row, Section, Volume, DC_NAMESPACE, DEFAULT_VERSION,
    PEF_FORMAT, PEF_NAMESPACE, TG_NAMESPACE,
};
pub use reader::{read, read_bytes, read_file, read_str};
pub use writer::{to_xml_string, write, write_file};
