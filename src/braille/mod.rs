//! Braille character sets and cell geometry.

mod cell;
mod layout;
mod mapper;

pub use cell::BrlCell;
pub use layout::{DefaultLayoutHelper, LayoutHelper};
pub use mapper::{
    ascii_to_unicode, ascii_to_unicode_mapper, unicode_to_ascii, unicode_to_ascii_mapper,
    BrailleMapper,
};
