//! Character-level translation between Unicode braille patterns and ASCII braille.
//!
//! Each direction is a table of contiguous source blocks. A character inside
//! a block maps to the character at the same offset in the block's target
//! string; anything outside every block maps to itself.

use crate::error::{Error, Result};
use std::sync::OnceLock;

/// Lowercase ASCII braille folded onto its uppercase form (`` ` `` to DEL).
const ASCII_CASE_FOLD: &str = "@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_";

/// ASCII braille for the 64 six-dot patterns U+2800..=U+283F.
const BRAILLE_TO_ASCII: &str =
    " A1B'K2L@CIF/MSP\"E3H9O6R^DJG>NTQ,*5<-U8V.%[$+X!&;:4\\0Z7(_?W]#Y)=";

/// Braille patterns for the printable ASCII range `' '..=DEL`.
const ASCII_TO_BRAILLE: &str = concat!(
    "⠀⠮⠐⠼⠫⠩⠯⠄⠷⠾⠡⠬⠠⠤⠨⠌⠴⠂⠆⠒⠲⠢⠖⠶⠦⠔⠱⠰⠣⠿⠜⠹",
    "⠈⠁⠃⠉⠙⠑⠋⠛⠓⠊⠚⠅⠇⠍⠝⠕⠏⠟⠗⠎⠞⠥⠧⠺⠭⠽⠵⠪⠳⠻⠘⠸",
    "⠈⠁⠃⠉⠙⠑⠋⠛⠓⠊⠚⠅⠇⠍⠝⠕⠏⠟⠗⠎⠞⠥⠧⠺⠭⠽⠵⠪⠳⠻⠘⠸",
);

#[derive(Debug, Clone, PartialEq, Eq)]
struct CharBlock {
    start: u32,
    targets: Vec<char>,
}

impl CharBlock {
    fn new(start: char, targets: &str) -> Self {
        Self {
            start: start as u32,
            targets: targets.chars().collect(),
        }
    }

    fn end(&self) -> u32 {
        self.start + self.targets.len() as u32
    }
}

/// A block-table character mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrailleMapper {
    blocks: Vec<CharBlock>,
}

impl BrailleMapper {
    /// Build a mapper from `(first source char, target chars)` blocks.
    ///
    /// Blocks may be given in any order but must not overlap.
    pub fn new<'a, I>(blocks: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, &'a str)>,
    {
        let mut blocks: Vec<CharBlock> = blocks
            .into_iter()
            .map(|(start, targets)| CharBlock::new(start, targets))
            .collect();
        blocks.sort_by_key(|b| b.start);

        for pair in blocks.windows(2) {
            if pair[0].end() > pair[1].start {
                return Err(Error::Configuration(format!(
                    "mapping blocks starting at U+{:04X} and U+{:04X} overlap",
                    pair[0].start, pair[1].start
                )));
            }
        }

        Ok(Self { blocks })
    }

    fn from_known_blocks(blocks: &[(char, &str)]) -> Self {
        Self {
            blocks: blocks
                .iter()
                .map(|(start, targets)| CharBlock::new(*start, targets))
                .collect(),
        }
    }

    /// Map a single character, falling back to the character itself.
    pub fn map_char(&self, c: char) -> char {
        let code = c as u32;
        let idx = self.blocks.partition_point(|b| b.start <= code);
        if idx == 0 {
            return c;
        }
        let block = &self.blocks[idx - 1];
        if code < block.end() {
            block.targets[(code - block.start) as usize]
        } else {
            c
        }
    }

    /// Map every character of a string.
    pub fn map(&self, s: &str) -> String {
        s.chars().map(|c| self.map_char(c)).collect()
    }

    /// Number of blocks in the table.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

/// Mapper from Unicode braille (and lowercase ASCII braille) to uppercase ASCII braille.
pub fn unicode_to_ascii_mapper() -> &'static BrailleMapper {
    static MAPPER: OnceLock<BrailleMapper> = OnceLock::new();
    MAPPER.get_or_init(|| {
        BrailleMapper::from_known_blocks(&[('`', ASCII_CASE_FOLD), ('\u{2800}', BRAILLE_TO_ASCII)])
    })
}

/// Mapper from ASCII braille to Unicode braille.
pub fn ascii_to_unicode_mapper() -> &'static BrailleMapper {
    static MAPPER: OnceLock<BrailleMapper> = OnceLock::new();
    MAPPER.get_or_init(|| {
        BrailleMapper::from_known_blocks(&[(' ', ASCII_TO_BRAILLE), ('\u{a0}', "\u{2800}")])
    })
}

/// Convert Unicode braille to ASCII braille.
pub fn unicode_to_ascii(s: &str) -> String {
    unicode_to_ascii_mapper().map(s)
}

/// Convert ASCII braille to Unicode braille.
pub fn ascii_to_unicode(s: &str) -> String {
    ascii_to_unicode_mapper().map(s)
}
