//! Page range selection.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Set of 1-indexed pages to emboss.
///
/// Serialized in its text form, such as `"1,3-5"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PageRanges {
    /// Every page
    #[default]
    All,
    /// Only pages in one of these inclusive ranges
    Ranges(Vec<RangeInclusive<u32>>),
}

fn member_regex() -> Result<&'static Regex> {
    static MEMBER: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    MEMBER
        .get_or_init(|| Regex::new(r"^\s*(\d+)\s*(?:[-:]\s*(\d+)\s*)?$"))
        .as_ref()
        .map_err(|e| Error::Other(format!("page range pattern: {}", e)))
}

fn page_number(text: &str, source: &str) -> Result<u32> {
    match text.parse::<u32>() {
        Ok(0) | Err(_) => Err(Error::InvalidPageRange(format!(
            "page numbers start at 1 in \"{}\"",
            source
        ))),
        Ok(page) => Ok(page),
    }
}

impl PageRanges {
    /// A single page.
    pub fn single(page: u32) -> Result<Self> {
        Self::range(page, page)
    }

    /// An inclusive range of pages; a reversed range selects nothing.
    pub fn range(first: u32, last: u32) -> Result<Self> {
        if first == 0 || last == 0 {
            return Err(Error::InvalidPageRange(format!(
                "page numbers start at 1 in {}-{}",
                first, last
            )));
        }
        Ok(PageRanges::Ranges(vec![first..=last]))
    }

    /// Parse a page range specification such as `"1, 3-5, 8:9"`.
    ///
    /// Members are separated by commas; each is a page number or two page
    /// numbers joined by `-` or `:`. An empty string or `all` selects every
    /// page rather than none; an explicit selection that matches no page is
    /// written as a reversed range such as `"2-1"`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageRanges::All);
        }

        let regex = member_regex()?;
        let mut ranges = Vec::new();
        for member in s.split(',') {
            let captures = regex.captures(member).ok_or_else(|| {
                Error::InvalidPageRange(format!("\"{}\" in \"{}\"", member.trim(), s))
            })?;
            let first = page_number(&captures[1], s)?;
            let last = match captures.get(2) {
                Some(m) => page_number(m.as_str(), s)?,
                None => first,
            };
            if first <= last {
                ranges.push(first..=last);
            }
        }
        Ok(PageRanges::Ranges(ranges))
    }

    /// Check if a page is selected.
    pub fn contains(&self, page: u32) -> bool {
        match self {
            PageRanges::All => true,
            PageRanges::Ranges(ranges) => ranges.iter().any(|r| r.contains(&page)),
        }
    }

    /// Check if every page is selected.
    pub fn is_all(&self) -> bool {
        matches!(self, PageRanges::All)
    }
}

impl FromStr for PageRanges {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PageRanges {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<PageRanges> for String {
    fn from(ranges: PageRanges) -> String {
        ranges.to_string()
    }
}

impl fmt::Display for PageRanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageRanges::All => f.write_str("all"),
            PageRanges::Ranges(ranges) => {
                let members: Vec<String> = ranges
                    .iter()
                    .map(|r| {
                        if r.start() == r.end() {
                            r.start().to_string()
                        } else {
                            format!("{}-{}", r.start(), r.end())
                        }
                    })
                    .collect();
                f.write_str(&members.join(","))
            }
        }
    }
}
