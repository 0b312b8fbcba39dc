//! XML helpers shared by the PEF readers.

use quick_xml::events::BytesStart;
use quick_xml::name::ResolveResult;

use super::model::{DC_NAMESPACE, PEF_NAMESPACE, TG_NAMESPACE};
use crate::error::{Error, Result};

/// Namespace an element resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Ns {
    Pef,
    Dc,
    Tg,
    Other,
}

impl Ns {
    pub(crate) fn of(resolved: &ResolveResult<'_>) -> Result<Self> {
        match resolved {
            ResolveResult::Bound(ns) => Ok(match ns.as_ref() {
                n if n == PEF_NAMESPACE.as_bytes() => Ns::Pef,
                n if n == DC_NAMESPACE.as_bytes() => Ns::Dc,
                n if n == TG_NAMESPACE.as_bytes() => Ns::Tg,
                _ => Ns::Other,
            }),
            ResolveResult::Unbound => Ok(Ns::Other),
            ResolveResult::Unknown(prefix) => Err(Error::Format(format!(
                "unbound namespace prefix {}",
                String::from_utf8_lossy(prefix)
            ))),
        }
    }
}

/// Local name of an element as text.
pub(crate) fn local_name(e: &BytesStart<'_>) -> Result<String> {
    Ok(std::str::from_utf8(e.local_name().as_ref())?.to_string())
}

/// Unescaped value of an unqualified attribute.
pub(crate) fn attribute(e: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    match e.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

/// Strip a UTF-8 byte order mark and decode.
pub(crate) fn decode(bytes: &[u8]) -> Result<&str> {
    let bytes = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
    Ok(std::str::from_utf8(bytes)?)
}
