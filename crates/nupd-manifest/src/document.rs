//! Generic INI document loading.
//!
//! [`Document::load`] turns raw manifest bytes into ordered sections of
//! ordered key/value text pairs. Grammar concerns (headers, comments,
//! `key = value` / `key: value` lines) are handled by `rust-ini`; this module
//! only normalizes the input and flattens the result.

use ini::{Ini, ParseOption};
use tracing::trace;

use crate::error::Result;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A named group of key/value pairs, in source order.
///
/// `name` is `None` for the implicit section holding keys that appear before
/// the first header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: Option<String>,
    pub entries: Vec<(String, String)>,
}

impl Section {
    pub fn is_default(&self) -> bool {
        self.name.is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Sections of an INI document, in source order.
///
/// Repeated headers are kept as separate sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub sections: Vec<Section>,
}

impl Document {
    /// Tokenizes `content` as INI text.
    ///
    /// # Errors
    ///
    /// * [`crate::ManifestError::InvalidEncoding`] if the bytes are not UTF-8.
    /// * [`crate::ManifestError::MalformedDocument`] if the text is not valid
    ///   INI syntax, e.g. an unterminated section header.
    pub fn load(content: &[u8]) -> Result<Self> {
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
        let text = std::str::from_utf8(content)?;

        // Values carry URLs and paths verbatim, so escapes and embedded
        // quotes must not be interpreted.
        let opt = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..Default::default()
        };
        let ini = Ini::load_from_str_opt(text, opt)?;

        let sections: Vec<Section> = ini
            .iter()
            .map(|(name, props)| {
                Section {
                    name: name.map(str::to_string),
                    entries: props
                        .iter()
                        .map(|(k, v)| (k.to_string(), clean_value(v).to_string()))
                        .collect(),
                }
            })
            .collect();

        trace!("loaded {} sections from {} bytes", sections.len(), text.len());

        Ok(Self {
            sections,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }
}

/// Extracts the value text from a raw line remainder.
///
/// A value opening with `"`, `'` or a backtick is cut at the matching closing
/// quote, dropping whatever follows it. Otherwise everything from the first
/// `#` or `;` on is an inline comment.
fn clean_value(value: &str) -> &str {
    let value = value.trim();

    for quote in ['"', '\'', '`'] {
        if let Some(rest) = value.strip_prefix(quote) {
            if let Some(end) = rest.find(quote) {
                return &rest[..end];
            }
        }
    }

    match value.find(['#', ';']) {
        Some(idx) => value[..idx].trim_end(),
        None => value,
    }
}
