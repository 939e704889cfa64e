//! Query parameters for the geocoding endpoint.
//!
//! # Design
//! Parameters are kept in a fixed order (`address`, `key`, `language`) so the
//! built query string is deterministic. Values are normalized before
//! encoding: surrounding whitespace is trimmed and every run of line breaks
//! becomes `", "`, turning a multi-line postal address into a single line.
//! Only outgoing values are normalized; response data is returned as sent.

use crate::types::GeocodeOptions;

/// The parameters of one geocoding request. `address` is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    address: String,
    key: Option<String>,
    language: Option<String>,
}

impl QueryParams {
    pub fn new(address: impl Into<String>, options: &GeocodeOptions) -> Self {
        Self {
            address: address.into(),
            key: options.key.clone(),
            language: options.language.clone(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    /// Normalized `(name, value)` pairs, skipping absent and empty values.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("address", Some(self.address.as_str())),
            ("key", self.key.as_deref()),
            ("language", self.language.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            let value = normalize(value?);
            (!value.is_empty()).then_some((name, value))
        })
        .collect()
    }

    /// Percent-encoded query string, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        self.pairs()
            .iter()
            .map(|(name, value)| format!("{name}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Trim `value` and collapse each run of `\r` / `\n` into `", "`.
pub fn normalize(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_break = false;
    for ch in value.trim().chars() {
        if ch == '\r' || ch == '\n' {
            if !in_break {
                out.push_str(", ");
                in_break = true;
            }
        } else {
            out.push(ch);
            in_break = false;
        }
    }
    out
}
