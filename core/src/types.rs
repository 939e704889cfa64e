//! Configuration and value types exposed by the geocoding client.

use serde::{Deserialize, Serialize};

/// Optional request settings passed alongside the address.
///
/// Absent fields are left out of the outgoing query. Deserializable so the
/// options can come from a JSON or TOML config section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodeOptions {
    /// Static API key, sent as the `key` parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Response language hint, sent as the `language` parameter (e.g. `nl`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl GeocodeOptions {
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Coordinates of the first result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// Which display name of an address component to read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameField {
    #[default]
    LongName,
    ShortName,
}

impl NameField {
    /// JSON key holding this name inside an address component.
    pub fn key(self) -> &'static str {
        match self {
            NameField::LongName => "long_name",
            NameField::ShortName => "short_name",
        }
    }
}

/// Type tags used by the typed accessors.
pub mod component_type {
    pub const STREET_NUMBER: &str = "street_number";
    pub const ROUTE: &str = "route";
    pub const POSTAL_CODE: &str = "postal_code";
    pub const LOCALITY: &str = "locality";
    pub const ADMINISTRATIVE_AREA_LEVEL_2: &str = "administrative_area_level_2";
    pub const ADMINISTRATIVE_AREA_LEVEL_1: &str = "administrative_area_level_1";
    pub const COUNTRY: &str = "country";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_to_absent() {
        let options = GeocodeOptions::default();
        assert!(options.key.is_none());
        assert!(options.language.is_none());
    }

    #[test]
    fn options_deserialize_with_missing_fields() {
        let options: GeocodeOptions = serde_json::from_str(r#"{"language":"nl"}"#).unwrap();
        assert_eq!(options, GeocodeOptions::default().with_language("nl"));
    }

    #[test]
    fn absent_options_are_not_serialized() {
        let json = serde_json::to_value(GeocodeOptions::default().with_key("abc")).unwrap();
        assert_eq!(json, serde_json::json!({"key": "abc"}));
    }

    #[test]
    fn name_field_defaults_to_long_name() {
        assert_eq!(NameField::default().key(), "long_name");
        assert_eq!(NameField::ShortName.key(), "short_name");
    }
}
