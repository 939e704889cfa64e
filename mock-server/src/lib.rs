use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const GEOCODE_PATH: &str = "/maps/api/geocode/json";

/// Address that makes the server answer 500.
pub const SERVER_ERROR_ADDRESS: &str = "__server_error__";
/// Address that makes the server answer 200 with a body lacking `status`.
pub const NO_STATUS_ADDRESS: &str = "__no_status__";
/// Address that makes the server answer 200 with a non-JSON body.
pub const NOT_JSON_ADDRESS: &str = "__not_json__";

#[derive(Clone, Debug, Default)]
pub struct MockConfig {
    /// When set, requests must carry this `key` or get `REQUEST_DENIED`.
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub address: Option<String>,
    pub key: Option<String>,
    pub language: Option<String>,
}

pub fn app() -> Router {
    app_with_config(MockConfig::default())
}

pub fn app_with_config(config: MockConfig) -> Router {
    Router::new()
        .route(GEOCODE_PATH, get(geocode))
        .with_state(Arc::new(config))
}

pub async fn run_with_config(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_config(config)).await
}

async fn geocode(State(config): State<Arc<MockConfig>>, Query(query): Query<GeocodeQuery>) -> Response {
    let address = query.address.as_deref().map(str::trim).unwrap_or_default();
    tracing::debug!(address, language = ?query.language, "geocode request");

    match address {
        SERVER_ERROR_ADDRESS => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        NO_STATUS_ADDRESS => return Json(json!({ "results": [] })).into_response(),
        NOT_JSON_ADDRESS => return (StatusCode::OK, "<html>upstream down</html>").into_response(),
        _ => {}
    }

    if let Some(required) = &config.api_key {
        if query.key.as_deref() != Some(required.as_str()) {
            return status_only("REQUEST_DENIED");
        }
    }
    if address.is_empty() {
        return status_only("INVALID_REQUEST");
    }

    let dutch = query.language.as_deref() == Some("nl");
    match lookup(address, dutch) {
        Some(result) => Json(json!({ "status": "OK", "results": [result] })).into_response(),
        None => status_only("ZERO_RESULTS"),
    }
}

fn status_only(status: &str) -> Response {
    Json(json!({ "status": status, "results": [] })).into_response()
}

fn component(long_name: &str, short_name: &str, types: &[&str]) -> Value {
    json!({ "long_name": long_name, "short_name": short_name, "types": types })
}

/// Canned results, matched case-insensitively on the address.
fn lookup(address: &str, dutch: bool) -> Option<Value> {
    let (province, country) = if dutch {
        ("Noord-Holland", "Nederland")
    } else {
        ("North Holland", "Netherlands")
    };

    match address.to_lowercase().as_str() {
        "kalverstraat 100, amsterdam" => Some(json!({
            "address_components": [
                component("100", "100", &["street_number"]),
                component("Kalverstraat", "Kalverstraat", &["route"]),
                component("Centrum", "Centrum", &["political", "sublocality", "sublocality_level_1"]),
                component("Amsterdam", "Amsterdam", &["locality", "political"]),
                component("Amsterdam", "Amsterdam", &["administrative_area_level_2", "political"]),
                component(province, "NH", &["administrative_area_level_1", "political"]),
                component(country, "NL", &["country", "political"]),
                component("1012 NX", "1012 NX", &["postal_code"]),
            ],
            "formatted_address": format!("Kalverstraat 100, 1012 NX Amsterdam, {country}"),
            "geometry": {
                "location": { "lat": 52.3731, "lng": 4.8926 },
                "location_type": "ROOFTOP"
            },
            "place_id": "ChIJ-mock-kalverstraat-100",
            "types": ["street_address"]
        })),
        "amsterdam" => Some(json!({
            "address_components": [
                component("Amsterdam", "Amsterdam", &["locality", "political"]),
                component(province, "NH", &["administrative_area_level_1", "political"]),
                component(country, "NL", &["country", "political"]),
            ],
            "formatted_address": format!("Amsterdam, {country}"),
            "geometry": {
                "location": { "lat": 52.3676, "lng": 4.9041 },
                "location_type": "APPROXIMATE"
            },
            "place_id": "ChIJ-mock-amsterdam",
            "types": ["locality", "political"]
        })),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let result = lookup("KALVERSTRAAT 100, Amsterdam", false).unwrap();
        assert_eq!(result["geometry"]["location"]["lat"], 52.3731);
    }

    #[test]
    fn lookup_localizes_names() {
        let result = lookup("Kalverstraat 100, Amsterdam", true).unwrap();
        assert_eq!(result["formatted_address"], "Kalverstraat 100, 1012 NX Amsterdam, Nederland");
        assert_eq!(result["address_components"][6]["long_name"], "Nederland");
    }

    #[test]
    fn lookup_unknown_address() {
        assert!(lookup("Nowhere 1", false).is_none());
    }

    #[test]
    fn query_fields_are_optional() {
        let query: GeocodeQuery = serde_json::from_str("{}").unwrap();
        assert!(query.address.is_none());
        assert!(query.key.is_none());
        assert!(query.language.is_none());
    }
}
