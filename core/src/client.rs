//! Request builder and response parser for the geocoding API.
//!
//! # Design
//! `GeocodeClient` holds only a `base_url`. `build_request` turns
//! `QueryParams` into an `HttpRequest`; `decode_response` and
//! `validate_envelope` turn an `HttpResponse` into a usable JSON envelope.
//! The two parse steps are separate so a caller can keep the decoded body
//! even when the API reports a non-OK status.

use serde_json::Value;
use tracing::debug;

use crate::error::{FailureReason, GeocodeError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::QueryParams;

/// Fixed endpoint of the Google Maps geocoding JSON API.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Status value of a usable response envelope.
pub const STATUS_OK: &str = "OK";

/// Synchronous, stateless mapping between geocoding queries and HTTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeClient {
    base_url: String,
}

impl Default for GeocodeClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl GeocodeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, params: &QueryParams) -> String {
        format!("{}?{}", self.base_url, params.to_query_string())
    }

    pub fn build_request(&self, params: &QueryParams) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.build_url(params),
            headers: Vec::new(),
        }
    }

    /// Check the HTTP status and decode the body. The API status is not
    /// inspected here.
    pub fn decode_response(&self, response: HttpResponse) -> Result<Value, GeocodeError> {
        if response.status != 200 {
            return Err(FailureReason::HttpStatus {
                status: response.status,
            }
            .into());
        }
        serde_json::from_str(&response.body)
            .map_err(|e| FailureReason::InvalidJson(e.to_string()).into())
    }

    /// `decode_response` followed by `validate_envelope`.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, GeocodeError> {
        let envelope = self.decode_response(response)?;
        validate_envelope(&envelope)?;
        Ok(envelope)
    }
}

/// Accept the envelope only when its `status` is `OK`.
pub fn validate_envelope(envelope: &Value) -> Result<(), GeocodeError> {
    let status = envelope
        .get("status")
        .and_then(Value::as_str)
        .ok_or(FailureReason::MissingStatus)?;
    debug!(status, "geocoding response decoded");
    if status != STATUS_OK {
        return Err(GeocodeError::Status(status.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GeocodeOptions;

    fn client() -> GeocodeClient {
        GeocodeClient::new("http://localhost:3000/maps/api/geocode/json")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn default_client_targets_google() {
        assert_eq!(GeocodeClient::default().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = GeocodeClient::new("http://localhost:3000/geocode/");
        assert_eq!(client.base_url(), "http://localhost:3000/geocode");
    }

    #[test]
    fn build_request_produces_get_with_query() {
        let options = GeocodeOptions::default().with_key("secret").with_language("nl");
        let params = QueryParams::new("Dam 1, Amsterdam", &options);
        let req = client().build_request(&params);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.url,
            "http://localhost:3000/maps/api/geocode/json?address=Dam%201%2C%20Amsterdam&key=secret&language=nl"
        );
        assert!(req.headers.is_empty());
    }

    #[test]
    fn parse_ok_response() {
        let envelope = client()
            .parse_response(response(200, r#"{"status":"OK","results":[]}"#))
            .unwrap();
        assert_eq!(envelope["status"], "OK");
    }

    #[test]
    fn non_200_is_request_failed() {
        let err = client()
            .parse_response(response(500, r#"{"status":"OK"}"#))
            .unwrap_err();
        assert_eq!(err, GeocodeError::RequestFailed(FailureReason::HttpStatus { status: 500 }));
        assert_eq!(err.code(), "REQUEST_FAILED");
    }

    #[test]
    fn bad_json_is_request_failed() {
        let err = client().parse_response(response(200, "<html>")).unwrap_err();
        assert!(matches!(err, GeocodeError::RequestFailed(FailureReason::InvalidJson(_))));
    }

    #[test]
    fn missing_status_is_request_failed() {
        let err = client()
            .parse_response(response(200, r#"{"results":[]}"#))
            .unwrap_err();
        assert_eq!(err, GeocodeError::RequestFailed(FailureReason::MissingStatus));
    }

    #[test]
    fn non_string_status_is_request_failed() {
        let err = client()
            .parse_response(response(200, r#"{"status":200}"#))
            .unwrap_err();
        assert_eq!(err.code(), "REQUEST_FAILED");
    }

    #[test]
    fn api_status_is_passed_through() {
        for status in ["ZERO_RESULTS", "OVER_QUERY_LIMIT", "REQUEST_DENIED", "INVALID_REQUEST", "UNKNOWN_ERROR"] {
            let body = format!(r#"{{"status":"{status}","results":[]}}"#);
            let err = client().parse_response(response(200, &body)).unwrap_err();
            assert_eq!(err, GeocodeError::Status(status.to_string()));
        }
    }

    #[test]
    fn decode_keeps_envelope_with_error_status() {
        let envelope = client()
            .decode_response(response(200, r#"{"status":"ZERO_RESULTS","results":[]}"#))
            .unwrap();
        assert_eq!(envelope["status"], "ZERO_RESULTS");
    }
}
