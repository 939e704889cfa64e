//! Error types for the geocoding client.
//!
//! # Design
//! The geocoding API reports its own outcome through a top-level `status`
//! string, so API-side failures keep that string verbatim in `Status`.
//! Everything that goes wrong before a usable status is seen (transport
//! failure, non-200 response, undecodable body, missing `status`) collapses
//! into `RequestFailed`, which always reports the `REQUEST_FAILED` code. The
//! `FailureReason` keeps the detail for logs and debugging only.

use thiserror::Error;

/// Code reported for every failure that is not an API-provided status.
pub const REQUEST_FAILED: &str = "REQUEST_FAILED";

/// Why a request never produced a usable API status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
    /// The server answered with something other than 200.
    #[error("unexpected HTTP status {status}")]
    HttpStatus { status: u16 },

    /// The request never completed (DNS, connect, timeout, body read).
    #[error("transport error: {0}")]
    Transport(String),

    /// The body of a 200 response was not valid JSON.
    #[error("invalid JSON body: {0}")]
    InvalidJson(String),

    /// The decoded body carried no string `status` field.
    #[error("response has no status field")]
    MissingStatus,
}

/// Outcome of a failed geocoding request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    #[error("request failed: {0}")]
    RequestFailed(FailureReason),

    /// The API answered with a status other than `OK`, e.g. `ZERO_RESULTS`
    /// or `OVER_QUERY_LIMIT`.
    #[error("geocoding API returned status {0}")]
    Status(String),
}

impl GeocodeError {
    /// The wire-level error code: `REQUEST_FAILED`, or the API status as sent.
    pub fn code(&self) -> &str {
        match self {
            GeocodeError::RequestFailed(_) => REQUEST_FAILED,
            GeocodeError::Status(status) => status,
        }
    }
}

impl From<FailureReason> for GeocodeError {
    fn from(reason: FailureReason) -> Self {
        GeocodeError::RequestFailed(reason)
    }
}
