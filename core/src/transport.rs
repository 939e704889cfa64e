//! Executes `HttpRequest` values over the network.
//!
//! # Design
//! `Transport` is the single I/O seam of the crate. `UreqTransport` is the
//! blocking implementation used by `Geocode::new`; any
//! `Fn(&HttpRequest) -> Result<HttpResponse, GeocodeError>` closure is also a
//! transport, which is how the tests stub the API.

use std::fmt;
use std::time::Duration;

use crate::error::{FailureReason, GeocodeError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Upper bound on one round trip, connect through body read.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Performs one HTTP round trip.
///
/// Non-2xx statuses are returned as data; only failures to obtain a response
/// at all are errors.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, GeocodeError>;
}

impl<F> Transport for F
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, GeocodeError>,
{
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, GeocodeError> {
        self(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    timeout: Duration,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        // Status codes come back as data so the client can map them itself.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, GeocodeError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.agent.get(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let mut response = builder.call().map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = match response.body_mut().read_to_string() {
            Ok(body) => body,
            Err(e) if status == 200 => return Err(transport_error(e)),
            // A failed non-200 response is rejected on its status alone.
            Err(_) => String::new(),
        };

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

fn transport_error(err: ureq::Error) -> GeocodeError {
    FailureReason::Transport(err.to_string()).into()
}
