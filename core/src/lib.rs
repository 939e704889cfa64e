//! Blocking client for the Google Maps geocoding API.
//!
//! # Overview
//! [`Geocode::new`] takes a free-form address, queries the geocoding
//! endpoint once and exposes the first result through named accessors
//! (`lat`, `street`, `city`, `country_code`, ...). A failed lookup is not a
//! panic or an `Err`: it is recorded on the value and reported by
//! [`Geocode::failed`] and [`Geocode::error`], and every accessor then
//! returns `None`.
//!
//! # Design
//! - `GeocodeClient` maps queries to `HttpRequest` values and `HttpResponse`
//!   values back to a validated JSON envelope without touching the network.
//! - `Transport` executes the round trip; `UreqTransport` is the blocking
//!   default and closures can stand in for it in tests.
//! - The envelope stays raw JSON. Accessors read it through `Option` chains,
//!   so odd response shapes come back as `None`.

pub mod client;
pub mod error;
pub mod geocode;
pub mod http;
pub mod query;
pub mod transport;
pub mod types;

pub use client::{GeocodeClient, DEFAULT_BASE_URL};
pub use error::{FailureReason, GeocodeError, REQUEST_FAILED};
pub use geocode::Geocode;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::QueryParams;
pub use transport::{Transport, UreqTransport};
pub use types::{GeocodeOptions, LatLon, NameField};
