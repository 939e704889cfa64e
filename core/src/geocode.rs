//! Eagerly fetched geocoding result for one address.
//!
//! # Design
//! Constructing a `Geocode` performs the whole round trip: build the query,
//! execute it, decode and validate the envelope. Failures never escape the
//! constructor; they are stored as the error state, after which every field
//! accessor returns `None` without looking at the envelope. The envelope is
//! kept as raw JSON and read through `Option` chains, so unexpected shapes
//! read as absent instead of panicking.

use serde_json::Value;
use tracing::{debug, warn};

use crate::client::{validate_envelope, GeocodeClient};
use crate::error::GeocodeError;
use crate::http::HttpResponse;
use crate::query::QueryParams;
use crate::transport::{Transport, UreqTransport};
use crate::types::{component_type, GeocodeOptions, LatLon, NameField};

/// The outcome of geocoding one address.
#[derive(Debug, Clone)]
pub struct Geocode {
    params: QueryParams,
    data: Option<Value>,
    error: Option<GeocodeError>,
}

impl Geocode {
    /// Geocode `address` against the Google endpoint, blocking until done.
    pub fn new(address: &str, options: &GeocodeOptions) -> Self {
        Self::fetch_with(&GeocodeClient::default(), &UreqTransport::new(), address, options)
    }

    /// Same as [`Geocode::new`].
    pub fn find(address: &str, options: &GeocodeOptions) -> Self {
        Self::new(address, options)
    }

    /// Geocode `address` with an explicit endpoint and transport.
    pub fn fetch_with<T>(
        client: &GeocodeClient,
        transport: &T,
        address: &str,
        options: &GeocodeOptions,
    ) -> Self
    where
        T: Transport + ?Sized,
    {
        let params = QueryParams::new(address, options);
        let request = client.build_request(&params);
        debug!(
            address = params.address(),
            language = ?params.language(),
            has_key = params.has_key(),
            "geocoding address"
        );
        match transport.execute(&request) {
            Ok(response) => Self::from_response(client, params, response),
            Err(err) => Self::settle(params, None, Err(err)),
        }
    }

    /// Build the result from a response the caller already obtained.
    pub fn from_response(client: &GeocodeClient, params: QueryParams, response: HttpResponse) -> Self {
        match client.decode_response(response) {
            Ok(envelope) => {
                let validated = validate_envelope(&envelope);
                Self::settle(params, Some(envelope), validated)
            }
            Err(err) => Self::settle(params, None, Err(err)),
        }
    }

    fn settle(params: QueryParams, data: Option<Value>, outcome: Result<(), GeocodeError>) -> Self {
        let error = outcome.err();
        if let Some(err) = &error {
            warn!(address = params.address(), code = err.code(), error = %err, "geocoding failed");
        }
        Self { params, data, error }
    }

    /// Turn the error state into a `Result`.
    pub fn into_result(self) -> Result<Self, GeocodeError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// Whether the request failed; all field accessors return `None` if so.
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }

    /// `REQUEST_FAILED` or the API status, when the request failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_ref().map(GeocodeError::code)
    }

    pub fn error_detail(&self) -> Option<&GeocodeError> {
        self.error.as_ref()
    }

    /// The decoded response body, including for non-OK API statuses.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    fn first_result(&self) -> Option<&Value> {
        if self.failed() {
            return None;
        }
        self.data.as_ref()?.pointer("/results/0")
    }

    /// Name of the first address component tagged `type_tag`, in API order.
    pub fn find_element(&self, type_tag: &str, field: NameField) -> Option<&str> {
        let components = self.first_result()?.get("address_components")?.as_array()?;
        let component = components.iter().find(|component| {
            component
                .get("types")
                .and_then(Value::as_array)
                .is_some_and(|types| types.iter().any(|t| t.as_str() == Some(type_tag)))
        })?;
        component.get(field.key())?.as_str()
    }

    pub fn lat(&self) -> Option<f64> {
        self.first_result()?.pointer("/geometry/location/lat")?.as_f64()
    }

    pub fn lon(&self) -> Option<f64> {
        self.first_result()?.pointer("/geometry/location/lng")?.as_f64()
    }

    pub fn lat_lon(&self) -> Option<LatLon> {
        Some(LatLon {
            lat: self.lat()?,
            lon: self.lon()?,
        })
    }

    pub fn house_number(&self) -> Option<&str> {
        self.find_element(component_type::STREET_NUMBER, NameField::LongName)
    }

    pub fn street(&self) -> Option<&str> {
        self.find_element(component_type::ROUTE, NameField::LongName)
    }

    pub fn postcode(&self) -> Option<&str> {
        self.find_element(component_type::POSTAL_CODE, NameField::LongName)
    }

    pub fn city(&self) -> Option<&str> {
        self.find_element(component_type::LOCALITY, NameField::LongName)
    }

    pub fn town(&self) -> Option<&str> {
        self.find_element(component_type::ADMINISTRATIVE_AREA_LEVEL_2, NameField::LongName)
    }

    /// State or province.
    pub fn state(&self) -> Option<&str> {
        self.find_element(component_type::ADMINISTRATIVE_AREA_LEVEL_1, NameField::LongName)
    }

    pub fn country(&self) -> Option<&str> {
        self.find_element(component_type::COUNTRY, NameField::LongName)
    }

    /// ISO 3166-1 alpha-2 code, e.g. `NL`.
    pub fn country_code(&self) -> Option<&str> {
        self.find_element(component_type::COUNTRY, NameField::ShortName)
    }

    /// The API's own formatted address, returned as sent.
    pub fn formatted(&self) -> Option<&str> {
        self.first_result()?.get("formatted_address")?.as_str()
    }
}
