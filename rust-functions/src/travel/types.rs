//! Search request types for the travel proxy.
//!
//! The caller sends `{"type": "flights" | "hotels", "params": {...}}`. The body
//! is validated into a [`SearchRequest`] before anything else touches it.

use serde_json::{Map, Value};

use crate::error::{HandlerError, HandlerResult};

pub const MISSING_FLIGHT_PARAMS: &str = "Missing flight search parameters.";
pub const MISSING_HOTEL_PARAMS: &str = "Missing hotel search parameters.";
pub const INVALID_SEARCH_TYPE: &str = "Invalid search type.";
pub const INVALID_REQUEST_BODY: &str = "Invalid request body.";

/// A validated search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    Flights(FlightsSearch),
    Hotels(HotelsSearch),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightsSearch {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelsSearch {
    pub destination: String,
    pub check_in_date: String,
    pub check_out_date: String,
}

impl SearchRequest {
    /// Parse and validate a raw request body.
    pub fn from_body(body: &[u8]) -> HandlerResult<Self> {
        let raw = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => map,
            _ => return Err(HandlerError::BadRequest(INVALID_REQUEST_BODY)),
        };

        let empty = Map::new();
        let params = match raw.get("params") {
            Some(Value::Object(map)) => map,
            _ => &empty,
        };

        match raw.get("type").and_then(Value::as_str) {
            Some("flights") => FlightsSearch::from_params(params).map(Self::Flights),
            Some("hotels") => HotelsSearch::from_params(params).map(Self::Hotels),
            _ => Err(HandlerError::BadRequest(INVALID_SEARCH_TYPE)),
        }
    }

    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Flights(_) => "flights",
            Self::Hotels(_) => "hotels",
        }
    }
}

impl FlightsSearch {
    fn from_params(params: &Map<String, Value>) -> HandlerResult<Self> {
        let missing = || HandlerError::BadRequest(MISSING_FLIGHT_PARAMS);

        Ok(Self {
            origin: field(params, "origin").ok_or_else(missing)?,
            destination: field(params, "destination").ok_or_else(missing)?,
            departure_date: field(params, "departure_date").ok_or_else(missing)?,
            return_date: field(params, "return_date"),
        })
    }
}

impl HotelsSearch {
    fn from_params(params: &Map<String, Value>) -> HandlerResult<Self> {
        let missing = || HandlerError::BadRequest(MISSING_HOTEL_PARAMS);

        Ok(Self {
            destination: field(params, "destination").ok_or_else(missing)?,
            check_in_date: field(params, "check_in_date").ok_or_else(missing)?,
            check_out_date: field(params, "check_out_date").ok_or_else(missing)?,
        })
    }
}

/// A required value as text. Non-empty strings and non-zero numbers are
/// accepted; everything else (absent, null, booleans, `""`, `0`) is missing.
fn field(params: &Map<String, Value>, name: &str) -> Option<String> {
    match params.get(name)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}
