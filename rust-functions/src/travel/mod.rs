//! Credentialed travel search proxy.
//!
//! ```text
//! caller body → SearchRequest::from_body() → TravelClient::search() → {results}
//! ```

pub mod client;
pub mod types;

pub use client::TravelClient;
pub use types::{FlightsSearch, HotelsSearch, SearchRequest};
