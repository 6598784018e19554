//! Web server module.
//!
//! This module provides the HTTP surface:
//! - Receives TrackingMore webhooks and verifies their signature
//! - Proxies travel searches to Travelpayouts with server-held credentials
//! - Serves the static site for every other path

pub mod handlers;
pub mod routes;
pub mod signature;

pub use handlers::{
    health, tracking_webhook, travel_search, AppState, HealthResponse, SearchResponse,
    WebhookResponse,
};
pub use routes::router;
pub use signature::{compute_signature, verify_signature, SIGNATURE_HEADER};
