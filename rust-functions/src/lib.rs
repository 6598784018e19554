//! Edge functions - tracking webhook receiver and travel search proxy.
//!
//! This library provides the two request handlers served by `edge-functions`:
//! - TrackingMore webhook: HMAC-verified shipment events
//! - Travel search: credential-hiding proxy in front of Travelpayouts
//!
//! ## Architecture
//!
//! ```text
//! TrackingMore → /webhooks/trackingmore → verify → TrackingEvent → log
//! Browser      → /api/search → SearchRequest → TravelClient → Travelpayouts
//! ```

pub mod config;
pub mod error;
pub mod tracking;
pub mod travel;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use error::{HandlerError, HandlerResult};
pub use tracking::{process_event, TrackingEvent, TrackingOutcome};
pub use travel::{SearchRequest, TravelClient};
pub use web::{router, AppState};
