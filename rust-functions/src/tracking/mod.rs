//! Tracking event payloads and the business logic run on them.
//!
//! ```text
//! verified body → TrackingEvent::from_body() → process_event() → TrackingOutcome
//! ```

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{error, info};

use crate::error::{HandlerError, HandlerResult};

/// Status value that marks a shipment as delivered.
pub const DELIVERED_STATUS: &str = "delivered";

/// A TrackingMore webhook event.
///
/// Only `status` and `tracking_number` are interpreted. Both are kept as raw
/// JSON so that an unexpected type never rejects an authenticated event; every
/// other field is preserved in `extra`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackingEvent {
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub tracking_number: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TrackingEvent {
    /// Parse a verified body. Anything but a JSON object is a parse failure.
    pub fn from_body(body: &[u8]) -> HandlerResult<Self> {
        serde_json::from_slice(body).map_err(|e| {
            error!(error = %e, body_length = body.len(), "webhook_parse_failed");
            HandlerError::ParseFailure
        })
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_ref().and_then(Value::as_str)
    }

    /// Tracking number rendered as text, whatever JSON type it arrived as.
    pub fn tracking_number(&self) -> Option<String> {
        match self.tracking_number.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    pub fn is_delivered(&self) -> bool {
        self.status() == Some(DELIVERED_STATUS)
    }
}

/// What processing an event amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingOutcome {
    /// The shipment reached `delivered`.
    Delivered { tracking_number: Option<String> },
    /// Any other status, or none at all.
    Received { status: Option<String> },
}

/// Run the business logic for a verified event.
///
/// The only side effect is a log record when the shipment was delivered.
pub fn process_event(event: &TrackingEvent) -> TrackingOutcome {
    info!(
        status = event.status().unwrap_or("unknown"),
        tracking_number = event.tracking_number().as_deref().unwrap_or("unknown"),
        extra_fields = event.extra.len(),
        "webhook_event_received"
    );

    if event.is_delivered() {
        let tracking_number = event.tracking_number();
        info!(
            tracking_number = tracking_number.as_deref().unwrap_or("unknown"),
            "Package {} has been delivered!",
            tracking_number.as_deref().unwrap_or("unknown")
        );
        return TrackingOutcome::Delivered { tracking_number };
    }

    TrackingOutcome::Received {
        status: event.status().map(str::to_string),
    }
}
