//! HTTP endpoint handlers.
//!
//! Both handlers are stateless per request: everything they need arrives in
//! [`AppState`], and every failure is a [`HandlerError`] rendered at the end.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{ErrorBody, HandlerError, HandlerResult};
use crate::tracking::{process_event, TrackingEvent};
use crate::travel::{SearchRequest, TravelClient};
use crate::web::signature::{verify_signature, SIGNATURE_HEADER};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub travel: TravelClient,
}

impl AppState {
    pub fn new(config: Config) -> HandlerResult<Self> {
        let travel = TravelClient::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            travel,
        })
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// TrackingMore Webhook
// =============================================================================

/// Webhook acknowledgement.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub message: &'static str,
}

pub const WEBHOOK_ACK: &str = "Webhook received and verified.";

/// TrackingMore webhook endpoint.
///
/// This endpoint:
/// 1. Rejects anything but POST
/// 2. Verifies the HMAC signature over the raw body
/// 3. Parses the event and logs deliveries
/// 4. Returns 200 OK
pub async fn tracking_webhook(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match receive_tracking_event(&state.config, &method, &headers, &body) {
        Ok(ack) => (StatusCode::OK, Json(ack)).into_response(),
        Err(e) => e.into_webhook_response(),
    }
}

fn receive_tracking_event(
    config: &Config,
    method: &Method,
    headers: &HeaderMap,
    body: &[u8],
) -> HandlerResult<WebhookResponse> {
    if method != Method::POST {
        return Err(HandlerError::MethodNotAllowed);
    }

    let signature = headers
        .get(SIGNATURE_HEADER)
        .filter(|v| !v.is_empty());

    let (signature, secret) = match (signature, config.webhook_secret.as_deref()) {
        (Some(signature), Some(secret)) => (signature, secret),
        (signature, secret) => {
            warn!(
                has_signature = signature.is_some(),
                has_secret = secret.is_some(),
                "webhook_signature_or_secret_missing"
            );
            return Err(HandlerError::MissingSignature);
        }
    };

    // A header that is present but not visible ASCII can never match a hex digest.
    let verified = signature
        .to_str()
        .map(|signature| verify_signature(secret, body, signature))
        .unwrap_or(false);

    if !verified {
        warn!(body_length = body.len(), "webhook_signature_invalid");
        return Err(HandlerError::InvalidSignature);
    }

    info!(body_length = body.len(), "webhook_signature_verified");

    let event = TrackingEvent::from_body(body)?;
    let outcome = process_event(&event);

    info!(outcome = ?outcome, "webhook_processed");

    Ok(WebhookResponse {
        message: WEBHOOK_ACK,
    })
}

// =============================================================================
// Travel Search Proxy
// =============================================================================

/// Successful search response: the upstream JSON, wrapped.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Value,
}

/// Travel search endpoint.
///
/// This endpoint:
/// 1. Rejects anything but POST
/// 2. Checks the server-held credentials are configured
/// 3. Validates the search request
/// 4. Makes one upstream call and relays the result
pub async fn travel_search(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<Json<SearchResponse>, HandlerError> {
    if method != Method::POST {
        return Err(HandlerError::MethodNotAllowed);
    }

    let (token, _partner_id) = state.config.travel_credentials().ok_or_else(|| {
        warn!(
            has_api_token = state.config.travel_api_token.is_some(),
            has_partner_id = state.config.travel_partner_id.is_some(),
            "travel_search_misconfigured"
        );
        HandlerError::Misconfigured
    })?;

    let request = SearchRequest::from_body(&body).map_err(|e| {
        warn!(error = %e, body_length = body.len(), "travel_search_rejected");
        e
    })?;

    info!(search_type = request.kind(), "travel_search_received");

    let results = state.travel.search(&request, token).await?;

    Ok(Json(SearchResponse { results }))
}

/// Unknown path under `/api`.
pub async fn api_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Not Found".to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::signature::compute_signature;
    use axum::http::HeaderValue;

    const SECRET: &str = "webhook-secret";

    fn config_with_secret() -> Config {
        Config {
            webhook_secret: Some(SECRET.to_string()),
            ..Config::default()
        }
    }

    fn signed_headers(body: &[u8]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let signature = compute_signature(SECRET, body).unwrap();
        headers.insert(SIGNATURE_HEADER, signature.parse().unwrap());
        headers
    }

    #[test]
    fn test_receive_rejects_get() {
        let result =
            receive_tracking_event(&config_with_secret(), &Method::GET, &HeaderMap::new(), b"");
        assert!(matches!(result, Err(HandlerError::MethodNotAllowed)));
    }

    #[test]
    fn test_receive_missing_secret() {
        let body = br#"{"status":"delivered"}"#;
        let result =
            receive_tracking_event(&Config::default(), &Method::POST, &signed_headers(body), body);
        assert!(matches!(result, Err(HandlerError::MissingSignature)));
    }

    #[test]
    fn test_receive_empty_signature_is_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(SIGNATURE_HEADER, "".parse().unwrap());
        let result = receive_tracking_event(&config_with_secret(), &Method::POST, &headers, b"{}");
        assert!(matches!(result, Err(HandlerError::MissingSignature)));
    }

    #[test]
    fn test_receive_verified_event() {
        let body = br#"{"status":"delivered","tracking_number":"X123"}"#;
        let ack =
            receive_tracking_event(&config_with_secret(), &Method::POST, &signed_headers(body), body)
                .unwrap();
        assert_eq!(ack.message, WEBHOOK_ACK);
    }

    #[test]
    fn test_receive_signature_checked_before_parse() {
        let mut headers = HeaderMap::new();
        headers.insert(SIGNATURE_HEADER, "deadbeef".parse().unwrap());
        let result =
            receive_tracking_event(&config_with_secret(), &Method::POST, &headers, b"not json");
        assert!(matches!(result, Err(HandlerError::InvalidSignature)));
    }

    #[test]
    fn test_receive_non_ascii_signature_is_invalid() {
        let mut headers = HeaderMap::new();
        headers.insert(
            SIGNATURE_HEADER,
            HeaderValue::from_bytes(b"caf\xe9").unwrap(),
        );
        let result = receive_tracking_event(&config_with_secret(), &Method::POST, &headers, b"{}");
        assert!(matches!(result, Err(HandlerError::InvalidSignature)));
    }

    #[test]
    fn test_receive_unparseable_verified_body() {
        let body = b"not json";
        let result =
            receive_tracking_event(&config_with_secret(), &Method::POST, &signed_headers(body), body);
        assert!(matches!(result, Err(HandlerError::ParseFailure)));
    }
}
