//! Route table.
//!
//! ```text
//! GET  /health                                 → health
//! ANY  /webhooks/trackingmore                  → tracking_webhook
//! ANY  /.netlify/functions/trackingmore-webhook → tracking_webhook
//! ANY  /api/search, /api/node                  → travel_search (Access-Control-Allow-Origin: *)
//! GET  /*                                      → files under STATIC_DIR
//! ```

use axum::{
    http::{header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue},
    routing::{any, get},
    Router,
};
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use super::handlers::{api_not_found, health, tracking_webhook, travel_search, AppState};

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/search", any(travel_search))
        .route("/node", any(travel_search))
        .fallback(api_not_found)
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ));

    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/health", get(health))
        .route("/webhooks/trackingmore", any(tracking_webhook))
        .route("/.netlify/functions/trackingmore-webhook", any(tracking_webhook))
        .nest("/api", api)
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
