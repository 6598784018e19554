//! Classified handler failures and their HTTP rendering.
//!
//! Every failure path of both handlers ends up as a [`HandlerError`], which is
//! turned into a response at exactly one point. The `Display` text of each
//! variant is the message the caller sees; diagnostic detail is logged only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Result alias used by the handler internals.
pub type HandlerResult<T> = Result<T, HandlerError>;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Unauthorized: Missing signature or secret.")]
    MissingSignature,

    #[error("Unauthorized: Invalid signature.")]
    InvalidSignature,

    #[error("Server misconfiguration: API_TOKEN and PARTNER_ID are not set.")]
    Misconfigured,

    #[error("{0}")]
    BadRequest(&'static str),

    /// Upstream answered with a non-2xx status, which is relayed as-is.
    #[error("Failed to fetch data from the Aviasales API.")]
    UpstreamFailure(StatusCode),

    #[error("Failed to process webhook")]
    ParseFailure,

    /// Uncaught fault. The detail is logged and never rendered.
    #[error("Internal server error.")]
    Internal(String),
}

/// JSON error envelope: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl HandlerError {
    /// HTTP status this failure maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MissingSignature | Self::InvalidSignature => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamFailure(status) => *status,
            Self::Misconfigured | Self::ParseFailure | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Render the way the tracking webhook answers: plain text for method and
    /// authentication rejections, a JSON envelope for everything else.
    pub fn into_webhook_response(self) -> Response {
        match self {
            Self::MethodNotAllowed | Self::MissingSignature | Self::InvalidSignature => {
                (self.status(), self.to_string()).into_response()
            }
            other => other.into_response(),
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        if let Self::Internal(detail) = &self {
            error!(error = %detail, "handler_internal_error");
        }

        let status = self.status();
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<reqwest::Error> for HandlerError {
    fn from(e: reqwest::Error) -> Self {
        Self::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(HandlerError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(HandlerError::InvalidSignature.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(HandlerError::BadRequest("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            HandlerError::UpstreamFailure(StatusCode::SERVICE_UNAVAILABLE).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(HandlerError::ParseFailure.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_webhook_rejections_are_plain_text() {
        let response = HandlerError::MissingSignature.into_webhook_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_string(response).await,
            "Unauthorized: Missing signature or secret."
        );
    }

    #[tokio::test]
    async fn test_internal_detail_is_not_rendered() {
        let response = HandlerError::Internal("token=abc leaked".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_string(response).await;
        assert_eq!(body, r#"{"error":"Internal server error."}"#);
    }
}
