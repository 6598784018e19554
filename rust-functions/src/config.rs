//! Configuration module for environment variable parsing.
//!
//! All settings are read once at startup and handed to the handlers through
//! [`crate::web::AppState`]. Handlers never touch the process environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

/// Default base URL of the Travelpayouts API.
pub const DEFAULT_TRAVEL_BASE_URL: &str = "https://api.travelpayouts.com";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    // =========================================================================
    // Tracking Webhook
    // =========================================================================
    /// Shared secret used as the HMAC key for TrackingMore webhooks
    pub webhook_secret: Option<String>,

    // =========================================================================
    // Travel Search Proxy
    // =========================================================================
    /// Travelpayouts API token, sent upstream as query parameter and header
    pub travel_api_token: Option<String>,

    /// Travelpayouts partner id
    pub travel_partner_id: Option<String>,

    /// Base URL of the upstream travel API
    pub travel_base_url: String,

    /// Currency embedded in flight price lookups
    pub travel_currency: String,

    /// Optional timeout for the outbound upstream call
    pub upstream_timeout: Option<Duration>,

    /// Directory that every non-API path is served from
    pub static_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            webhook_secret: parse_secret("TRACKINGMORE_WEBHOOK_SECRET"),

            travel_api_token: parse_secret("TRAVELPAYOUTS_API_TOKEN"),

            travel_partner_id: parse_secret("TRAVELPAYOUTS_PARTNER_ID"),

            travel_base_url: env::var("TRAVELPAYOUTS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_TRAVEL_BASE_URL.to_string()),

            travel_currency: env::var("TRAVELPAYOUTS_CURRENCY")
                .unwrap_or_else(|_| "usd".to_string()),

            upstream_timeout: parse_timeout("UPSTREAM_TIMEOUT_MS"),

            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("travel")),
        }
    }

    /// Both proxy credentials, if configured.
    pub fn travel_credentials(&self) -> Option<(&str, &str)> {
        match (&self.travel_api_token, &self.travel_partner_id) {
            (Some(token), Some(partner)) => Some((token.as_str(), partner.as_str())),
            _ => None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            webhook_secret: None,
            travel_api_token: None,
            travel_partner_id: None,
            travel_base_url: DEFAULT_TRAVEL_BASE_URL.to_string(),
            travel_currency: "usd".to_string(),
            upstream_timeout: None,
            static_dir: PathBuf::from("travel"),
        }
    }
}

/// Read a secret, treating an empty value the same as an unset one.
fn parse_secret(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Parse a millisecond timeout. Zero or garbage disables the timeout.
fn parse_timeout(name: &str) -> Option<Duration> {
    let raw = env::var(name).ok()?;

    match raw.trim().parse::<u64>() {
        Ok(0) => None,
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid timeout, upstream calls will not time out");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_secret_empty_is_none() {
        env::set_var("TEST_SECRET_EMPTY", "");
        assert_eq!(parse_secret("TEST_SECRET_EMPTY"), None);
        env::remove_var("TEST_SECRET_EMPTY");
    }

    #[test]
    fn test_parse_secret_present() {
        env::set_var("TEST_SECRET_SET", "s3cr3t");
        assert_eq!(parse_secret("TEST_SECRET_SET"), Some("s3cr3t".to_string()));
        env::remove_var("TEST_SECRET_SET");
    }

    #[test]
    fn test_parse_timeout() {
        env::set_var("TEST_TIMEOUT_OK", "1500");
        assert_eq!(
            parse_timeout("TEST_TIMEOUT_OK"),
            Some(Duration::from_millis(1500))
        );
        env::remove_var("TEST_TIMEOUT_OK");

        env::set_var("TEST_TIMEOUT_BAD", "soon");
        assert_eq!(parse_timeout("TEST_TIMEOUT_BAD"), None);
        env::remove_var("TEST_TIMEOUT_BAD");

        assert_eq!(parse_timeout("NONEXISTENT_TIMEOUT"), None);
    }

    #[test]
    fn test_travel_credentials_require_both() {
        let mut config = Config {
            travel_api_token: Some("token".to_string()),
            ..Config::default()
        };
        assert!(config.travel_credentials().is_none());

        config.travel_partner_id = Some("partner".to_string());
        assert_eq!(config.travel_credentials(), Some(("token", "partner")));
    }
}
