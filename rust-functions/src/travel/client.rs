//! Upstream Travelpayouts client.
//!
//! One validated [`SearchRequest`] becomes exactly one outbound GET. Nothing is
//! retried or cached.

use std::time::Duration;

use reqwest::{header, Client};
use serde_json::Value;
use tracing::{error, info};
use url::Url;

use super::types::{FlightsSearch, HotelsSearch, SearchRequest};
use crate::config::Config;
use crate::error::{HandlerError, HandlerResult};

/// Header carrying the API token on outbound requests.
pub const ACCESS_TOKEN_HEADER: &str = "X-Access-Token";

const FLIGHTS_PATH: &str = "/v1/prices/monthly";
const HOTELS_PATH: &str = "/data/hotels_search_by_cityid";

/// HTTP client for the upstream travel API.
#[derive(Debug, Clone)]
pub struct TravelClient {
    client: Client,
    base_url: String,
    currency: String,
    timeout: Option<Duration>,
}

impl TravelClient {
    /// Build a client from the proxy settings in `config`.
    pub fn new(config: &Config) -> HandlerResult<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: config.travel_base_url.trim_end_matches('/').to_string(),
            currency: config.travel_currency.clone(),
            timeout: config.upstream_timeout,
        })
    }

    /// Upstream URL for a flight price lookup.
    pub fn flights_url(&self, search: &FlightsSearch, token: &str) -> HandlerResult<Url> {
        self.endpoint(
            FLIGHTS_PATH,
            &[
                ("currency", self.currency.as_str()),
                ("origin", search.origin.as_str()),
                ("destination", search.destination.as_str()),
                ("token", token),
            ],
        )
    }

    /// Upstream URL for a hotel search by city id.
    pub fn hotels_url(&self, search: &HotelsSearch, token: &str) -> HandlerResult<Url> {
        self.endpoint(
            HOTELS_PATH,
            &[
                ("locationId", search.destination.as_str()),
                ("checkIn", search.check_in_date.as_str()),
                ("checkOut", search.check_out_date.as_str()),
                ("token", token),
            ],
        )
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> HandlerResult<Url> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse_with_params(&raw, query)
            .map_err(|e| HandlerError::Internal(format!("invalid upstream url: {e}")))
    }

    /// Run a search against the upstream API and return its JSON body.
    ///
    /// A non-2xx answer becomes [`HandlerError::UpstreamFailure`] carrying the
    /// upstream status. The upstream body is logged, never returned.
    pub async fn search(&self, request: &SearchRequest, token: &str) -> HandlerResult<Value> {
        let url = match request {
            SearchRequest::Flights(search) => self.flights_url(search, token)?,
            SearchRequest::Hotels(search) => self.hotels_url(search, token)?,
        };

        info!(
            search_type = request.kind(),
            host = url.host_str().unwrap_or(""),
            path = url.path(),
            "upstream_request_starting"
        );

        let mut builder = self
            .client
            .get(url)
            .header(ACCESS_TOKEN_HEADER, token)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(
                search_type = request.kind(),
                status_code = status.as_u16(),
                upstream_body = %error_body,
                "upstream_request_failed"
            );
            return Err(HandlerError::UpstreamFailure(status));
        }

        let data: Value = response.json().await?;

        info!(
            search_type = request.kind(),
            status_code = status.as_u16(),
            "upstream_request_complete"
        );

        Ok(data)
    }
}
