//! HTTP listing service backed by the cars API on RapidAPI.

use crate::catalogue::{FilterCriteria, ResultSet};
use crate::config::ApiConfig;
use crate::error::{AutocatError, Result};
use crate::fetch::service::ListingFetchService;
use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

const API_KEY_HEADER: &str = "x-rapidapi-key";
const API_HOST_HEADER: &str = "x-rapidapi-host";

/// Fetches listings with a single GET per call.
///
/// No timeout is configured on the client: a hung call stays pending until
/// the server answers or the connection drops.
pub struct HttpListingService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpListingService {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(API_KEY_HEADER),
            HeaderValue::from_str(&config.api_key)
                .map_err(|e| AutocatError::config(format!("invalid API key header: {}", e)))?,
        );
        headers.insert(
            HeaderName::from_static(API_HOST_HEADER),
            HeaderValue::from_str(&config.api_host)
                .map_err(|e| AutocatError::config(format!("invalid API host header: {}", e)))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Build the GET request for `criteria` without sending it.
    pub fn build_request(&self, criteria: &FilterCriteria) -> Result<reqwest::Request> {
        let year = criteria.year.to_string();
        let limit = criteria.limit.to_string();
        let request = self
            .client
            .get(&self.base_url)
            .query(&[
                ("make", criteria.manufacturer.as_str()),
                ("year", year.as_str()),
                ("model", criteria.model.as_str()),
                ("limit", limit.as_str()),
                ("fuel_type", criteria.fuel.as_str()),
            ])
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl ListingFetchService for HttpListingService {
    async fn fetch(&self, criteria: &FilterCriteria) -> Result<ResultSet> {
        let request = self.build_request(criteria)?;
        debug!("GET {}", request.url());

        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AutocatError::fetch(status_message(status, &body)));
        }

        let value: serde_json::Value = serde_json::from_str(&body)?;
        Ok(ResultSet::from_json(value))
    }
}

/// Failure text for a non-success status, preferring the API's own `message`.
fn status_message(status: reqwest::StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        });

    match detail {
        Some(message) if !message.is_empty() => format!("HTTP {}: {}", status, message),
        _ => format!("HTTP {}", status),
    }
}
