//! Google Custom Search Client
//!
//! Provides image search functionality using the Google Custom Search JSON
//! API. Queries are augmented with a fixed clothing hint so that a free-text
//! garment description ("red jacket") lands in the fashion slice of the
//! index rather than general web results.
//!
//! The client performs exactly one outbound GET per search, with an explicit
//! timeout and a single retry on transient failures (5xx, timeout, transport
//! errors). Client errors are never retried.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::SearchConfig;
use crate::utils::retry::with_retry;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_ATTEMPTS: u32 = 2;

/// Fixed domain hint appended to every query. Keeps upstream results biased
/// toward garments before the keyword filter runs.
const QUERY_SUFFIX: &str = "clothing apparel fashion";

/// Errors that can occur during search operations
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Rate limit exceeded")]
    RateLimited { retry_after: Option<u64> },

    #[error("Invalid API key or search engine ID")]
    Unauthorized,

    #[error("Invalid response from Google: {0}")]
    InvalidResponse(String),

    #[error("Google API error: {status} - {message}")]
    ApiError { status: u16, message: String },
}

impl SearchError {
    pub fn is_retryable(&self) -> bool {
        match self {
            SearchError::Network(_) | SearchError::Timeout => true,
            SearchError::ApiError { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Per-item payload from the upstream response. Owned by the upstream
/// response; copied into `ResultItem` by the filter, never mutated in place.
#[derive(Debug, Clone, Deserialize)]
pub struct RawResultItem {
    pub title: String,
    /// Image URL.
    pub link: String,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(rename = "displayLink")]
    pub display_link: Option<String>,
    #[serde(default)]
    pub image: Option<ImageInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageInfo {
    /// Source page the image came from.
    #[serde(rename = "contextLink")]
    pub context_link: Option<String>,
    #[serde(rename = "thumbnailLink")]
    pub thumbnail_link: Option<String>,
}

/// Raw item list plus passthrough metadata from upstream.
#[derive(Debug, Clone)]
pub struct CseResults {
    pub items: Vec<RawResultItem>,
    pub total_results: String,
}

#[derive(Debug, Deserialize)]
struct CseResponse {
    #[serde(default)]
    items: Vec<RawResultItem>,
    #[serde(rename = "searchInformation")]
    search_information: Option<SearchInformation>,
}

#[derive(Debug, Deserialize)]
struct SearchInformation {
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CseErrorBody {
    error: Option<CseErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct CseErrorDetail {
    message: Option<String>,
}

/// Client for the Google Custom Search JSON API, image search type.
#[derive(Debug, Clone)]
pub struct CseClient {
    http_client: reqwest::Client,
    api_key: String,
    engine_id: String,
    endpoint: String,
    result_count: u32,
}

impl CseClient {
    /// Create a new client with the given credentials.
    pub fn new(api_key: impl Into<String>, engine_id: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            api_key: api_key.into(),
            engine_id: engine_id.into(),
            endpoint: crate::config::DEFAULT_SEARCH_ENDPOINT.to_string(),
            result_count: 20,
        }
    }

    /// Configure client from config. Returns `None` when credentials are
    /// missing, so callers surface a configuration error without making an
    /// upstream call.
    pub fn from_config(config: &SearchConfig) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }

        Some(
            Self::new(config.api_key.clone(), config.engine_id.clone())
                .with_endpoint(config.endpoint.clone())
                .with_result_count(config.result_count),
        )
    }

    /// Set a custom endpoint URL (useful for testing).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the number of results requested per search, within the 1-20
    /// envelope the API accepts.
    pub fn with_result_count(mut self, count: u32) -> Self {
        self.result_count = count.clamp(1, 20);
        self
    }

    /// Search for clothing images matching the query.
    ///
    /// The query is augmented deterministically before the call; two
    /// identical queries always produce identical upstream requests.
    pub async fn search_images(&self, query: &str) -> Result<CseResults, SearchError> {
        let augmented = build_query(query);

        with_retry(
            || self.search_inner(&augmented),
            MAX_ATTEMPTS,
            SearchError::is_retryable,
        )
        .await
    }

    async fn search_inner(&self, query: &str) -> Result<CseResults, SearchError> {
        debug!(url = %self.endpoint, query = %query, "Sending image search request to Google CSE");

        let num = self.result_count.to_string();
        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("cx", self.engine_id.as_str()),
                ("key", self.api_key.as_str()),
                ("searchType", "image"),
                ("num", num.as_str()),
                ("imgType", "photo"),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!("Request timed out");
                    return SearchError::Timeout;
                }
                error!(error = %e, "Network error during Google CSE request");
                SearchError::Network(e)
            })?;

        let status = response.status();
        debug!(status = %status, "Received response from Google CSE");

        if !status.is_success() {
            let status_code = status.as_u16();

            if status_code == 429 {
                let retry_after = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok());
                warn!(status = status_code, "Google CSE rate limit exceeded");
                return Err(SearchError::RateLimited { retry_after });
            }

            if status_code == 403 {
                error!(status = status_code, "Google CSE access denied");
                return Err(SearchError::Unauthorized);
            }

            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<CseErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| "Unknown error".to_string());

            error!(status = status_code, message = %message, "Google CSE API error");
            return Err(SearchError::ApiError {
                status: status_code,
                message,
            });
        }

        let body = response.text().await.map_err(|e| {
            error!(error = %e, "Failed to read response body");
            SearchError::Network(e)
        })?;

        let parsed: CseResponse = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "Failed to parse Google CSE response");
            SearchError::InvalidResponse(format!("JSON parse error: {e}"))
        })?;

        let total_results = parsed
            .search_information
            .and_then(|s| s.total_results)
            .unwrap_or_else(|| "0".to_string());

        debug!(result_count = parsed.items.len(), "Image search completed");

        Ok(CseResults {
            items: parsed.items,
            total_results,
        })
    }
}

/// Build the upstream query from a raw clothing description.
pub fn build_query(query: &str) -> String {
    format!("{} {}", query.trim(), QUERY_SUFFIX)
}
