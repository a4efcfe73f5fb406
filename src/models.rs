use crate::config::Config;
use crate::search::ResultItem;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}

// API Request/Response types

#[derive(Debug, serde::Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Search response format matching frontend expectations
/// Frontend googleLensService.js expects: { results: [...], totalResults }
#[derive(Debug, serde::Serialize)]
pub struct SearchResponse {
    pub results: Vec<ResultItem>,
    /// Passthrough of the upstream `searchInformation.totalResults` count.
    /// Google reports this as a decimal string.
    #[serde(rename = "totalResults")]
    pub total_results: String,
}

#[derive(Debug, serde::Serialize)]
pub struct IndexResponse {
    pub status: String,
    pub endpoints: Vec<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub upstream: String,
}
