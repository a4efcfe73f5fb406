// Error taxonomy shared by all request handlers

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::search::SearchError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Query parameter 'q' is required")]
    MissingQuery,

    #[error("Google Search API credentials are not configured")]
    MissingCredentials,

    #[error("API rate limit exceeded. Please try again later.")]
    RateLimited { retry_after: u64 },

    #[error("API access denied. Check your API key and permissions.")]
    Unauthorized,

    #[error("Failed to fetch search results")]
    Upstream { message: String },
}

/// JSON body returned for every error response.
#[derive(Debug, serde::Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(rename = "retryAfter", skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, details, retry_after) = match &self {
            AppError::MissingQuery => (StatusCode::BAD_REQUEST, None, None),
            AppError::MissingCredentials => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Some("Set GOOGLE_API_KEY and GOOGLE_SEARCH_ENGINE_ID".to_string()),
                None,
            ),
            AppError::RateLimited { retry_after } => {
                (StatusCode::TOO_MANY_REQUESTS, None, Some(*retry_after))
            }
            AppError::Unauthorized => (StatusCode::FORBIDDEN, None, None),
            AppError::Upstream { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Some(message.clone()),
                None,
            ),
        };

        let body = ErrorBody {
            error: self.to_string(),
            details,
            retry_after,
        };

        (status, Json(body)).into_response()
    }
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::RateLimited { retry_after } => AppError::RateLimited {
                retry_after: retry_after.unwrap_or(60),
            },
            SearchError::Unauthorized => AppError::Unauthorized,
            SearchError::ApiError { message, .. } => AppError::Upstream { message },
            other => AppError::Upstream {
                message: other.to_string(),
            },
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
