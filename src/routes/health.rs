use axum::{extract::State, response::Json as ResponseJson, routing::get, Json, Router};

use crate::models::{AppState, HealthResponse, IndexResponse};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .with_state(state)
}

async fn index() -> ResponseJson<IndexResponse> {
    Json(IndexResponse {
        status: "TailorTech Google Search Proxy Server Running".to_string(),
        endpoints: vec!["/search".to_string(), "/health".to_string()],
    })
}

async fn health_check(State(state): State<AppState>) -> ResponseJson<HealthResponse> {
    let upstream = if state.config.search.is_configured() {
        "configured"
    } else {
        "missing credentials"
    };

    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        upstream: upstream.to_string(),
    })
}
