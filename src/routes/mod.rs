//! API Routes
//!
//! This module organizes all HTTP endpoints for the application:
//! - `/search`, `/api/search` - clothing image search proxy
//! - `/` - service banner
//! - `/health` - health check

pub mod health;
pub mod search;

use axum::Router;
use tracing::info;

use crate::middleware::apply_cors;
use crate::models::AppState;

/// Create the main application router
///
/// All routes sit behind a permissive CORS layer so the browser frontend can
/// call the proxy from any deployment origin.
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let router = Router::new()
        .merge(search::router(state.clone()))
        .merge(health::router(state));

    apply_cors(router)
}
