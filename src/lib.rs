// TailorTech Search - Google Custom Search proxy for the fashion design frontend

pub mod config;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod search; // Google Custom Search client and result filtering
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
