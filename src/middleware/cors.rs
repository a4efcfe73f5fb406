// CORS configuration
// The frontend is served from arbitrary origins (local dev, Vercel, Netlify),
// so all responses allow any origin. Preflight OPTIONS requests are answered
// by the layer itself.

use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub fn apply_cors(router: Router) -> Router {
    router.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
