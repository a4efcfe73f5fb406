use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json as ResponseJson,
    routing::get,
    Json, Router,
};
use tracing::info;

use crate::models::{AppState, SearchParams, SearchResponse};
use crate::search::{filter_and_map, CseClient, FilterOptions};
use crate::types::{AppError, AppResult, ErrorBody};

pub fn router(state: AppState) -> Router {
    // The original deployments exposed the same operation under /search
    // (standalone proxy) and /api/search (serverless); serve both.
    Router::new()
        .route(
            "/search",
            get(search).options(preflight).fallback(method_not_allowed),
        )
        .route(
            "/api/search",
            get(search).options(preflight).fallback(method_not_allowed),
        )
        .with_state(state)
}

/// GET /search?q=<clothing description>
///
/// Validates the query, forwards it to Google Custom Search with the
/// clothing hint appended, filters out non-garment results, and returns the
/// normalized list.
async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<ResponseJson<SearchResponse>> {
    let query = params.q.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err(AppError::MissingQuery);
    }

    let client =
        CseClient::from_config(&state.config.search).ok_or(AppError::MissingCredentials)?;

    info!(query = %query, "Searching for clothing items");

    let upstream = client.search_images(query).await?;
    let raw_count = upstream.items.len();

    let options = FilterOptions {
        allow_positive_override: state.config.filter.positive_override,
    };
    let results = filter_and_map(upstream.items, options);

    info!(
        query = %query,
        raw = raw_count,
        kept = results.len(),
        "Search completed"
    );

    Ok(Json(SearchResponse {
        results,
        total_results: upstream.total_results,
    }))
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody {
            error: "Method not allowed".to_string(),
            details: None,
            retry_after: None,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, FilterConfig, SearchConfig, ServerConfig};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    const TWO_ITEM_BODY: &str = r#"{
        "searchInformation": { "totalResults": "2" },
        "items": [
            {
                "title": "Red Leather Jacket",
                "link": "https://img.example.com/1.jpg",
                "snippet": "Classic biker style",
                "displayLink": "shop.example.com",
                "image": {
                    "contextLink": "https://shop.example.com/jackets/1",
                    "thumbnailLink": "https://img.example.com/t1.jpg"
                }
            },
            {
                "title": "Red Jacket Handbag",
                "link": "https://img.example.com/2.jpg",
                "snippet": "Matching handbag",
                "displayLink": "shop.example.com",
                "image": {
                    "contextLink": "https://shop.example.com/bags/2",
                    "thumbnailLink": "https://img.example.com/t2.jpg"
                }
            }
        ]
    }"#;

    fn test_state(endpoint: &str, configured: bool) -> AppState {
        let credential = |v: &str| {
            if configured {
                v.to_string()
            } else {
                String::new()
            }
        };

        AppState {
            config: Config {
                server: ServerConfig {
                    port: 0,
                    host: "127.0.0.1".to_string(),
                },
                search: SearchConfig {
                    api_key: credential("test-key"),
                    engine_id: credential("test-cx"),
                    endpoint: endpoint.to_string(),
                    result_count: 10,
                },
                filter: FilterConfig {
                    positive_override: false,
                },
            },
        }
    }

    #[tokio::test]
    async fn test_missing_query_makes_no_upstream_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let state = test_state(&server.url(), true);

        let err = search(State(state.clone()), Query(SearchParams { q: None }))
            .await
            .expect_err("should fail");
        assert!(matches!(err, AppError::MissingQuery));

        let err = search(
            State(state),
            Query(SearchParams {
                q: Some("   ".to_string()),
            }),
        )
        .await
        .expect_err("should fail");
        assert!(matches!(err, AppError::MissingQuery));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_credentials_makes_no_upstream_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let state = test_state(&server.url(), false);

        let err = search(
            State(state),
            Query(SearchParams {
                q: Some("red jacket".to_string()),
            }),
        )
        .await
        .expect_err("should fail");

        assert!(matches!(err, AppError::MissingCredentials));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_filters_and_passes_metadata_through() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(TWO_ITEM_BODY)
            .create_async()
            .await;

        let state = test_state(&server.url(), true);

        let Json(response) = search(
            State(state),
            Query(SearchParams {
                q: Some("red jacket".to_string()),
            }),
        )
        .await
        .expect("search");

        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].title, "Red Leather Jacket");
        assert_eq!(response.results[0].context, "https://shop.example.com/jackets/1");
        assert_eq!(response.total_results, "2");
    }

    #[tokio::test]
    async fn test_identical_requests_identical_results() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(TWO_ITEM_BODY)
            .expect(2)
            .create_async()
            .await;

        let state = test_state(&server.url(), true);
        let params = || {
            Query(SearchParams {
                q: Some("red jacket".to_string()),
            })
        };

        let Json(first) = search(State(state.clone()), params()).await.expect("search");
        let Json(second) = search(State(state), params()).await.expect("search");

        assert_eq!(first.results, second.results);
        assert_eq!(first.total_results, second.total_results);
    }

    #[tokio::test]
    async fn test_rate_limit_surfaces_retry_hint() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::Any)
            .with_status(429)
            .with_header("retry-after", "30")
            .create_async()
            .await;

        let state = test_state(&server.url(), true);

        let err = search(
            State(state),
            Query(SearchParams {
                q: Some("red jacket".to_string()),
            }),
        )
        .await
        .expect_err("should fail");

        assert!(matches!(err, AppError::RateLimited { retry_after: 30 }));
    }

    #[tokio::test]
    async fn test_post_is_method_not_allowed() {
        let state = test_state("http://127.0.0.1:1", true);
        let app = router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/search?q=red+jacket")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_api_prefix_serves_same_operation() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(TWO_ITEM_BODY)
            .create_async()
            .await;

        let app = router(test_state(&server.url(), true));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/search?q=red+jacket")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_options_short_circuits() {
        let state = test_state("http://127.0.0.1:1", true);
        let app = crate::routes::create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/search")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
