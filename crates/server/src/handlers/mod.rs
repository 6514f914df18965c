//! HTTP surface of the gateway.
//!
//! One route family per search category plus the image proxy. The
//! category-to-client binding happens here, at router construction: each
//! route names its handler and each handler names its client field, so an
//! unmapped category cannot compile.

pub mod image;
pub mod search;

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/tmdb", get(search::screen))
        .route("/api/books", get(search::books))
        .route("/api/rawg", get(search::games))
        .route("/api/image", get(image::proxy))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /: liveness line.
async fn root() -> &'static str {
    "shelfmark gateway is running"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use shelfmark_core::AppConfig;
    use tower::ServiceExt;

    /// State with dummy keys: requests that pass validation would hit real
    /// upstreams, so these tests only exercise paths that fail closed first.
    fn test_state() -> AppState {
        let config = AppConfig {
            tmdb_api_key: Some("test-key".into()),
            rawg_api_key: Some("test-key".into()),
            ..Default::default()
        };
        AppState::from_config(&config).unwrap()
    }

    async fn get_status(uri: &str) -> StatusCode {
        let app = router(test_state());
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        response.status()
    }

    #[tokio::test]
    async fn test_root_is_alive() {
        assert_eq!(get_status("/").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_search_without_query_is_400() {
        assert_eq!(get_status("/api/tmdb").await, StatusCode::BAD_REQUEST);
        assert_eq!(get_status("/api/books").await, StatusCode::BAD_REQUEST);
        assert_eq!(get_status("/api/rawg").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_with_blank_query_is_400() {
        assert_eq!(get_status("/api/tmdb?query=&page=1").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_with_unknown_type_is_400() {
        assert_eq!(get_status("/api/tmdb?query=dune&type=radio").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_image_without_url_is_400() {
        assert_eq!(get_status("/api/image").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_image_with_foreign_host_is_400() {
        // Rejected by the allowlist before any upstream request is issued.
        assert_eq!(
            get_status("/api/image?u=https%3A%2F%2Fevil.example%2Fposter.jpg").await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_image_with_relative_url_is_400() {
        assert_eq!(get_status("/api/image?u=%2Ft%2Fp%2Fw500%2Fx.jpg").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        assert_eq!(get_status("/api/unknown").await, StatusCode::NOT_FOUND);
    }
}
