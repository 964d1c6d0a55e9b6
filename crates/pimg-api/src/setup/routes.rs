//! Route configuration and setup

use crate::handlers::{
    fallback::{fallback, method_not_allowed},
    health::health_check,
    image_get::get_image,
    image_upload::upload_image,
};
use crate::middleware::cors_middleware;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Router<()> {
    let max_upload_size = state.config.max_upload_size_bytes();
    let http_concurrency_limit = state.config.http_concurrency_limit();
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    Router::new()
        .route(
            "/",
            get(health_check)
                .head(method_not_allowed)
                .post(upload_image)
                .fallback(method_not_allowed),
        )
        .route(
            "/gist/{*rest}",
            get(get_image)
                .head(method_not_allowed)
                .post(upload_image)
                .fallback(method_not_allowed),
        )
        .fallback(fallback)
        // Sole body cap; multipart reports it as 413
        .layer(DefaultBodyLimit::max(max_upload_size))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(cors_middleware))
        .with_state(state)
}
