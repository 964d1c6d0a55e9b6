use axum::http::header;
use axum::response::IntoResponse;
use pimg_core::constants::{CACHE_CONTROL_HEALTH_CHECK, HEALTH_CHECK_MESSAGE};

pub async fn health_check() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CACHE_CONTROL, CACHE_CONTROL_HEALTH_CHECK),
        ],
        HEALTH_CHECK_MESSAGE,
    )
}
