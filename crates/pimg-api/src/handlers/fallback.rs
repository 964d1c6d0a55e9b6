//! Requests that match no route.

use crate::error::HttpAppError;
use crate::handlers::{health::health_check, image_get::get_image, image_upload::upload_image};
use crate::state::AppState;
use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::Method,
    response::{IntoResponse, Response},
};
use pimg_core::constants::GIST_ROUTE_SEGMENT;
use pimg_core::AppError;
use std::sync::Arc;

fn is_gist_path(path: &str) -> bool {
    path.strip_prefix('/')
        .and_then(|rest| rest.strip_prefix(GIST_ROUTE_SEGMENT))
        .is_some_and(|rest| rest.starts_with('/'))
}

/// A POST to any path is an upload. GETs under `/gist` go to retrieval (which
/// rejects malformed paths), any other GET is a health check, every other method
/// is refused.
pub async fn fallback(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let method = request.method().clone();

    if method == Method::POST {
        let headers = request.headers().clone();
        return match Multipart::from_request(request, &state).await {
            Ok(multipart) => upload_image(State(state), headers, multipart)
                .await
                .into_response(),
            Err(rejection) => rejection.into_response(),
        };
    }

    if method != Method::GET {
        return method_not_allowed().await.into_response();
    }

    if is_gist_path(request.uri().path()) {
        let uri = request.uri().clone();
        get_image(State(state), uri).await.into_response()
    } else {
        health_check().await.into_response()
    }
}

pub async fn method_not_allowed() -> HttpAppError {
    HttpAppError(AppError::MethodNotAllowed)
}
