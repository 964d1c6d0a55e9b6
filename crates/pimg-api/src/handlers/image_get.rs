use crate::error::HttpAppError;
use crate::services::RetrievalService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, Uri},
    response::IntoResponse,
};
use pimg_core::constants::CACHE_CONTROL_IMAGE;
use std::sync::Arc;

#[tracing::instrument(skip(state), fields(path = %uri.path(), operation = "get_image"))]
pub async fn get_image(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<impl IntoResponse, HttpAppError> {
    let image = RetrievalService::new(state.github.clone())
        .retrieve(uri.path())
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, image.content_type),
            (header::CACHE_CONTROL, CACHE_CONTROL_IMAGE.to_string()),
        ],
        image.bytes,
    ))
}
