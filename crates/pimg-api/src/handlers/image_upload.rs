use crate::error::HttpAppError;
use crate::services::UploadService;
use crate::state::AppState;
use crate::utils::upload::{extract_upload_form, request_origin};
use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

#[tracing::instrument(
    skip(state, headers, multipart),
    fields(strategy = %state.store.strategy(), operation = "upload_image")
)]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = extract_upload_form(multipart).await?;
    let origin = request_origin(state.config.public_base_url(), &headers);

    let response = UploadService::new(state.store.clone(), &state.config)
        .upload(form, &origin)
        .await?;

    tracing::info!(
        file_name = %response.file_name,
        image_url = %response.image_url,
        "Image uploaded"
    );

    Ok(Json(response))
}
