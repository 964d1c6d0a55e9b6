//! Common utilities for the upload handler

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::{HeaderMap, StatusCode};
use pimg_core::validation::{ImageField, UploadForm};
use pimg_core::AppError;

const IMAGE_FIELD: &str = "image";
const ACCESS_TOKEN_FIELD: &str = "githubAccessToken";
const USERNAME_FIELD: &str = "githubUsername";
const REPOSITORY_FIELD: &str = "githubRepository";

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Request body too large".to_string())
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
    }
}

/// Collect the upload form fields. Unknown fields are skipped; a repeated field
/// keeps its last value. No field is checked here beyond reading it.
pub async fn extract_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            IMAGE_FIELD => {
                let file_name = field.file_name().map(|s: &str| s.to_string());
                let content_type = field.content_type().map(|s: &str| s.to_string());
                let bytes = field.bytes().await.map_err(multipart_error)?;
                form.image = Some(ImageField {
                    bytes,
                    content_type,
                    file_name,
                });
            }
            ACCESS_TOKEN_FIELD => form.github_access_token = Some(field.text().await.map_err(multipart_error)?),
            USERNAME_FIELD => form.github_username = Some(field.text().await.map_err(multipart_error)?),
            REPOSITORY_FIELD => form.github_repository = Some(field.text().await.map_err(multipart_error)?),
            _ => {
                tracing::debug!(field = %field_name, "Ignoring unknown form field");
            }
        }
    }

    Ok(form)
}

/// Origin used to build retrieval URLs: the configured public base URL, else the
/// request's `X-Forwarded-Proto` (default `http`) and `Host`.
pub fn request_origin(public_base_url: Option<&str>, headers: &HeaderMap) -> String {
    if let Some(base) = public_base_url {
        return base.trim_end_matches('/').to_string();
    }

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("http");
    let host = headers
        .get(axum::http::header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    format!("{}://{}", scheme, host)
}
