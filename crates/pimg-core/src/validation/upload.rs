use bytes::Bytes;

use super::ValidationError;
use crate::constants::{DEFAULT_EXTENSION, FILENAME_PREFIX, IMAGE_MIME_PREFIX};
use crate::models::{Credentials, UploadRequest};

const MAX_EXTENSION_LENGTH: usize = 10;

/// The `image` form field as received.
#[derive(Debug, Clone, Default)]
pub struct ImageField {
    pub bytes: Bytes,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

/// Raw upload form fields, before any checks.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub image: Option<ImageField>,
    pub github_access_token: Option<String>,
    pub github_username: Option<String>,
    pub github_repository: Option<String>,
}

/// Strategy-dependent requirements for an upload.
#[derive(Debug, Clone, Default)]
pub struct UploadRules {
    pub require_owner: bool,
    pub require_repository: bool,
    /// Used when the form does not name a repository.
    pub default_repository: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_image_mime_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim().to_lowercase())
        .is_some_and(|mime| mime.starts_with(IMAGE_MIME_PREFIX) && mime.len() > IMAGE_MIME_PREFIX.len())
}

/// Validate upload form fields. Returns the first failing condition.
pub fn validate_upload(form: UploadForm, rules: &UploadRules) -> Result<UploadRequest, ValidationError> {
    let image = form.image.ok_or(ValidationError::MissingImage)?;

    let content_type = image
        .content_type
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    if !is_image_mime_type(content_type) {
        return Err(ValidationError::InvalidImageType);
    }

    if image.bytes.is_empty() {
        return Err(ValidationError::EmptyImage);
    }

    let access_token =
        non_blank(form.github_access_token).ok_or(ValidationError::MissingAccessToken)?;

    let owner = non_blank(form.github_username);
    if rules.require_owner && owner.is_none() {
        return Err(ValidationError::MissingUsername);
    }

    let repository = non_blank(form.github_repository)
        .or_else(|| non_blank(rules.default_repository.clone()));
    if rules.require_repository && repository.is_none() {
        return Err(ValidationError::MissingRepository);
    }

    let original_filename = non_blank(image.file_name).unwrap_or_else(|| "image".to_string());

    Ok(UploadRequest {
        image_mime_type: content_type.to_string(),
        image_bytes: image.bytes,
        original_filename,
        credentials: Credentials {
            access_token,
            owner,
            repository,
        },
    })
}

/// Extension of `filename`, or the default when it has none usable.
pub fn file_extension(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext))
            if !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LENGTH
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            ext.to_ascii_lowercase()
        }
        _ => DEFAULT_EXTENSION.to_string(),
    }
}

/// Timestamped storage name that keeps the original extension, e.g.
/// `obsidian-upload-1718000000000.jpg`.
pub fn generate_file_name(original_filename: &str, timestamp_millis: i64) -> String {
    format!(
        "{}-{}.{}",
        FILENAME_PREFIX,
        timestamp_millis,
        file_extension(original_filename)
    )
}
