//! Request validation
//!
//! Turns raw upload form fields and retrieval paths into typed, trimmed values.
//! Validation stops at the first failing check and reports only that one.

pub mod path;
pub mod upload;

pub use path::validate_retrieval;
pub use upload::{generate_file_name, validate_upload, ImageField, UploadForm, UploadRules};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Image file is required")]
    MissingImage,

    #[error("Invalid image file type")]
    InvalidImageType,

    #[error("Image file is empty")]
    EmptyImage,

    #[error("GitHub access token is required")]
    MissingAccessToken,

    #[error("GitHub username is required")]
    MissingUsername,

    #[error("GitHub repository is required")]
    MissingRepository,

    #[error("Invalid URL format. Expected: /gist/{{gistId}}/{{filename}}")]
    InvalidUrlFormat,
}
