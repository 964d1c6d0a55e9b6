//! The JSON envelope stored as gist content.
//!
//! Wire format (no version field):
//!
//! ```json
//! { "data": "<base64>", "mimeType": "image/png", "uploadedAt": "2026-01-01T00:00:00Z" }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::constants::DEFAULT_IMAGE_MIME_TYPE;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredImageRecord {
    /// Base64 image bytes
    pub data: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl StoredImageRecord {
    pub fn new(data: String, mime_type: impl Into<String>, uploaded_at: DateTime<Utc>) -> Self {
        Self {
            data,
            mime_type: Some(mime_type.into()),
            uploaded_at: Some(uploaded_at),
        }
    }

    /// Serialize for storage.
    pub fn to_json(&self) -> Result<String, AppError> {
        serde_json::to_string(self)
            .map_err(|e| AppError::Internal(format!("Failed to serialize image record: {}", e)))
    }

    /// Parse stored content. Any shape other than the envelope is a decode error.
    pub fn from_json(content: &str) -> Result<Self, AppError> {
        serde_json::from_str(content)
            .map_err(|e| AppError::Decode(format!("Invalid image record: {}", e)))
    }

    /// Stored MIME type, falling back to `image/png` when absent or blank.
    pub fn content_type(&self) -> &str {
        self.mime_type
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_IMAGE_MIME_TYPE)
    }

    /// Decode the image payload.
    pub fn decode_bytes(&self) -> Result<Vec<u8>, AppError> {
        Ok(codec::decode(&self.data)?)
    }
}
