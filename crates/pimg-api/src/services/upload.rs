//! Upload orchestration: validate, name, encode, store, respond.

use chrono::Utc;
use pimg_core::validation::{generate_file_name, validate_upload, UploadForm, UploadRules};
use pimg_core::{codec, Config, RetrievalLocator};
use pimg_storage::{ImageStore, StoredImage};
use serde::Serialize;
use std::sync::Arc;

use crate::error::HttpAppError;

/// Strategy-specific part of a successful upload response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UploadLocation {
    Gist {
        #[serde(rename = "gistId")]
        gist_id: String,
    },
    Issue {
        #[serde(rename = "issueNumber")]
        issue_number: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub image_url: String,
    pub file_name: String,
    #[serde(flatten)]
    pub location: UploadLocation,
}

impl UploadResponse {
    /// Gist uploads are served back through this gateway; commits link the raw file.
    fn from_stored(stored: StoredImage, file_name: String, origin: &str) -> Self {
        let (image_url, location) = match stored {
            StoredImage::Gist { gist_id } => {
                let locator = RetrievalLocator {
                    storage_id: gist_id.clone(),
                    resource_name: file_name.clone(),
                };
                (
                    format!("{}{}", origin, locator.path()),
                    UploadLocation::Gist { gist_id },
                )
            }
            StoredImage::Repository {
                download_url,
                issue_number,
            } => (download_url, UploadLocation::Issue { issue_number }),
        };

        Self {
            success: true,
            image_url,
            file_name,
            location,
        }
    }
}

pub struct UploadService {
    store: Arc<dyn ImageStore>,
    rules: UploadRules,
}

impl UploadService {
    pub fn new(store: Arc<dyn ImageStore>, config: &Config) -> Self {
        let strategy = store.strategy();
        Self {
            store,
            rules: UploadRules {
                require_owner: strategy.requires_owner(),
                require_repository: strategy.requires_repository(),
                default_repository: config.github.default_repository.clone(),
            },
        }
    }

    /// Run one upload. Nothing reaches GitHub unless the form validates.
    pub async fn upload(&self, form: UploadForm, origin: &str) -> Result<UploadResponse, HttpAppError> {
        let request = validate_upload(form, &self.rules)?;

        let file_name = generate_file_name(&request.original_filename, Utc::now().timestamp_millis());
        let encoded = codec::encode(&request.image_bytes);

        tracing::debug!(
            strategy = %self.store.strategy(),
            file_name = %file_name,
            mime_type = %request.image_mime_type,
            size_bytes = request.image_bytes.len(),
            "Storing upload"
        );

        let stored = self.store.store(&request, &file_name, &encoded).await?;

        Ok(UploadResponse::from_stored(stored, file_name, origin))
    }
}
