//! Gist storage strategy
//!
//! One gist per image. The gist holds a single file named after the upload whose
//! content is a [`StoredImageRecord`] JSON envelope. Reading it back needs no
//! credentials: secret gists are readable by anyone who knows the id.

use async_trait::async_trait;
use chrono::Utc;
use pimg_core::{AppError, StoredImageRecord, UploadRequest};
use std::collections::HashMap;

use crate::github::{GistFile, GitHubClient};
use crate::traits::{ImageStore, StorageError, StorageResult, StoredImage};
use crate::StorageStrategy;

pub struct GistStore {
    client: GitHubClient,
    public: bool,
}

impl GistStore {
    pub fn new(client: GitHubClient, public: bool) -> Self {
        Self { client, public }
    }
}

#[async_trait]
impl ImageStore for GistStore {
    #[tracing::instrument(skip_all, fields(file_name = %file_name))]
    async fn store(
        &self,
        request: &UploadRequest,
        file_name: &str,
        encoded: &str,
    ) -> StorageResult<StoredImage> {
        let record = StoredImageRecord::new(
            encoded.to_string(),
            request.image_mime_type.clone(),
            Utc::now(),
        );
        let content = record
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let mut files = HashMap::with_capacity(1);
        files.insert(file_name.to_string(), content);

        let description = format!("Image uploaded by Pimg: {}", file_name);
        let gist = self
            .client
            .create_gist(
                &request.credentials.access_token,
                &description,
                self.public,
                &files,
            )
            .await
            .map_err(StorageError::GistCreation)?;

        tracing::info!(
            gist_id = %gist.gist_id,
            file_name = %file_name,
            size_bytes = request.image_bytes.len(),
            "Image stored in gist"
        );

        Ok(StoredImage::Gist {
            gist_id: gist.gist_id,
        })
    }

    fn strategy(&self) -> StorageStrategy {
        StorageStrategy::Gist
    }
}

/// Load the envelope stored at `file_name` in gist `gist_id`.
///
/// Any failure to fetch the gist reads as "not found"; a present file whose content
/// cannot be obtained or parsed is a decode error.
pub async fn load_record(
    client: &GitHubClient,
    gist_id: &str,
    file_name: &str,
) -> Result<StoredImageRecord, AppError> {
    let gist = client
        .fetch_gist(gist_id, None)
        .await
        .map_err(|_| AppError::NotFound("Gist not found".to_string()))?;

    let file = gist
        .files
        .get(file_name)
        .ok_or_else(|| AppError::NotFound("File not found in gist".to_string()))?;

    let content = file_content(client, file).await?;
    StoredImageRecord::from_json(&content)
}

async fn file_content(client: &GitHubClient, file: &GistFile) -> Result<String, AppError> {
    match (&file.content, file.truncated, &file.raw_url) {
        (Some(content), false, _) => Ok(content.clone()),
        (_, _, Some(raw_url)) => client
            .fetch_raw(raw_url, None)
            .await
            .map_err(|e| AppError::Decode(format!("Failed to download gist file: {}", e))),
        (Some(_), true, None) => Err(AppError::Decode(
            "Gist file is truncated and has no raw URL".to_string(),
        )),
        (None, _, None) => Err(AppError::Decode("Gist file has no content".to_string())),
    }
}
