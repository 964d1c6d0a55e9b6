//! Serve stored images back from gists.

use bytes::Bytes;
use pimg_core::validation::validate_retrieval;
use pimg_core::AppError;
use pimg_storage::{gist, GitHubClient};

#[derive(Debug, Clone)]
pub struct ServedImage {
    pub bytes: Bytes,
    pub content_type: String,
}

pub struct RetrievalService {
    client: GitHubClient,
}

impl RetrievalService {
    pub fn new(client: GitHubClient) -> Self {
        Self { client }
    }

    /// Resolve `/gist/{gistId}/{filename}` to image bytes. Malformed paths are
    /// rejected before any upstream call.
    pub async fn retrieve(&self, path: &str) -> Result<ServedImage, AppError> {
        let locator = validate_retrieval(path)?;

        let record =
            gist::load_record(&self.client, &locator.storage_id, &locator.resource_name).await?;
        let bytes = record.decode_bytes()?;

        tracing::debug!(
            gist_id = %locator.storage_id,
            file_name = %locator.resource_name,
            size_bytes = bytes.len(),
            "Serving stored image"
        );

        Ok(ServedImage {
            content_type: record.content_type().to_string(),
            bytes: Bytes::from(bytes),
        })
    }
}
