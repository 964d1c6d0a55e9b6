//! Storage abstraction trait
//!
//! Each storage strategy implements [`ImageStore`]; the upload path only sees the trait.

use crate::github::UpstreamError;
use crate::StorageStrategy;
use async_trait::async_trait;
use pimg_core::UploadRequest;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Gist creation failed: {0}")]
    GistCreation(UpstreamError),

    #[error("File commit failed: {0}")]
    Commit(UpstreamError),

    #[error("Issue creation failed: {0}")]
    IssueCreation(UpstreamError),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Where an upload ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredImage {
    Gist {
        gist_id: String,
    },
    Repository {
        download_url: String,
        issue_number: u64,
    },
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist one image under `file_name`.
    ///
    /// `encoded` is the base64 form of `request.image_bytes`. Steps run in order
    /// and the first failure aborts; nothing already written is undone.
    async fn store(
        &self,
        request: &UploadRequest,
        file_name: &str,
        encoded: &str,
    ) -> StorageResult<StoredImage>;

    fn strategy(&self) -> StorageStrategy;
}
