//! Repository commit storage strategy
//!
//! Commits the raw image into `{commit_path}/{file_name}` on the configured branch,
//! then opens an issue embedding the committed file. The two calls are not atomic:
//! if the issue cannot be created the commit stays in place.

use async_trait::async_trait;
use pimg_core::UploadRequest;

use crate::github::GitHubClient;
use crate::traits::{ImageStore, StorageError, StorageResult, StoredImage};
use crate::StorageStrategy;

pub struct CommitStore {
    client: GitHubClient,
    branch: String,
    commit_path: String,
}

impl CommitStore {
    pub fn new(client: GitHubClient, branch: impl Into<String>, commit_path: impl Into<String>) -> Self {
        Self {
            client,
            branch: branch.into(),
            commit_path: commit_path.into().trim_matches('/').to_string(),
        }
    }

    fn file_path(&self, file_name: &str) -> String {
        if self.commit_path.is_empty() {
            file_name.to_string()
        } else {
            format!("{}/{}", self.commit_path, file_name)
        }
    }
}

/// Markdown body for the issue that announces an upload.
pub fn issue_body(file_name: &str, download_url: &str) -> String {
    format!("![{}]({})\n\nUploaded via Pimg", file_name, download_url)
}

#[async_trait]
impl ImageStore for CommitStore {
    #[tracing::instrument(skip_all, fields(file_name = %file_name))]
    async fn store(
        &self,
        request: &UploadRequest,
        file_name: &str,
        encoded: &str,
    ) -> StorageResult<StoredImage> {
        let credentials = &request.credentials;
        let owner = credentials
            .owner
            .as_deref()
            .ok_or(StorageError::MissingField("githubUsername"))?;
        let repo = credentials
            .repository
            .as_deref()
            .ok_or(StorageError::MissingField("githubRepository"))?;

        let path = self.file_path(file_name);
        let committed = self
            .client
            .commit_file(
                &credentials.access_token,
                owner,
                repo,
                &path,
                encoded,
                &format!("Upload image: {}", file_name),
                &self.branch,
            )
            .await
            .map_err(StorageError::Commit)?;

        let issue = match self
            .client
            .create_issue(
                &credentials.access_token,
                owner,
                repo,
                &format!("Image Upload: {}", file_name),
                &issue_body(file_name, &committed.download_url),
            )
            .await
        {
            Ok(issue) => issue,
            Err(e) => {
                tracing::warn!(
                    owner = %owner,
                    repo = %repo,
                    path = %path,
                    download_url = %committed.download_url,
                    error = %e,
                    "Issue creation failed after commit; committed file left in place"
                );
                return Err(StorageError::IssueCreation(e));
            }
        };

        tracing::info!(
            owner = %owner,
            repo = %repo,
            path = %path,
            issue_number = issue.issue_number,
            size_bytes = request.image_bytes.len(),
            "Image committed to repository"
        );

        Ok(StoredImage::Repository {
            download_url: committed.download_url,
            issue_number: issue.issue_number,
        })
    }

    fn strategy(&self) -> StorageStrategy {
        StorageStrategy::Commit
    }
}
