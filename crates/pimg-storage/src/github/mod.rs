//! GitHub REST API client

pub mod client;
pub mod error;
pub mod types;

pub use client::GitHubClient;
pub use error::{UpstreamError, UpstreamResult};
pub use types::{CommittedFile, CreatedGist, CreatedIssue, GistData, GistFile};
