//! Request and response bodies for the GitHub endpoints in use.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A file inside a gist as returned by `GET /gists/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GistFile {
    /// Absent for very large files; cut short when `truncated` is set.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default, rename = "type")]
    pub file_type: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub raw_url: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub truncated: bool,
}

/// Gist metadata plus its file map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GistData {
    pub id: String,
    #[serde(default)]
    pub files: HashMap<String, GistFile>,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedFile {
    pub download_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedGist {
    pub gist_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedIssue {
    pub issue_number: u64,
}

// ----- wire types -----

#[derive(Debug, Deserialize)]
pub(crate) struct GitHubErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PutContentsRequest<'a> {
    pub message: &'a str,
    pub content: &'a str,
    pub branch: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PutContentsResponse {
    #[serde(default)]
    pub content: Option<ContentInfo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContentInfo {
    #[serde(default)]
    pub download_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GistFileContent<'a> {
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateGistRequest<'a> {
    pub description: &'a str,
    pub public: bool,
    pub files: HashMap<&'a str, GistFileContent<'a>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateGistResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateIssueRequest<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateIssueResponse {
    pub number: u64,
}
