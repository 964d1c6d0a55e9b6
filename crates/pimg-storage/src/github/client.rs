//! Typed client for the GitHub REST endpoints used for storage.
//!
//! Every call sends the configured `User-Agent`, the v3 JSON `Accept` header and,
//! when a token is given, `Authorization: Bearer {token}`. Non-success statuses
//! and transport failures both come back as [`UpstreamError`].

use anyhow::{Context, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use pimg_core::GitHubConfig;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use super::error::{UpstreamError, UpstreamResult};
use super::types::{
    CommittedFile, CreateGistRequest, CreateGistResponse, CreateIssueRequest,
    CreateIssueResponse, CreatedGist, CreatedIssue, GistData, GistFileContent,
    GitHubErrorResponse, PutContentsRequest, PutContentsResponse,
};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const UNKNOWN_ERROR: &str = "Unknown error";

/// Characters left unescaped in a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Encode a `/`-separated repository path segment by segment.
fn encode_path(path: &str) -> String {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(encode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    base_url: String,
    user_agent: String,
}

impl Debug for GitHubClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl GitHubClient {
    /// Create a client for the API rooted at `base_url` (e.g. `https://api.github.com`).
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client for GitHub")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_agent: user_agent.into(),
        })
    }

    pub fn from_config(config: &GitHubConfig) -> Result<Self> {
        Self::new(
            config.api_base_url.clone(),
            config.user_agent.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn request(&self, method: Method, url: &str, token: Option<&str>) -> RequestBuilder {
        let request = self
            .http
            .request(method, url)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, GITHUB_ACCEPT);

        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send and decode a JSON response, normalizing every failure to `UpstreamError`.
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> UpstreamResult<T> {
        let response = request.send().await.map_err(UpstreamError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<GitHubErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
            return Err(UpstreamError::rejected(status.as_u16(), message));
        }

        response.json::<T>().await.map_err(UpstreamError::transport)
    }

    /// Create or update a file in a repository.
    #[allow(clippy::too_many_arguments)]
    pub async fn commit_file(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
        path: &str,
        base64_content: &str,
        commit_message: &str,
        branch: &str,
    ) -> UpstreamResult<CommittedFile> {
        let url = self.api_url(&format!(
            "/repos/{}/{}/contents/{}",
            encode_segment(owner),
            encode_segment(repo),
            encode_path(path)
        ));
        let body = PutContentsRequest {
            message: commit_message,
            content: base64_content,
            branch,
        };

        let result = self
            .send_json::<PutContentsResponse>(self.request(Method::PUT, &url, Some(token)).json(&body))
            .await
            .and_then(|response| {
                response
                    .content
                    .and_then(|content| content.download_url)
                    .map(|download_url| CommittedFile { download_url })
                    .ok_or_else(|| {
                        UpstreamError::transport("Response did not include a download URL")
                    })
            });

        match &result {
            Ok(file) => tracing::debug!(
                owner = %owner,
                repo = %repo,
                path = %path,
                branch = %branch,
                download_url = %file.download_url,
                "GitHub file committed"
            ),
            Err(e) => tracing::warn!(
                owner = %owner,
                repo = %repo,
                path = %path,
                status = ?e.status,
                error = %e,
                "GitHub file commit failed"
            ),
        }

        result
    }

    /// Create a gist holding `files` (file name to content).
    pub async fn create_gist(
        &self,
        token: &str,
        description: &str,
        is_public: bool,
        files: &HashMap<String, String>,
    ) -> UpstreamResult<CreatedGist> {
        let url = self.api_url("/gists");
        let body = CreateGistRequest {
            description,
            public: is_public,
            files: files
                .iter()
                .map(|(name, content)| (name.as_str(), GistFileContent { content }))
                .collect(),
        };

        let result = self
            .send_json::<CreateGistResponse>(self.request(Method::POST, &url, Some(token)).json(&body))
            .await
            .map(|response| CreatedGist {
                gist_id: response.id,
            });

        match &result {
            Ok(gist) => tracing::debug!(
                gist_id = %gist.gist_id,
                file_count = files.len(),
                public = is_public,
                "GitHub gist created"
            ),
            Err(e) => tracing::warn!(status = ?e.status, error = %e, "GitHub gist creation failed"),
        }

        result
    }

    /// Open an issue in a repository.
    pub async fn create_issue(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
    ) -> UpstreamResult<CreatedIssue> {
        let url = self.api_url(&format!(
            "/repos/{}/{}/issues",
            encode_segment(owner),
            encode_segment(repo)
        ));
        let request = CreateIssueRequest { title, body };

        let result = self
            .send_json::<CreateIssueResponse>(self.request(Method::POST, &url, Some(token)).json(&request))
            .await
            .map(|response| CreatedIssue {
                issue_number: response.number,
            });

        match &result {
            Ok(issue) => tracing::debug!(
                owner = %owner,
                repo = %repo,
                issue_number = issue.issue_number,
                "GitHub issue created"
            ),
            Err(e) => tracing::warn!(
                owner = %owner,
                repo = %repo,
                status = ?e.status,
                error = %e,
                "GitHub issue creation failed"
            ),
        }

        result
    }

    /// Fetch a gist with its files. Secret gists are readable without a token.
    pub async fn fetch_gist(&self, gist_id: &str, token: Option<&str>) -> UpstreamResult<GistData> {
        let url = self.api_url(&format!("/gists/{}", encode_segment(gist_id)));

        let result = self
            .send_json::<GistData>(self.request(Method::GET, &url, token))
            .await;

        match &result {
            Ok(gist) => tracing::debug!(gist_id = %gist_id, file_count = gist.files.len(), "GitHub gist fetched"),
            Err(e) => tracing::warn!(gist_id = %gist_id, status = ?e.status, error = %e, "GitHub gist fetch failed"),
        }

        result
    }

    /// Download the full text behind a gist file's `raw_url`.
    ///
    /// The gist API cuts file content off at about one megabyte; the raw URL
    /// always serves the complete file.
    pub async fn fetch_raw(&self, raw_url: &str, token: Option<&str>) -> UpstreamResult<String> {
        let response = self
            .request(Method::GET, raw_url, token)
            .send()
            .await
            .map_err(UpstreamError::transport)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(raw_url = %raw_url, status = status.as_u16(), "GitHub raw fetch failed");
            return Err(UpstreamError::rejected(status.as_u16(), UNKNOWN_ERROR));
        }

        response.text().await.map_err(UpstreamError::transport)
    }
}
