//! Validated upload payload.

use bytes::Bytes;
use std::fmt::{Debug, Formatter, Result as FmtResult};

/// GitHub credentials supplied by the caller with each upload.
#[derive(Clone)]
pub struct Credentials {
    pub access_token: String,
    /// Repository owner; only required by strategies that commit to a repository.
    pub owner: Option<String>,
    pub repository: Option<String>,
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .field("owner", &self.owner)
            .field("repository", &self.repository)
            .finish()
    }
}

/// An upload that passed validation. Built once per request and never mutated.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub image_bytes: Bytes,
    pub image_mime_type: String,
    pub original_filename: String,
    pub credentials: Credentials,
}
