use std::fmt::{Display, Formatter, Result as FmtResult};

/// Outcome of every GitHub call.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// A failed GitHub call.
///
/// Rejections carry the HTTP status and GitHub's `message` field. Transport
/// failures (connect errors, timeouts, unreadable bodies) have no status but the
/// same shape, so callers treat both alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamError {
    pub status: Option<u16>,
    pub message: String,
}

impl UpstreamError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn transport(err: impl Display) -> Self {
        Self {
            status: None,
            message: err.to_string(),
        }
    }
}

impl Display for UpstreamError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.status {
            Some(status) => write!(f, "{} - {}", status, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for UpstreamError {}
