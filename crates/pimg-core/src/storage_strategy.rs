use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// How an uploaded image is persisted on GitHub.
///
/// Selected once at startup; every upload in the process uses the same strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageStrategy {
    /// Secret gist holding a JSON envelope, served back through this gateway.
    Gist,
    /// Raw file committed to a repository, linked from a tracking issue.
    Commit,
}

impl StorageStrategy {
    /// Whether uploads must name the repository owner.
    pub fn requires_owner(&self) -> bool {
        matches!(self, StorageStrategy::Commit)
    }

    pub fn requires_repository(&self) -> bool {
        matches!(self, StorageStrategy::Commit)
    }
}

impl FromStr for StorageStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gist" => Ok(StorageStrategy::Gist),
            "commit" | "repo" | "repository" => Ok(StorageStrategy::Commit),
            _ => Err(anyhow::anyhow!("Invalid storage strategy: {}", s)),
        }
    }
}

impl Display for StorageStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageStrategy::Gist => write!(f, "gist"),
            StorageStrategy::Commit => write!(f, "commit"),
        }
    }
}
