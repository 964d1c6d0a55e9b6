//! Application state shared by all handlers.

use pimg_core::Config;
use pimg_storage::{GitHubClient, ImageStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Store for the configured strategy; used by uploads only.
    pub store: Arc<dyn ImageStore>,
    /// Client used for anonymous gist reads.
    pub github: GitHubClient,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn ImageStore>, github: GitHubClient) -> Self {
        Self {
            config,
            store,
            github,
        }
    }
}
