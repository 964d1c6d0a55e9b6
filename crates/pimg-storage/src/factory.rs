use crate::{CommitStore, GistStore, GitHubClient, ImageStore, StorageStrategy};
use pimg_core::Config;
use std::sync::Arc;

/// Create the image store for the configured strategy
pub fn create_store(config: &Config, client: GitHubClient) -> Arc<dyn ImageStore> {
    match config.storage_strategy() {
        StorageStrategy::Gist => Arc::new(GistStore::new(client, config.github.gist_public)),
        StorageStrategy::Commit => Arc::new(CommitStore::new(
            client,
            config.github.branch.clone(),
            config.github.commit_path.clone(),
        )),
    }
}
