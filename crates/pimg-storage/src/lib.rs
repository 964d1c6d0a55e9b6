//! Pimg Storage Library
//!
//! GitHub-backed image storage. The [`github`] module is a thin typed client for the
//! REST endpoints we use; [`ImageStore`] implementations sequence those calls into
//! one storage strategy each:
//!
//! - [`GistStore`]: one secret gist per image, content is a JSON envelope.
//! - [`CommitStore`]: commit the file to a repository, then open an issue that
//!   embeds it. No rollback if the second step fails.

pub mod commit;
pub mod factory;
pub mod gist;
pub mod github;
pub mod traits;

// Re-export commonly used types
pub use commit::CommitStore;
pub use factory::create_store;
pub use gist::GistStore;
pub use github::{GistData, GistFile, GitHubClient, UpstreamError, UpstreamResult};
pub use pimg_core::StorageStrategy;
pub use traits::{ImageStore, StorageError, StorageResult, StoredImage};
