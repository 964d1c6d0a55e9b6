//! Pimg Core Library
//!
//! This crate provides the codec, domain models, request validation, error types
//! and configuration shared by the storage and API crates.

pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_strategy;
pub mod validation;

// Re-export commonly used types
pub use codec::MalformedEncodingError;
pub use config::{BaseConfig, Config, GitHubConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{Credentials, RetrievalLocator, StoredImageRecord, UploadRequest};
pub use storage_strategy::StorageStrategy;
pub use validation::ValidationError;
