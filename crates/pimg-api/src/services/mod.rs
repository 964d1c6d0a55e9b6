pub mod retrieval;
pub mod upload;

pub use retrieval::{RetrievalService, ServedImage};
pub use upload::{UploadLocation, UploadResponse, UploadService};
