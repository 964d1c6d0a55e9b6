//! Domain models

pub mod image_record;
pub mod locator;
pub mod upload;

pub use image_record::StoredImageRecord;
pub use locator::RetrievalLocator;
pub use upload::{Credentials, UploadRequest};
