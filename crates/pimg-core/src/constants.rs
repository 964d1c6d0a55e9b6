//! Fixed values shared across crates.

/// Path prefix under which gist-backed images are served.
pub const GIST_ROUTE_SEGMENT: &str = "gist";

/// MIME type used when a stored record does not declare one.
pub const DEFAULT_IMAGE_MIME_TYPE: &str = "image/png";

/// Extension used when the uploaded file name carries none.
pub const DEFAULT_EXTENSION: &str = "png";

pub const FILENAME_PREFIX: &str = "obsidian-upload";

pub const IMAGE_MIME_PREFIX: &str = "image/";

pub const HEALTH_CHECK_MESSAGE: &str = "Pimg Gist Worker is Healthy";

// Cache-Control values
pub const CACHE_CONTROL_HEALTH_CHECK: &str = "max-age=31536000";
pub const CACHE_CONTROL_IMAGE: &str = "public, max-age=86400";
pub const CORS_MAX_AGE_SECS: &str = "86400";
