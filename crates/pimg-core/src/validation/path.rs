use super::ValidationError;
use crate::constants::GIST_ROUTE_SEGMENT;
use crate::models::RetrievalLocator;
use percent_encoding::percent_decode_str;

/// Parse `/gist/{gistId}/{filename}` into a locator.
///
/// Empty segments are ignored, so `//gist//abc/x.png/` is accepted. Segments are
/// percent-decoded before they are checked. Every other shape yields the same
/// `InvalidUrlFormat` error.
pub fn validate_retrieval(path: &str) -> Result<RetrievalLocator, ValidationError> {
    let parts: Vec<&str> = path.split('/').filter(|part| !part.is_empty()).collect();

    let [prefix, storage_id, resource_name] = parts.as_slice() else {
        return Err(ValidationError::InvalidUrlFormat);
    };

    if *prefix != GIST_ROUTE_SEGMENT {
        return Err(ValidationError::InvalidUrlFormat);
    }

    let storage_id = decode_segment(storage_id)?;
    let resource_name = decode_segment(resource_name)?;
    let storage_id = storage_id.trim();
    let resource_name = resource_name.trim();
    if storage_id.is_empty() || resource_name.is_empty() {
        return Err(ValidationError::InvalidUrlFormat);
    }

    Ok(RetrievalLocator {
        storage_id: storage_id.to_string(),
        resource_name: resource_name.to_string(),
    })
}

fn decode_segment(segment: &str) -> Result<String, ValidationError> {
    percent_decode_str(segment)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| ValidationError::InvalidUrlFormat)
}
