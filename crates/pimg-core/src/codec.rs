//! Binary to text codec used to move image bytes through JSON APIs.
//!
//! Standard base64 alphabet with padding and no line wrapping. Decoding is strict:
//! non-alphabet characters and non-canonical padding are rejected.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Raised when stored text is not valid base64.
#[derive(Debug, thiserror::Error)]
#[error("Malformed base64 encoding: {0}")]
pub struct MalformedEncodingError(#[from] base64::DecodeError);

/// Encode raw bytes. Output length is `4 * ceil(len / 3)`.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode text produced by [`encode`].
pub fn decode(text: &str) -> Result<Vec<u8>, MalformedEncodingError> {
    Ok(STANDARD.decode(text)?)
}
