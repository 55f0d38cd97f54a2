//! Opaque query tokens: a [`TestQuery`] serialized to JSON, then base64 encoded
//! (standard alphabet, padded), so that a filter can travel in a URL on GET
//! and DELETE requests.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{AppError, AppResult};
use crate::models::TestQuery;

/// Encode a query into a token.
pub fn encode_query(query: &TestQuery) -> AppResult<String> {
    let json = serde_json::to_vec(query)?;
    Ok(STANDARD.encode(json))
}

/// Decode a token produced by [`encode_query`].
pub fn decode_query(token: &str) -> AppResult<TestQuery> {
    // A '+' that was not percent-encoded arrives as a space after form decoding.
    let token = token.trim().replace(' ', "+");

    let bytes = STANDARD
        .decode(token.as_bytes())
        .map_err(|e| AppError::MalformedToken(format!("invalid base64: {}", e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| AppError::MalformedToken(format!("invalid query document: {}", e)))
}
