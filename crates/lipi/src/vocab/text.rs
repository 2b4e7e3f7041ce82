//! # Debug Text Rendering
//!
//! Best-effort human-readable renderings of token payloads,
//! used by the persisted records and logging.

use crate::types::{TokenType, token_u64};

/// Render bytes as text; or the lossless ``[Bytes: [..]]`` marker.
///
/// ## Arguments
/// * `bytes` - the token payload.
pub fn best_effort_text(bytes: &[u8]) -> String {
    match core::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes_marker(bytes),
    }
}

/// The lossless ``[Bytes: [b0, b1, ..]]`` marker for a payload.
pub fn bytes_marker(bytes: &[u8]) -> String {
    format!("[Bytes: {bytes:?}]")
}

/// The ``Token_{id}`` placeholder for a token without a text rendering.
pub fn token_placeholder<T: TokenType>(token: T) -> String {
    format!("Token_{}", token_u64(token))
}
