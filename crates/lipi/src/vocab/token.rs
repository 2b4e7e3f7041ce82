//! # Vocabulary Token

use crate::types::TokenType;

/// A single vocabulary entry.
///
/// `bytes` is the exact byte payload of the token; `is_base` marks
/// seed tokens, as opposed to tokens produced by a merge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token<T: TokenType> {
    /// The token id.
    pub id: T,

    /// The token's byte payload.
    pub bytes: Vec<u8>,

    /// Was this token part of the seed vocabulary?
    pub is_base: bool,
}

impl<T: TokenType> Token<T> {
    /// Create a seed token.
    pub fn base<B: Into<Vec<u8>>>(
        id: T,
        bytes: B,
    ) -> Self {
        Self {
            id,
            bytes: bytes.into(),
            is_base: true,
        }
    }

    /// Create a merged token.
    pub fn merged<B: Into<Vec<u8>>>(
        id: T,
        bytes: B,
    ) -> Self {
        Self {
            id,
            bytes: bytes.into(),
            is_base: false,
        }
    }

    /// The payload as text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.bytes).ok()
    }
}
