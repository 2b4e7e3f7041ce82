//! # Token Decoder Trait

use crate::{
    errors::{LipiError, LipiResult},
    types::TokenType,
};

/// Convert decoded bytes to a `String`, failing on invalid UTF-8.
pub fn try_string_from_utf8(bytes: Vec<u8>) -> LipiResult<String> {
    String::from_utf8(bytes).map_err(|err| LipiError::InvalidUtf8 {
        valid_up_to: err.utf8_error().valid_up_to(),
    })
}

/// Trait for token decoders.
pub trait TokenDecoder<T: TokenType>: Send + Sync {
    /// Decodes tokens into bytes, appending to a target buffer.
    ///
    /// On error, `buf` is left as it was.
    ///
    /// ## Arguments
    /// * `tokens` - A slice of tokens to decode.
    /// * `buf` - The target byte buffer to append to.
    fn try_decode_append_bytes(
        &self,
        tokens: &[T],
        buf: &mut Vec<u8>,
    ) -> LipiResult<()>;

    /// Decodes tokens into bytes.
    ///
    /// The bytes are not required to be valid UTF-8.
    ///
    /// ## Arguments
    /// * `tokens` - A slice of tokens to decode.
    ///
    /// ## Returns
    /// A `Result` containing the bytes, or `InvalidTokenId`.
    fn try_decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> LipiResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(tokens.len() * 2);
        self.try_decode_append_bytes(tokens, &mut buf)?;
        Ok(buf)
    }

    /// Decodes tokens into a string.
    ///
    /// ## Arguments
    /// * `tokens` - A slice of tokens to decode.
    ///
    /// ## Returns
    /// A `Result` containing the string, `InvalidTokenId`, or `InvalidUtf8`.
    fn try_decode_to_string(
        &self,
        tokens: &[T],
    ) -> LipiResult<String> {
        try_string_from_utf8(self.try_decode_to_bytes(tokens)?)
    }

    /// Decodes a batch of tokens into bytes.
    ///
    /// ## Arguments
    /// * `batch` - A batch of tokens.
    fn try_decode_batch_to_bytes(
        &self,
        batch: &[&[T]],
    ) -> LipiResult<Vec<Vec<u8>>> {
        batch
            .iter()
            .map(|tokens| self.try_decode_to_bytes(tokens))
            .collect()
    }

    /// Decodes a batch of tokens into strings.
    ///
    /// ## Arguments
    /// * `batch` - A batch of tokens.
    fn try_decode_batch_to_strings(
        &self,
        batch: &[&[T]],
    ) -> LipiResult<Vec<String>> {
        batch
            .iter()
            .map(|tokens| self.try_decode_to_string(tokens))
            .collect()
    }
}
