//! Validators for training configuration options.
use crate::{errors::LipiError, types::TokenType};

/// Validates and returns the target vocabulary size.
///
/// The size must be at least `base_size`, and every id below it
/// must be representable in `T`.
pub fn try_vocab_size<T: TokenType>(
    vocab_size: usize,
    base_size: usize,
) -> crate::errors::LipiResult<usize> {
    if vocab_size < base_size {
        Err(LipiError::VocabSizeTooSmall {
            size: vocab_size,
            base: base_size,
        })
    } else if T::from_usize(vocab_size.saturating_sub(1)).is_none() {
        Err(LipiError::VocabSizeOverflow { size: vocab_size })
    } else {
        Ok(vocab_size)
    }
}
