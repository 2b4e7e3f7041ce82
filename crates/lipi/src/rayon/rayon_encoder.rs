//! # Parallel Encoder

use core::marker::PhantomData;

use crate::{encoders::TokenEncoder, errors::LipiResult, types::TokenType};

/// Batch-Level Parallel Encoder Wrapper.
///
/// Enables ``rayon`` encoding of batches when available.
#[derive(Clone)]
pub struct ParallelRayonEncoder<T: TokenType, D: TokenEncoder<T>> {
    /// Inner encoder.
    pub inner: D,

    _marker: PhantomData<T>,
}

impl<T, D> ParallelRayonEncoder<T, D>
where
    T: TokenType,
    D: TokenEncoder<T>,
{
    /// Create a new parallel encoder.
    ///
    /// ## Arguments
    /// * `inner` - The token encoder to wrap.
    ///
    /// ## Returns
    /// A new `ParallelRayonEncoder` instance.
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<T, D> TokenEncoder<T> for ParallelRayonEncoder<T, D>
where
    T: TokenType,
    D: TokenEncoder<T>,
{
    fn try_encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<T>,
    ) -> LipiResult<()> {
        self.inner.try_encode_append(text, tokens)
    }

    fn try_encode(
        &self,
        text: &str,
    ) -> LipiResult<Vec<T>> {
        self.inner.try_encode(text)
    }

    fn try_encode_batch(
        &self,
        batch: &[&str],
    ) -> LipiResult<Vec<Vec<T>>> {
        use rayon::prelude::*;

        batch.par_iter().map(|text| self.try_encode(text)).collect()
    }
}
