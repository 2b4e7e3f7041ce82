use std::sync::Arc;

use crate::{
    decoders::{DictionaryDecoder, TokenDecoder},
    encoders::{MergeRankEncoder, TokenEncoder},
    errors::LipiResult,
    tokenizer::Tokenizer,
    types::TokenType,
    vocab::{MergeTable, Vocabulary, try_validate_merge_table},
};

/// Options for configuring a [`Tokenizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Use the batch-parallel encoder and decoder wrappers.
    pub parallel: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl TokenizerOptions {
    /// Gets the configured parallelism value.
    ///
    /// Parallelism is only available with the ``rayon`` feature.
    pub fn parallel(&self) -> bool {
        self.parallel && cfg!(feature = "rayon")
    }

    /// Sets the configured parallelism value.
    pub fn set_parallel(
        &mut self,
        parallel: bool,
    ) {
        self.parallel = parallel;
    }

    /// Sets the configured parallelism value.
    pub fn with_parallel(
        mut self,
        parallel: bool,
    ) -> Self {
        self.set_parallel(parallel);
        self
    }

    /// Build a [`Tokenizer`] for a validated vocabulary and merge table.
    ///
    /// ## Arguments
    /// * `vocab` - The vocabulary.
    /// * `merges` - The merge table; one rule per merged token.
    ///
    /// ## Returns
    /// A `Result` containing the `Tokenizer`, or `VocabConflict`.
    pub fn build<T: TokenType>(
        &self,
        vocab: Arc<Vocabulary<T>>,
        merges: Arc<MergeTable<T>>,
    ) -> LipiResult<Tokenizer<T>> {
        try_validate_merge_table(&vocab, &merges)?;

        let encoder = MergeRankEncoder::new(vocab.clone(), merges.clone());
        let decoder = DictionaryDecoder::from_vocab(&vocab);

        let (encoder, decoder): (Arc<dyn TokenEncoder<T>>, Arc<dyn TokenDecoder<T>>) =
            if self.parallel() {
                self.parallel_pair(encoder, decoder)
            } else {
                (Arc::new(encoder), Arc::new(decoder))
            };

        Ok(Tokenizer::new(vocab, merges, encoder, decoder))
    }

    #[cfg(feature = "rayon")]
    #[allow(clippy::type_complexity)]
    fn parallel_pair<T: TokenType>(
        &self,
        encoder: MergeRankEncoder<T>,
        decoder: DictionaryDecoder<T>,
    ) -> (Arc<dyn TokenEncoder<T>>, Arc<dyn TokenDecoder<T>>) {
        use crate::rayon::{ParallelRayonDecoder, ParallelRayonEncoder};

        (
            Arc::new(ParallelRayonEncoder::new(encoder)),
            Arc::new(ParallelRayonDecoder::new(decoder)),
        )
    }

    #[cfg(not(feature = "rayon"))]
    #[allow(clippy::type_complexity)]
    fn parallel_pair<T: TokenType>(
        &self,
        encoder: MergeRankEncoder<T>,
        decoder: DictionaryDecoder<T>,
    ) -> (Arc<dyn TokenEncoder<T>>, Arc<dyn TokenDecoder<T>>) {
        (Arc::new(encoder), Arc::new(decoder))
    }
}
