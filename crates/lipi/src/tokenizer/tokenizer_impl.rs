use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::Serialize;

use crate::{
    decoders::TokenDecoder,
    encoders::TokenEncoder,
    errors::LipiResult,
    tokenizer::TokenizerOptions,
    training::{MergeTrainerOptions, TrainResults},
    types::TokenType,
    vocab::{MergeTable, Vocabulary, io::load_state_path, io::save_state_path},
};

/// Size summary of a [`Tokenizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenizerStats {
    /// The total number of tokens.
    pub vocab_size: usize,

    /// The number of seed tokens.
    pub base_vocab_size: usize,

    /// The number of merge rules.
    pub merge_count: usize,
}

/// The result of [`Tokenizer::check_round_trip`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundTripReport<T: TokenType> {
    /// The encoded tokens.
    pub tokens: Vec<T>,

    /// The decoded text.
    pub decoded: String,

    /// Does `decoded` equal the input text?
    pub matches: bool,
}

/// Unified Tokenizer.
///
/// Combines:
///  * a [`Vocabulary`] and [`MergeTable`],
///  * a [`TokenEncoder`], and
///  * a [`TokenDecoder`].
///
/// Immutable once built; clones share state.
#[derive(Clone)]
pub struct Tokenizer<T: TokenType = u32> {
    vocab: Arc<Vocabulary<T>>,
    merges: Arc<MergeTable<T>>,
    encoder: Arc<dyn TokenEncoder<T>>,
    decoder: Arc<dyn TokenDecoder<T>>,
}

impl<T: TokenType> Tokenizer<T> {
    /// Create a new tokenizer from parts.
    ///
    /// See [`TokenizerOptions::build`] for the validated path.
    pub fn new(
        vocab: Arc<Vocabulary<T>>,
        merges: Arc<MergeTable<T>>,
        encoder: Arc<dyn TokenEncoder<T>>,
        decoder: Arc<dyn TokenDecoder<T>>,
    ) -> Self {
        Self {
            vocab,
            merges,
            encoder,
            decoder,
        }
    }

    /// Build a tokenizer from a vocabulary and merge table.
    ///
    /// ## Returns
    /// A `Result` containing the `Tokenizer`, or `VocabConflict` when
    /// the merges are not grounded in the vocabulary.
    pub fn from_parts(
        vocab: Vocabulary<T>,
        merges: MergeTable<T>,
    ) -> LipiResult<Self> {
        TokenizerOptions::default().build(Arc::new(vocab), Arc::new(merges))
    }

    /// Build a tokenizer from a training run.
    pub fn from_train_results(results: TrainResults<T>) -> LipiResult<Self> {
        Self::from_parts(results.vocab, results.merges)
    }

    /// Train a tokenizer over a corpus.
    ///
    /// ## Arguments
    /// * `corpus` - the training text.
    /// * `base` - the seed vocabulary.
    /// * `options` - the trainer options.
    pub fn train(
        corpus: &str,
        base: Vocabulary<T>,
        options: MergeTrainerOptions,
    ) -> LipiResult<Self> {
        Self::from_train_results(options.init().train(corpus, base)?)
    }

    /// Load a tokenizer saved with [`Tokenizer::save_path`].
    ///
    /// See [`crate::vocab::io::record_paths`].
    pub fn load_path<P: AsRef<Path>>(path: P) -> LipiResult<Self> {
        let (vocab, merges) = load_state_path(path)?;
        Self::from_parts(vocab, merges)
    }

    /// Save the vocabulary and merge records next to `path`.
    ///
    /// ## Returns
    /// The ``(vocab, merges)`` paths written.
    pub fn save_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> LipiResult<(PathBuf, PathBuf)> {
        save_state_path(&self.vocab, &self.merges, path)
    }

    /// Get the underlying vocabulary.
    pub fn vocab(&self) -> &Arc<Vocabulary<T>> {
        &self.vocab
    }

    /// Get the underlying merge table.
    pub fn merges(&self) -> &Arc<MergeTable<T>> {
        &self.merges
    }

    /// Get the underlying encoder.
    pub fn encoder(&self) -> &Arc<dyn TokenEncoder<T>> {
        &self.encoder
    }

    /// Get the underlying decoder.
    pub fn decoder(&self) -> &Arc<dyn TokenDecoder<T>> {
        &self.decoder
    }

    /// Size summary.
    pub fn stats(&self) -> TokenizerStats {
        TokenizerStats {
            vocab_size: self.vocab.len(),
            base_vocab_size: self.vocab.base_vocab_size(),
            merge_count: self.merges.len(),
        }
    }

    /// Encode then decode `text`.
    pub fn check_round_trip(
        &self,
        text: &str,
    ) -> LipiResult<RoundTripReport<T>> {
        let tokens = self.try_encode(text)?;
        let decoded = self.try_decode_to_string(&tokens)?;
        let matches = decoded == text;

        if !matches {
            log::warn!("round trip mismatch for {} bytes of input", text.len());
        }

        Ok(RoundTripReport {
            tokens,
            decoded,
            matches,
        })
    }
}

impl<T: TokenType> TokenEncoder<T> for Tokenizer<T> {
    fn try_encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<T>,
    ) -> LipiResult<()> {
        self.encoder.try_encode_append(text, tokens)
    }

    fn try_encode(
        &self,
        text: &str,
    ) -> LipiResult<Vec<T>> {
        self.encoder.try_encode(text)
    }

    fn try_encode_batch(
        &self,
        batch: &[&str],
    ) -> LipiResult<Vec<Vec<T>>> {
        self.encoder.try_encode_batch(batch)
    }
}

impl<T: TokenType> TokenDecoder<T> for Tokenizer<T> {
    fn try_decode_append_bytes(
        &self,
        tokens: &[T],
        buf: &mut Vec<u8>,
    ) -> LipiResult<()> {
        self.decoder.try_decode_append_bytes(tokens, buf)
    }

    fn try_decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> LipiResult<Vec<u8>> {
        self.decoder.try_decode_to_bytes(tokens)
    }

    fn try_decode_to_string(
        &self,
        tokens: &[T],
    ) -> LipiResult<String> {
        self.decoder.try_decode_to_string(tokens)
    }

    fn try_decode_batch_to_bytes(
        &self,
        batch: &[&[T]],
    ) -> LipiResult<Vec<Vec<u8>>> {
        self.decoder.try_decode_batch_to_bytes(batch)
    }

    fn try_decode_batch_to_strings(
        &self,
        batch: &[&[T]],
    ) -> LipiResult<Vec<String>> {
        self.decoder.try_decode_batch_to_strings(batch)
    }
}
