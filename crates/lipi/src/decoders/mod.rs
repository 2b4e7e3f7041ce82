//! # Token Decoders
//!
//! Decoder clients should use:
//!
//! * `DictionaryDecoder` - a dense slab-index `TokenDecoder`.
//! * `ParallelRayonDecoder` - a batch parallelism wrapper around any `TokenDecoder`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use lipi::{DictionaryDecoder, TokenDecoder, TokenType, Vocabulary};
//!
//! fn example<T: TokenType>(
//!     vocab: &Vocabulary<T>,
//!     batch: &[&[T]],
//! ) -> lipi::LipiResult<Vec<String>> {
//!     let decoder: DictionaryDecoder<T> = DictionaryDecoder::from_vocab(vocab);
//!
//!     #[cfg(feature = "rayon")]
//!     let decoder = lipi::rayon::ParallelRayonDecoder::new(decoder);
//!
//!     decoder.try_decode_batch_to_strings(batch)
//! }
//! ```

mod dictionary_decoder;
mod token_decoder;

#[doc(inline)]
pub use dictionary_decoder::DictionaryDecoder;
#[doc(inline)]
pub use token_decoder::{TokenDecoder, try_string_from_utf8};
