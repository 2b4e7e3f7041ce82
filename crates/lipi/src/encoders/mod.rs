//! # Token Encoders
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use lipi::{MergeRankEncoder, MergeTable, TokenEncoder, TokenType, Vocabulary};
//!
//! fn example<T: TokenType>(
//!     vocab: Arc<Vocabulary<T>>,
//!     merges: Arc<MergeTable<T>>,
//!     batch: &[&str],
//! ) -> lipi::LipiResult<Vec<Vec<T>>> {
//!     let encoder = MergeRankEncoder::new(vocab, merges);
//!
//!     #[cfg(feature = "rayon")]
//!     let encoder = lipi::rayon::ParallelRayonEncoder::new(encoder);
//!
//!     encoder.try_encode_batch(batch)
//! }
//! ```

mod merge_rank_encoder;
mod token_encoder;

#[doc(inline)]
pub use merge_rank_encoder::MergeRankEncoder;
#[doc(inline)]
pub use token_encoder::TokenEncoder;
