//! # Pre-Tokenization
//!
//! Converts raw bytes into the finest-grained seed tokens,
//! by greedy longest match against the base vocabulary.
//!
//! The same pass feeds both training and encoding; merged tokens
//! are never matched here, only produced by merge rules.
//!
//! * [`pretokenize`] / [`pretokenize_append`] - the sequential pass.
//! * [`pretokenize_chunked`] - the chunk-parallel pass used in training.

mod chunked;
mod longest_match;

#[doc(inline)]
pub use chunked::{MIN_CHUNK_SIZE, chunk_boundaries, default_chunk_size, pretokenize_chunked};
#[doc(inline)]
pub use longest_match::{pretokenize, pretokenize_append};
