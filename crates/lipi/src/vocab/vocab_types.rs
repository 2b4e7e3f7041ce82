//! # Vocabulary Types

use crate::types::{CommonHashMap, Pair};

/// `{ Pair<T> -> T }` map.
///
/// ## Style Hints
/// Instance names should prefer `pair_map`, or `pair_token_map`.
pub type PairTokenMap<T> = CommonHashMap<Pair<T>, T>;

/// `{ Vec<u8> -> T }` map.
///
/// ## Style Hints
/// Instance names should prefer `span_map`, or `span_token_map`.
pub type SpanTokenMap<T> = CommonHashMap<Vec<u8>, T>;

/// The size of the u8 space.
pub const U8_SIZE: usize = u8::MAX as usize + 1;
