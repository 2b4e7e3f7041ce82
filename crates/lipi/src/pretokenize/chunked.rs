//! # Chunk-Parallel Pre-Tokenization

use core::{num::NonZeroUsize, ops::Range};

use crate::{
    compat::threads::resolve_max_pool,
    pretokenize::pretokenize,
    types::TokenType,
    vocab::Vocabulary,
};

/// The smallest chunk size picked by [`default_chunk_size`].
pub const MIN_CHUNK_SIZE: usize = 64 * 1024;

/// Pick a chunk size for a corpus.
///
/// Aims for a few chunks per pool thread, and at least [`MIN_CHUNK_SIZE`].
///
/// ## Arguments
/// * `corpus_len` - the corpus size, in bytes.
/// * `max_pool` - an optional cap on the pool size.
pub fn default_chunk_size(
    corpus_len: usize,
    max_pool: Option<NonZeroUsize>,
) -> usize {
    let pool = resolve_max_pool(max_pool).max(1);
    corpus_len.div_ceil(pool * 4).max(MIN_CHUNK_SIZE)
}

/// Split `text` into contiguous byte ranges of about `chunk_size` bytes.
///
/// Each boundary is snapped forward to the next character boundary,
/// so no range splits a UTF-8 sequence.
///
/// ## Arguments
/// * `text` - the text to split.
/// * `chunk_size` - the target chunk size; ``0`` is treated as ``1``.
pub fn chunk_boundaries(
    text: &str,
    chunk_size: usize,
) -> Vec<Range<usize>> {
    let chunk_size = chunk_size.max(1);

    let mut ranges = Vec::with_capacity(text.len().div_ceil(chunk_size));
    let mut start = 0;
    while start < text.len() {
        let mut end = (start + chunk_size).min(text.len());
        while !text.is_char_boundary(end) {
            end += 1;
        }
        ranges.push(start..end);
        start = end;
    }
    ranges
}

/// Pre-tokenize `text` in independent chunks.
///
/// When the ``rayon`` feature is enabled, chunks are processed on the
/// ``rayon`` pool. Results are concatenated in chunk order.
///
/// With single-character seeds this is identical to [`pretokenize`];
/// a multi-character seed spanning a chunk boundary is matched
/// as its parts instead.
///
/// ## Arguments
/// * `vocab` - the vocabulary; only base tokens are matched.
/// * `text` - the text to convert.
/// * `chunk_size` - the target chunk size, see [`chunk_boundaries`].
#[cfg_attr(feature = "tracing", tracing::instrument(skip(vocab, text)))]
pub fn pretokenize_chunked<T: TokenType>(
    vocab: &Vocabulary<T>,
    text: &str,
    chunk_size: usize,
) -> Vec<T> {
    let bytes = text.as_bytes();
    let ranges = chunk_boundaries(text, chunk_size);

    log::debug!(
        "pre-tokenizing {} bytes in {} chunks",
        bytes.len(),
        ranges.len()
    );

    let encode_chunk = |range: Range<usize>| pretokenize(vocab, &bytes[range]);

    #[cfg(feature = "rayon")]
    let chunks: Vec<Vec<T>> = {
        use rayon::prelude::*;
        ranges.into_par_iter().map(encode_chunk).collect()
    };
    #[cfg(not(feature = "rayon"))]
    let chunks: Vec<Vec<T>> = ranges.into_iter().map(encode_chunk).collect();

    chunks.concat()
}
