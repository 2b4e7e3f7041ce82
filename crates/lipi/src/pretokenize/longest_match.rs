//! # Greedy Longest-Match Seed Pass

use crate::{types::TokenType, vocab::Vocabulary};

/// Pre-tokenize `bytes`, appending the seed tokens to `tokens`.
///
/// At each position, lengths ``max_seed_len..=1`` are tried in turn;
/// the first seed match is taken, and the position advances by its length.
/// A byte with no match is skipped; which cannot happen for a
/// vocabulary holding all of the byte tokens.
///
/// ## Arguments
/// * `vocab` - the vocabulary; only base tokens are matched.
/// * `bytes` - the bytes to convert.
/// * `tokens` - the target token buffer.
pub fn pretokenize_append<T: TokenType>(
    vocab: &Vocabulary<T>,
    bytes: &[u8],
    tokens: &mut Vec<T>,
) {
    let max_len = vocab.max_seed_len();
    tokens.reserve(bytes.len() / max_len.max(1));

    let mut pos = 0;
    while pos < bytes.len() {
        let limit = max_len.min(bytes.len() - pos);

        match (1..=limit)
            .rev()
            .find_map(|len| vocab.lookup_seed(&bytes[pos..pos + len]).map(|t| (t, len)))
        {
            Some((token, len)) => {
                tokens.push(token);
                pos += len;
            }
            None => pos += 1,
        }
    }
}

/// Pre-tokenize `bytes` into a new token buffer.
///
/// See [`pretokenize_append`].
pub fn pretokenize<T: TokenType>(
    vocab: &Vocabulary<T>,
    bytes: &[u8],
) -> Vec<T> {
    let mut tokens = Vec::new();
    pretokenize_append(vocab, bytes, &mut tokens);
    tokens
}
