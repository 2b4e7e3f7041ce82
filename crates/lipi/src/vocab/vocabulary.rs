//! # Vocabulary ``{ T -> Token }`` Table

use core::fmt::Debug;

use crate::{
    errors::{LipiError, LipiResult},
    types::{CommonHashSet, TokenType, token_index},
    vocab::{
        token::Token,
        vocab_types::{SpanTokenMap, U8_SIZE},
    },
};

/// Validate a dense token table.
///
/// - ids are dense: ``tokens[i].id == i``;
/// - every payload is non-empty, and no two payloads are equal;
/// - base tokens precede all merged tokens;
/// - ids ``0..=255`` are the base single-byte tokens, ``id == byte``.
///
/// ## Arguments
/// * `tokens` - the token table to validate.
pub fn try_validate_tokens<T: TokenType>(tokens: &[Token<T>]) -> LipiResult<()> {
    if tokens.len() < U8_SIZE {
        return Err(LipiError::VocabConflict(format!(
            "vocabulary has {} tokens; the {U8_SIZE} byte tokens are required",
            tokens.len()
        )));
    }

    let mut seen: CommonHashSet<&[u8]> = Default::default();
    let mut seen_merged = false;

    for (idx, token) in tokens.iter().enumerate() {
        if token_index(token.id) != idx {
            return Err(LipiError::VocabConflict(format!(
                "token at position {idx} has id {}; ids must be dense",
                token.id
            )));
        }
        if token.bytes.is_empty() {
            return Err(LipiError::VocabConflict(format!(
                "token {} has an empty byte payload",
                token.id
            )));
        }
        if !seen.insert(token.bytes.as_slice()) {
            return Err(LipiError::VocabConflict(format!(
                "token {} duplicates the bytes {:?}",
                token.id, token.bytes
            )));
        }

        if token.is_base {
            if seen_merged {
                return Err(LipiError::VocabConflict(format!(
                    "base token {} follows a merged token",
                    token.id
                )));
            }
        } else {
            seen_merged = true;
        }

        if idx < U8_SIZE && (!token.is_base || token.bytes != [idx as u8]) {
            return Err(LipiError::VocabConflict(format!(
                "token {idx} must be the base byte token {idx:#04x}"
            )));
        }
    }

    Ok(())
}

/// Dense token table with a derived ``{ Vec<u8> -> T }`` index.
///
/// Base (seed) tokens occupy ids ``0..base_vocab_size``;
/// merged tokens follow in the order they were learned.
#[derive(Clone, PartialEq)]
pub struct Vocabulary<T: TokenType> {
    tokens: Vec<Token<T>>,

    /// Reverse index over all token payloads.
    span_map: SpanTokenMap<T>,

    base_vocab_size: usize,

    /// The longest base token payload; bounds pre-tokenization matching.
    max_seed_len: usize,
}

impl<T: TokenType> Debug for Vocabulary<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("Vocabulary")
            .field("len", &self.len())
            .field("base_vocab_size", &self.base_vocab_size)
            .field("max_seed_len", &self.max_seed_len)
            .finish()
    }
}

impl<T: TokenType> Vocabulary<T> {
    /// Build a [`Vocabulary`] from a dense token table.
    ///
    /// ## Arguments
    /// * `tokens` - the token table; see [`try_validate_tokens`].
    ///
    /// ## Returns
    /// A `Result` containing the new `Vocabulary`, or a `VocabConflict`.
    pub fn from_tokens(tokens: Vec<Token<T>>) -> LipiResult<Self> {
        try_validate_tokens(&tokens)?;

        let span_map: SpanTokenMap<T> = tokens.iter().map(|t| (t.bytes.clone(), t.id)).collect();

        let base_vocab_size = tokens.iter().filter(|t| t.is_base).count();
        let max_seed_len = tokens
            .iter()
            .filter(|t| t.is_base)
            .map(|t| t.bytes.len())
            .max()
            .unwrap_or(1);

        Ok(Self {
            tokens,
            span_map,
            base_vocab_size,
            max_seed_len,
        })
    }

    /// The number of tokens in the vocabulary.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Is the vocabulary empty?
    ///
    /// A validated vocabulary always holds the byte tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The number of base (seed) tokens.
    pub fn base_vocab_size(&self) -> usize {
        self.base_vocab_size
    }

    /// The longest base token payload, in bytes.
    pub fn max_seed_len(&self) -> usize {
        self.max_seed_len
    }

    /// The token table, ordered by id.
    pub fn tokens(&self) -> &[Token<T>] {
        &self.tokens
    }

    /// The base (seed) tokens.
    pub fn base_tokens(&self) -> &[Token<T>] {
        &self.tokens[..self.base_vocab_size]
    }

    /// The merged tokens, in learned order.
    pub fn merged_tokens(&self) -> &[Token<T>] {
        &self.tokens[self.base_vocab_size..]
    }

    /// The reverse ``{ Vec<u8> -> T }`` index.
    pub fn span_map(&self) -> &SpanTokenMap<T> {
        &self.span_map
    }

    /// The highest token id.
    pub fn max_token(&self) -> Option<T> {
        self.tokens.last().map(|t| t.id)
    }

    /// Get a token by id.
    pub fn get(
        &self,
        token: T,
    ) -> Option<&Token<T>> {
        self.tokens.get(token_index(token))
    }

    /// Get a token's byte payload.
    pub fn get_bytes(
        &self,
        token: T,
    ) -> Option<&[u8]> {
        self.get(token).map(|t| t.bytes.as_slice())
    }

    /// Does the vocabulary contain this id?
    pub fn contains(
        &self,
        token: T,
    ) -> bool {
        token_index(token) < self.tokens.len()
    }

    /// Is this id a base (seed) token?
    pub fn is_base(
        &self,
        token: T,
    ) -> bool {
        token_index(token) < self.base_vocab_size
    }

    /// Look up the token with exactly this payload.
    pub fn lookup_span(
        &self,
        span: &[u8],
    ) -> Option<T> {
        self.span_map.get(span).copied()
    }

    /// Look up the base (seed) token with exactly this payload.
    #[inline]
    pub fn lookup_seed(
        &self,
        span: &[u8],
    ) -> Option<T> {
        self.lookup_span(span).filter(|&t| self.is_base(t))
    }

    /// Append a new merged token.
    ///
    /// The caller is responsible for checking that `bytes` is not already present.
    pub(crate) fn push_merged(
        &mut self,
        bytes: Vec<u8>,
    ) -> LipiResult<T> {
        debug_assert!(!self.span_map.contains_key(&bytes));

        let size = self.tokens.len();
        let id = T::from_usize(size).ok_or(LipiError::VocabSizeOverflow { size: size + 1 })?;

        self.span_map.insert(bytes.clone(), id);
        self.tokens.push(Token::merged(id, bytes));

        Ok(id)
    }
}
