//! # Error Types

/// Errors from lipi operations.
#[derive(Debug, thiserror::Error)]
pub enum LipiError {
    /// A token id has no entry in the vocabulary.
    #[error("invalid token id: {id}")]
    InvalidTokenId {
        /// The unknown token id.
        id: u64,
    },

    /// Decoded bytes are not valid UTF-8.
    #[error("decoded bytes are not valid utf-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 {
        /// The length of the valid UTF-8 prefix.
        valid_up_to: usize,
    },

    /// Persisted vocabulary or merge records failed integrity checks.
    #[error("malformed persisted state: {0}")]
    MalformedPersistedState(String),

    /// The target vocab size is below the base vocabulary size.
    #[error("vocab size ({size}) must be >= base vocab size ({base})")]
    VocabSizeTooSmall {
        /// The requested vocab size.
        size: usize,

        /// The size of the base vocabulary.
        base: usize,
    },

    /// Vocab size exceeds the capacity of the target token type.
    #[error("vocab size ({size}) exceeds token type capacity")]
    VocabSizeOverflow {
        /// The vocab size that exceeded the capacity.
        size: usize,
    },

    /// Vocabulary data is inconsistent.
    #[error("{0}")]
    VocabConflict(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for lipi operations.
pub type LipiResult<T> = core::result::Result<T, LipiError>;
