//! # Seed Vocabulary Builder
//!
//! The seed (base) vocabulary always begins with the 256 single-byte tokens,
//! ``id == byte``. Script seeds and extra ligatures follow, in registration order.

use core::ops::RangeInclusive;

use crate::{
    errors::{LipiError, LipiResult},
    types::{CommonHashSet, TokenType},
    vocab::{token::Token, vocab_types::U8_SIZE, vocabulary::Vocabulary},
};

/// Unicode script blocks which can seed a vocabulary.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::EnumIter,
    strum::Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[non_exhaustive]
pub enum SeedScript {
    /// Byte tokens only.
    #[default]
    #[strum(to_string = "none", serialize = "bytes")]
    Bytes,

    /// The Telugu block, ``U+0C00..=U+0C7F``.
    Telugu,
}

impl SeedScript {
    /// The code points seeded by this script.
    pub fn code_points(&self) -> Option<RangeInclusive<u32>> {
        match self {
            Self::Bytes => None,
            Self::Telugu => Some(0x0C00..=0x0C7F),
        }
    }

    /// A one-line description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Bytes => "the 256 byte tokens only",
            Self::Telugu => "byte tokens, and every code point of the Telugu block",
        }
    }

    /// The seed strings for this script, in code point order.
    pub fn seeds(&self) -> impl Iterator<Item = String> {
        self.code_points()
            .into_iter()
            .flatten()
            .filter_map(char::from_u32)
            .map(String::from)
    }
}

/// Builder for the seed [`Vocabulary`].
///
/// ## Example
/// ```rust
/// use lipi::vocab::{SeedScript, Vocabulary, VocabularyBuilder};
///
/// let vocab: Vocabulary<u32> = VocabularyBuilder::new()
///     .with_script(SeedScript::Telugu)
///     .build()
///     .unwrap();
///
/// assert_eq!(vocab.base_vocab_size(), 384);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VocabularyBuilder {
    /// Script blocks to seed.
    pub scripts: Vec<SeedScript>,

    /// Extra seed byte sequences.
    pub extra_seeds: Vec<Vec<u8>>,
}

impl VocabularyBuilder {
    /// Create a builder which seeds only the byte tokens.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a script block.
    pub fn with_script(
        mut self,
        script: SeedScript,
    ) -> Self {
        self.scripts.push(script);
        self
    }

    /// Add an extra seed string (a ligature, or any whole character sequence).
    pub fn with_seed_str<S: AsRef<str>>(
        self,
        seed: S,
    ) -> Self {
        self.with_seed_bytes(seed.as_ref().as_bytes())
    }

    /// Add an extra seed byte sequence.
    pub fn with_seed_bytes<B: Into<Vec<u8>>>(
        mut self,
        seed: B,
    ) -> Self {
        self.extra_seeds.push(seed.into());
        self
    }

    /// All seed candidates beyond the byte tokens, in registration order.
    fn candidates(&self) -> impl Iterator<Item = Vec<u8>> + '_ {
        self.scripts
            .iter()
            .flat_map(|s| s.seeds().map(String::into_bytes))
            .chain(self.extra_seeds.iter().cloned())
    }

    /// Build the seed vocabulary.
    ///
    /// Empty candidates, and candidates duplicating an existing token, are skipped.
    ///
    /// ## Returns
    /// A `Result` containing the seed `Vocabulary`, or `VocabSizeOverflow`
    /// if the seeds do not fit in `T`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn build<T: TokenType>(&self) -> LipiResult<Vocabulary<T>> {
        let mut tokens: Vec<Token<T>> = Vec::with_capacity(U8_SIZE);
        let mut seen: CommonHashSet<Vec<u8>> = Default::default();

        let byte_seeds = (0..=u8::MAX).map(|b| vec![b]);

        for bytes in byte_seeds.chain(self.candidates()) {
            if bytes.is_empty() {
                log::debug!("skipping empty seed");
                continue;
            }
            if seen.contains(&bytes) {
                log::debug!("skipping duplicate seed: {bytes:?}");
                continue;
            }

            let size = tokens.len();
            let id = T::from_usize(size).ok_or(LipiError::VocabSizeOverflow { size: size + 1 })?;

            seen.insert(bytes.clone());
            tokens.push(Token::base(id, bytes));
        }

        log::info!("seed vocabulary: {} base tokens", tokens.len());

        Vocabulary::from_tokens(tokens)
    }
}
