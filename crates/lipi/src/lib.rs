//! # `lipi` Byte-Level BPE Tokenizer
//!
//! `lipi` builds script-seeded byte vocabularies, learns byte-pair merge rules
//! from a corpus, and reversibly converts text to and from token ids.
//!
//! See:
//! * [`vocab`] for the [`Vocabulary`], [`MergeTable`], the seed
//!   [`VocabularyBuilder`], and the JSON persistence records.
//! * [`training`] to learn merges with a [`MergeTrainer`].
//! * [`pretokenize`] for the greedy longest-match seed pass.
//! * [`encoders`] to encode text into tokens.
//! * [`decoders`] to decode tokens into text.
//! * [`Tokenizer`] for the combined, immutable engine.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//! * ``rayon``
//!
//! #### feature: ``ahash`` / ``foldhash``
//!
//! This swaps all HashMap/HashSet implementations for ``ahash`` (or ``foldhash``).
//!
//! This is done by the ``types::CommonHash{*}`` type alias machinery.
//!
//! #### feature: ``rayon``
//!
//! Enables chunk-parallel pre-tokenization of training corpora,
//! and the batch wrappers in [`rayon`].
//!
//! #### feature: ``tracing``
//!
//! This enables a number of ``tracing`` instrumentation points.
//! This is only useful for timing tracing of the library itself.
//!
//! ## Training and Round-Tripping
//!
//! ```rust,no_run
//! use lipi::{
//!     MergeTrainerOptions,
//!     TokenDecoder,
//!     TokenEncoder,
//!     Tokenizer,
//!     vocab::{SeedScript, VocabularyBuilder},
//! };
//!
//! fn example(corpus: &str) -> lipi::LipiResult<()> {
//!     let base = VocabularyBuilder::new()
//!         .with_script(SeedScript::Telugu)
//!         .build::<u32>()?;
//!
//!     let tokenizer = Tokenizer::train(corpus, base, MergeTrainerOptions::new(5000))?;
//!
//!     let text = "తెలుగు భాష";
//!     let tokens = tokenizer.try_encode(text)?;
//!     assert_eq!(tokenizer.try_decode_to_string(&tokens)?, text);
//!
//!     tokenizer.save_path("telugu_tokenizer")?;
//!     Ok(())
//! }
//! ```
#![warn(missing_docs, unused)]

pub mod compat;
pub mod decoders;
pub mod encoders;
pub mod errors;
pub mod pretokenize;
#[cfg(feature = "rayon")]
pub mod rayon;
pub mod tokenizer;
pub mod training;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use decoders::{DictionaryDecoder, TokenDecoder};
#[doc(inline)]
pub use encoders::{MergeRankEncoder, TokenEncoder};
#[doc(inline)]
pub use errors::{LipiError, LipiResult};
#[doc(inline)]
pub use tokenizer::{RoundTripReport, Tokenizer, TokenizerOptions, TokenizerStats};
#[doc(inline)]
pub use training::{MergeTrainer, MergeTrainerOptions, TrainingProgress};
#[doc(inline)]
pub use types::{Pair, TokenType};
#[doc(inline)]
pub use vocab::{MergeRule, MergeTable, Token, Vocabulary, VocabularyBuilder};
