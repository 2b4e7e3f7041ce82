//! # Vocabulary
//!
//! This module provides the vocabulary, merge table, seed builder, and io mechanisms.
//!
//! ## Seed Vocabulary
//!
//! Every byte ``0..=255`` is a base token, with ``id == byte``; so any byte string
//! is representable. Script seeds add whole characters (and any extra ligatures)
//! on top of the byte tokens. This is provided by:
//! * [`VocabularyBuilder`].
//!
//! ## Trained State
//!
//! * [`Vocabulary`] - the dense ``{ T -> Token }`` table and its ``{ Vec<u8> -> T }`` index.
//! * [`MergeTable`] - the ordered ``(T, T) -> T`` merge rules.
//!
//! ## Persistence
//!
//! * [`io`] - the ``*_vocab.json`` / ``*_merges.json`` record pair.
pub mod io;

pub mod merge_table;
pub mod seed;
pub mod size_hints;
pub mod text;
pub mod token;
pub mod validators;
pub mod vocab_types;
pub mod vocabulary;

#[doc(inline)]
pub use merge_table::{MergeRule, MergeTable, try_validate_merge_table};
#[doc(inline)]
pub use seed::{SeedScript, VocabularyBuilder};
#[doc(inline)]
pub use token::Token;
#[doc(inline)]
pub use vocab_types::{PairTokenMap, SpanTokenMap};
#[doc(inline)]
pub use vocabulary::Vocabulary;
