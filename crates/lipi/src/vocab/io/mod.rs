//! # Vocabulary IO
//!
//! A trained state is persisted as two JSON records next to a model path:
//! ``{stem}_vocab.json`` and ``{stem}_merges.json``.
//!
//! ## Saving And Loading A State
//!
//! ```rust,no_run
//! use lipi::vocab::{
//!     MergeTable,
//!     Vocabulary,
//!     io::{load_state_path, save_state_path},
//! };
//!
//! fn example(
//!     vocab: &Vocabulary<u32>,
//!     merges: &MergeTable<u32>,
//! ) -> lipi::LipiResult<()> {
//!     save_state_path(vocab, merges, "telugu_tokenizer")?;
//!
//!     let (loaded_vocab, loaded_merges) = load_state_path::<u32, _>("telugu_tokenizer")?;
//!     assert_eq!(&loaded_vocab, vocab);
//!     assert_eq!(&loaded_merges, merges);
//!     Ok(())
//! }
//! ```

mod json_io;
mod json_records;

#[doc(inline)]
pub use json_io::*;
#[doc(inline)]
pub use json_records::*;
