//! # Vocabulary Training
//!
//! Support for learning byte-pair merges over a seed vocabulary.
//!
//! Training requires:
//! * a seed [`crate::vocab::Vocabulary`], from [`crate::vocab::VocabularyBuilder`];
//! * a corpus, as a single string;
//! * [`MergeTrainerOptions`] - at least the target vocab size.
//!
//! The corpus is pre-tokenized into seed tokens (in parallel chunks by default),
//! then merged one pair at a time. Progress is logged every
//! [`MergeTrainerOptions::progress_interval`] merges, and counted on a shared
//! [`TrainingProgress`] which can be polled from another thread.
//!
//! ## Training Example
//!
//! ```rust,no_run
//! use lipi::{
//!     training::MergeTrainerOptions,
//!     vocab::{SeedScript, VocabularyBuilder},
//! };
//!
//! fn example(corpus: &str) -> lipi::LipiResult<()> {
//!     let base = VocabularyBuilder::new()
//!         .with_script(SeedScript::Telugu)
//!         .build::<u32>()?;
//!
//!     let trainer = MergeTrainerOptions::new(5000)
//!         .with_progress_interval(500)
//!         .init();
//!
//!     let progress = trainer.progress();
//!     let results = trainer.train(corpus, base)?;
//!
//!     println!(
//!         "{} merges; stopped by {} after {} steps",
//!         results.merges.len(),
//!         results.stop_reason,
//!         progress.merges_done()
//!     );
//!     Ok(())
//! }
//! ```

pub mod utility;

mod merge_trainer;
mod progress;

#[doc(inline)]
pub use merge_trainer::{
    DEFAULT_PROGRESS_INTERVAL,
    MergeCandidate,
    MergeTrainer,
    MergeTrainerOptions,
    StopReason,
    TrainResults,
};
#[doc(inline)]
pub use progress::TrainingProgress;
