use std::{fs, path::PathBuf};

use lipi::{
    Tokenizer,
    training::{DEFAULT_PROGRESS_INTERVAL, MergeTrainerOptions},
    vocab::{SeedScript, VocabularyBuilder},
};

use crate::logging::LogArgs;

/// Args for the train command.
#[derive(clap::Args, Debug)]
pub struct TrainArgs {
    /// Input text files.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    #[clap(flatten)]
    logging: LogArgs,

    /// Target vocab size, including the seed tokens.
    #[arg(long)]
    vocab_size: usize,

    /// Seed script; see the ``seeds`` command.
    #[arg(long, default_value = "none")]
    seed: SeedScript,

    /// Extra multi-character seed strings.
    #[arg(long = "extra-seed")]
    extra_seeds: Vec<String>,

    /// Pre-tokenization chunk size, in bytes.
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Merges between progress log lines; 0 disables them.
    #[arg(long, default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    progress_interval: usize,

    /// Pre-tokenize on a single thread.
    #[arg(long)]
    sequential: bool,

    /// Output model path; writes ``{stem}_vocab.json`` and ``{stem}_merges.json``.
    #[arg(long, short)]
    output: PathBuf,
}

impl TrainArgs {
    fn read_corpus(&self) -> Result<String, Box<dyn std::error::Error>> {
        let mut corpus = String::new();

        log::info!("Reading files:");
        for (idx, path) in self.files.iter().enumerate() {
            let text = fs::read_to_string(path)?;
            log::info!("{idx}: {} ({} bytes)", path.display(), text.len());
            if idx > 0 {
                corpus.push('\n');
            }
            corpus.push_str(&text);
        }

        Ok(corpus)
    }

    /// Run the train command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        self.train()?;
        Ok(())
    }

    /// Train and save the model.
    ///
    /// ## Returns
    /// The ``(vocab, merges)`` paths written.
    fn train(&self) -> Result<(PathBuf, PathBuf), Box<dyn std::error::Error>> {
        let base = self
            .extra_seeds
            .iter()
            .fold(
                VocabularyBuilder::new().with_script(self.seed),
                |builder, seed| builder.with_seed_str(seed),
            )
            .build::<u32>()?;
        log::info!("Seed: {} ({} tokens)", self.seed, base.len());

        let corpus = self.read_corpus()?;

        let trainer = MergeTrainerOptions::new(self.vocab_size)
            .with_chunk_size(self.chunk_size)
            .with_progress_interval(self.progress_interval)
            .with_parallel(!self.sequential)
            .init();

        log::info!("Training Tokenizer...");
        let results = trainer.train(&corpus, base)?;
        log::info!(
            "Stopped: {} after {} merge steps",
            results.stop_reason,
            results.merge_steps
        );

        let tokenizer = Tokenizer::from_train_results(results)?;
        log::info!("Vocabulary Size: {}", tokenizer.vocab().len());

        let (vocab_path, merges_path) = tokenizer.save_path(&self.output)?;
        log::info!("output: {}", vocab_path.display());
        log::info!("output: {}", merges_path.display());

        Ok((vocab_path, merges_path))
    }
}
