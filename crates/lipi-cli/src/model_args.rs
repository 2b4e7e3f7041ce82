use std::path::PathBuf;

use lipi::Tokenizer;

/// Trained model arg group.
#[derive(clap::Args, Debug)]
pub struct ModelArgs {
    /// Model path; the ``*_vocab.json`` and ``*_merges.json`` records are read next to it.
    #[arg(long, short)]
    pub model: PathBuf,
}

impl ModelArgs {
    /// Load the tokenizer.
    pub fn load_tokenizer(&self) -> Result<Tokenizer<u32>, Box<dyn std::error::Error>> {
        log::info!("Loading model: {}", self.model.display());
        Ok(Tokenizer::load_path(&self.model)?)
    }
}
