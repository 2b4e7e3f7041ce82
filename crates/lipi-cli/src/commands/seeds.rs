use lipi::{
    LipiResult,
    vocab::{SeedScript, VocabularyBuilder},
};
use strum::IntoEnumIterator;

/// Args for the seeds listing command.
#[derive(clap::Args, Debug)]
pub struct SeedsArgs {}

/// The base vocabulary size seeded by `script`.
fn base_size(script: SeedScript) -> LipiResult<usize> {
    Ok(VocabularyBuilder::new()
        .with_script(script)
        .build::<u32>()?
        .base_vocab_size())
}

impl SeedsArgs {
    /// Run the seeds listing command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        for script in SeedScript::iter() {
            let size = base_size(script)?;
            println!("{:<8} {size:>5}  {}", script.to_string(), script.description());
        }
        Ok(())
    }
}
