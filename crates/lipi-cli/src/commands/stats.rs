use lipi::TokenizerStats;

use crate::{logging::LogArgs, model_args::ModelArgs};

/// Args for the stats command.
#[derive(clap::Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    model: ModelArgs,

    #[clap(flatten)]
    logging: LogArgs,
}

impl StatsArgs {
    /// Run the stats command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        println!("{}", serde_json::to_string_pretty(&self.stats()?)?);
        Ok(())
    }

    fn stats(&self) -> Result<TokenizerStats, Box<dyn std::error::Error>> {
        Ok(self.model.load_tokenizer()?.stats())
    }
}
