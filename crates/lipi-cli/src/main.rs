mod commands;
mod input_output;
mod logging;
mod model_args;

use clap::Parser;
use commands::Commands;

/// lipi: train and run byte-level BPE tokenizers.
#[derive(clap::Parser, Debug)]
#[command(name = "lipi", version)]
pub struct Args {
    /// Subcommand to run.
    #[clap(subcommand)]
    pub command: Commands,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    args.command.run()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args() {
        Args::command().debug_assert();
    }
}
