mod check;
mod decode;
mod encode;
mod seeds;
mod stats;
mod train;

/// Subcommands for lipi.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Train a new model.
    Train(train::TrainArgs),

    /// Encode text lines into token ids.
    Encode(encode::EncodeArgs),

    /// Decode token id lines into text.
    Decode(decode::DecodeArgs),

    /// Print model size stats.
    Stats(stats::StatsArgs),

    /// Encode and decode a text; report whether it round-trips.
    Check(check::CheckArgs),

    /// List the seed scripts.
    #[clap(visible_alias = "ls-seeds")]
    Seeds(seeds::SeedsArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Train(cmd) => cmd.run(),
            Commands::Encode(cmd) => cmd.run(),
            Commands::Decode(cmd) => cmd.run(),
            Commands::Stats(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Seeds(cmd) => cmd.run(),
        }
    }
}
