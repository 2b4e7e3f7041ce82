use lipi::RoundTripReport;

use crate::{logging::LogArgs, model_args::ModelArgs};

/// Args for the check command.
#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    model: ModelArgs,

    /// Text to round-trip.
    text: String,

    #[clap(flatten)]
    logging: LogArgs,
}

impl CheckArgs {
    /// Run the check command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let report = self.round_trip()?;

        println!("{}", serde_json::to_string_pretty(&report)?);

        if !report.matches {
            return Err("round trip mismatch".into());
        }
        Ok(())
    }

    fn round_trip(&self) -> Result<RoundTripReport<u32>, Box<dyn std::error::Error>> {
        let tokenizer = self.model.load_tokenizer()?;
        Ok(tokenizer.check_round_trip(&self.text)?)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use lipi::{MergeTrainerOptions, Tokenizer, VocabularyBuilder};
    use tempdir::TempDir;

    use super::*;
    use crate::{Args, commands::Commands};

    #[test]
    fn test_check_saved_model() {
        TempDir::new("lipi_cli_check")
            .and_then(|dir| {
                let model = dir.path().join("model");
                let tokenizer: Tokenizer<u32> = Tokenizer::train(
                    "aaab aaab aaab",
                    VocabularyBuilder::new().build().unwrap(),
                    MergeTrainerOptions::new(258),
                )
                .unwrap();
                tokenizer.save_path(&model).unwrap();

                let args = Args::try_parse_from([
                    "lipi",
                    "check",
                    "--model",
                    model.to_str().unwrap(),
                    "aaab",
                ])
                .unwrap();
                let Commands::Check(cmd) = args.command else {
                    panic!("expected the check command");
                };

                let report = cmd.round_trip().unwrap();
                assert!(report.matches);
                assert_eq!(report.decoded, "aaab");
                assert_eq!(report.tokens, vec![257, 98]);

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_check_missing_model() {
        TempDir::new("lipi_cli_check_missing")
            .and_then(|dir| {
                let args = Args::try_parse_from([
                    "lipi",
                    "check",
                    "-m",
                    dir.path().join("absent").to_str().unwrap(),
                    "x",
                ])
                .unwrap();
                let Commands::Check(cmd) = args.command else {
                    panic!("expected the check command");
                };

                assert!(cmd.round_trip().is_err());

                Ok(())
            })
            .unwrap();
    }
}
