use std::io::{BufRead, Write};

use lipi::{TokenDecoder, Tokenizer};

use crate::{
    input_output::{InputArgs, OutputArgs},
    logging::LogArgs,
    model_args::ModelArgs,
};

/// Args for the decode command.
#[derive(clap::Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    model: ModelArgs,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[clap(flatten)]
    logging: LogArgs,
}

impl DecodeArgs {
    /// Run the decode command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let tokenizer = self.model.load_tokenizer()?;

        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        decode_lines(&mut reader, &mut writer, &tokenizer)
    }
}

/// Decode each line of whitespace-separated ids, writing the text as-is.
pub fn decode_lines(
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
    tokenizer: &Tokenizer<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    for (idx, line) in reader.lines().enumerate() {
        let tokens = line?
            .split_whitespace()
            .map(|s| {
                s.parse::<u32>()
                    .map_err(|err| format!("line {}: bad token id {s:?}: {err}", idx + 1))
            })
            .collect::<Result<Vec<u32>, _>>()?;

        let text = tokenizer.try_decode_to_string(&tokens)?;

        write!(writer, "{text}")?;
        writer.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use lipi::{
        MergeTrainerOptions,
        vocab::{SeedScript, VocabularyBuilder},
    };

    use super::*;
    use crate::commands::encode::encode_lines;

    fn tokenizer() -> Tokenizer<u32> {
        let base = VocabularyBuilder::new()
            .with_script(SeedScript::Telugu)
            .build()
            .unwrap();
        let vocab_size = base.len() + 20;
        Tokenizer::train(
            &"తెలుగు భాష\nhello world\n".repeat(5),
            base,
            MergeTrainerOptions::new(vocab_size),
        )
        .unwrap()
    }

    #[test]
    fn test_encode_decode_lines() {
        let tokenizer = tokenizer();
        let text = "తెలుగు భాష\n\nhello\r\nlast line";

        let mut encoded = Vec::new();
        encode_lines(&mut Cursor::new(text), &mut encoded, &tokenizer).unwrap();

        let encoded = String::from_utf8(encoded).unwrap();
        assert_eq!(encoded.lines().count(), 4);

        let mut decoded = Vec::new();
        decode_lines(&mut Cursor::new(encoded), &mut decoded, &tokenizer).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), text);
    }

    #[test]
    fn test_decode_bad_ids() {
        let tokenizer = tokenizer();

        let mut out = Vec::new();
        assert!(decode_lines(&mut Cursor::new("97 x"), &mut out, &tokenizer).is_err());
        assert!(decode_lines(&mut Cursor::new("97 100000"), &mut out, &tokenizer).is_err());
    }
}
