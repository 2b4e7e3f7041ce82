//! # JSON Record IO

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use crate::{
    errors::{LipiError, LipiResult},
    types::TokenType,
    vocab::{
        MergeTable,
        Vocabulary,
        io::json_records::{
            MergeRecord,
            VocabRecord,
            merges_from_record,
            merges_to_record,
            vocab_from_record,
            vocab_to_record,
        },
    },
};

/// Map a read-side ``serde_json`` error.
///
/// IO failures stay IO failures; everything else is a malformed record.
fn read_error(err: serde_json::Error) -> LipiError {
    if err.is_io() {
        LipiError::Io(err.into())
    } else {
        LipiError::MalformedPersistedState(err.to_string())
    }
}

/// The ``({stem}_vocab.json, {stem}_merges.json)`` record paths for a model path.
///
/// ``{stem}`` is `path` with its extension (if any) removed.
///
/// ## Example
/// ```rust
/// use std::path::PathBuf;
///
/// use lipi::vocab::io::record_paths;
///
/// assert_eq!(
///     record_paths("models/telugu.json"),
///     (
///         PathBuf::from("models/telugu_vocab.json"),
///         PathBuf::from("models/telugu_merges.json"),
///     )
/// );
/// ```
pub fn record_paths<P: AsRef<Path>>(path: P) -> (PathBuf, PathBuf) {
    let stem = path.as_ref().with_extension("");
    let stem = stem.as_os_str();

    let mut vocab_path = stem.to_os_string();
    vocab_path.push("_vocab.json");

    let mut merges_path = stem.to_os_string();
    merges_path.push("_merges.json");

    (vocab_path.into(), merges_path.into())
}

/// Write a [`VocabRecord`] as pretty JSON.
pub fn write_vocab_record<W: Write>(
    record: &VocabRecord,
    writer: &mut W,
) -> LipiResult<()> {
    serde_json::to_writer_pretty(&mut *writer, record).map_err(std::io::Error::from)?;
    writer.flush()?;
    Ok(())
}

/// Read a [`VocabRecord`].
pub fn read_vocab_record<R: Read>(reader: R) -> LipiResult<VocabRecord> {
    serde_json::from_reader(reader).map_err(read_error)
}

/// Write a [`MergeRecord`] as pretty JSON.
pub fn write_merge_record<W: Write>(
    record: &MergeRecord,
    writer: &mut W,
) -> LipiResult<()> {
    serde_json::to_writer_pretty(&mut *writer, record).map_err(std::io::Error::from)?;
    writer.flush()?;
    Ok(())
}

/// Read a [`MergeRecord`].
pub fn read_merge_record<R: Read>(reader: R) -> LipiResult<MergeRecord> {
    serde_json::from_reader(reader).map_err(read_error)
}

/// Write a trained state to a pair of writers.
///
/// ## Arguments
/// * `vocab` - the vocabulary.
/// * `merges` - the merge table.
/// * `vocab_writer` - the ``*_vocab.json`` writer.
/// * `merges_writer` - the ``*_merges.json`` writer.
pub fn write_state<T, W1, W2>(
    vocab: &Vocabulary<T>,
    merges: &MergeTable<T>,
    vocab_writer: &mut W1,
    merges_writer: &mut W2,
) -> LipiResult<()>
where
    T: TokenType,
    W1: Write,
    W2: Write,
{
    write_vocab_record(&vocab_to_record(vocab), vocab_writer)?;
    write_merge_record(&merges_to_record(vocab, merges), merges_writer)
}

/// Read and validate a trained state from a pair of readers.
///
/// ## Returns
/// A `Result` containing the state, or `MalformedPersistedState`.
pub fn read_state<T, R1, R2>(
    vocab_reader: R1,
    merges_reader: R2,
) -> LipiResult<(Vocabulary<T>, MergeTable<T>)>
where
    T: TokenType,
    R1: Read,
    R2: Read,
{
    let vocab = vocab_from_record(&read_vocab_record(vocab_reader)?)?;
    let merges = merges_from_record(&vocab, &read_merge_record(merges_reader)?)?;
    Ok((vocab, merges))
}

/// Save a trained state next to `path`.
///
/// See [`record_paths`].
///
/// ## Returns
/// The ``(vocab, merges)`` paths written.
pub fn save_state_path<T, P>(
    vocab: &Vocabulary<T>,
    merges: &MergeTable<T>,
    path: P,
) -> LipiResult<(PathBuf, PathBuf)>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let (vocab_path, merges_path) = record_paths(path);

    let mut vocab_writer = BufWriter::new(File::create(&vocab_path)?);
    let mut merges_writer = BufWriter::new(File::create(&merges_path)?);

    write_state(vocab, merges, &mut vocab_writer, &mut merges_writer)?;

    log::info!(
        "saved {} tokens and {} merges to {} and {}",
        vocab.len(),
        merges.len(),
        vocab_path.display(),
        merges_path.display()
    );

    Ok((vocab_path, merges_path))
}

/// Load a trained state saved next to `path`.
///
/// See [`record_paths`].
pub fn load_state_path<T, P>(path: P) -> LipiResult<(Vocabulary<T>, MergeTable<T>)>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let (vocab_path, merges_path) = record_paths(path);

    let (vocab, merges) = read_state(
        BufReader::new(File::open(&vocab_path)?),
        BufReader::new(File::open(&merges_path)?),
    )?;

    log::info!(
        "loaded {} tokens and {} merges from {}",
        vocab.len(),
        merges.len(),
        vocab_path.display()
    );

    Ok((vocab, merges))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{MergeRule, VocabularyBuilder};

    fn trained_state() -> (Vocabulary<u32>, MergeTable<u32>) {
        let mut vocab: Vocabulary<u32> = VocabularyBuilder::new()
            .with_seed_str("క")
            .build()
            .unwrap();
        let mut merges = MergeTable::default();

        let ka_ka = vocab.push_merged("కక".as_bytes().to_vec()).unwrap();
        merges.push(MergeRule::new((256, 256), ka_ka));

        (vocab, merges)
    }

    #[test]
    fn test_record_paths() {
        assert_eq!(
            record_paths("telugu_tokenizer"),
            (
                PathBuf::from("telugu_tokenizer_vocab.json"),
                PathBuf::from("telugu_tokenizer_merges.json")
            )
        );
        assert_eq!(
            record_paths("/tmp/model.bin"),
            (
                PathBuf::from("/tmp/model_vocab.json"),
                PathBuf::from("/tmp/model_merges.json")
            )
        );
    }

    #[test]
    fn test_write_read_state() {
        let (vocab, merges) = trained_state();

        let mut vocab_buf: Vec<u8> = Vec::new();
        let mut merges_buf: Vec<u8> = Vec::new();
        write_state(&vocab, &merges, &mut vocab_buf, &mut merges_buf).unwrap();

        // Non-ASCII text is written as-is.
        let merges_json = String::from_utf8(merges_buf.clone()).unwrap();
        assert!(merges_json.contains("\"result\": \"కక\""));

        let (loaded_vocab, loaded_merges) =
            read_state::<u32, _, _>(vocab_buf.as_slice(), merges_buf.as_slice()).unwrap();

        assert_eq!(loaded_vocab, vocab);
        assert_eq!(loaded_merges, merges);
        assert_eq!(loaded_vocab.base_vocab_size(), 257);
    }

    #[test]
    fn test_read_malformed_json() {
        for bad in [
            "",
            "{",
            "[]",
            r#"{"0": {"text": "a"}}"#,
            r#"{"0": {"text": "a", "bytes": [256], "is_base": true}}"#,
            r#"{"x": {"text": "a", "bytes": [1], "is_base": true}}"#,
        ] {
            assert!(
                matches!(
                    read_vocab_record(bad.as_bytes()),
                    Err(LipiError::MalformedPersistedState(_))
                ),
                "{bad:?}"
            );
        }

        assert!(matches!(
            read_merge_record(r#"{"256": {"parts": ["a", "a"], "result": "aa"}}"#.as_bytes()),
            Err(LipiError::MalformedPersistedState(_))
        ));
    }

    #[test]
    fn test_save_load_state_path() {
        let (vocab, merges) = trained_state();

        tempdir::TempDir::new("lipi_state_test")
            .and_then(|dir| {
                let path = dir.path().join("telugu.json");

                let (vocab_path, merges_path) =
                    save_state_path(&vocab, &merges, &path).expect("Failed to save state");
                assert!(vocab_path.exists());
                assert!(merges_path.exists());

                let (loaded_vocab, loaded_merges) =
                    load_state_path::<u32, _>(&path).expect("Failed to load state");

                assert_eq!(loaded_vocab, vocab);
                assert_eq!(loaded_merges, merges);

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_load_missing_path() {
        tempdir::TempDir::new("lipi_state_test")
            .and_then(|dir| {
                let path = dir.path().join("missing");
                assert!(matches!(
                    load_state_path::<u32, _>(&path),
                    Err(LipiError::Io(_))
                ));
                Ok(())
            })
            .unwrap();
    }
}
