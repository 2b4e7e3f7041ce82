//! # JSON Vocabulary / Merge Records
//!
//! The persisted form of a trained state is a pair of JSON objects,
//! keyed by string-encoded ids in ascending numeric order:
//!
//! ```json
//! { "256": { "text": "aa", "bytes": [97, 97], "is_base": false } }
//! ```
//!
//! ```json
//! { "256": { "parts": ["a", "a"], "result": "aa", "token_ids": [97, 97] } }
//! ```
//!
//! The ``text``, ``parts``, and ``result`` fields are for human inspection;
//! loading uses only ``bytes``, ``is_base``, and ``token_ids``.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    errors::{LipiError, LipiResult},
    types::{TokenType, token_u64},
    vocab::{
        MergeRule,
        MergeTable,
        Token,
        Vocabulary,
        merge_table::try_validate_merge_table,
        text::{best_effort_text, token_placeholder},
    },
};

/// A persisted vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    /// Best-effort text; or the ``[Bytes: [..]]`` marker.
    pub text: String,

    /// The token's byte payload.
    pub bytes: Vec<u8>,

    /// Was this token part of the seed vocabulary?
    pub is_base: bool,
}

/// The persisted ``{ id -> VocabEntry }`` record.
pub type VocabRecord = BTreeMap<u64, VocabEntry>;

/// A persisted merge entry, keyed by its result id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeEntry {
    /// Best-effort text of the parents; or ``Token_{id}`` placeholders.
    pub parts: [String; 2],

    /// Best-effort text of the result; or a ``Token_{id}`` placeholder.
    pub result: String,

    /// The ``[left, right]`` parent ids.
    pub token_ids: [u64; 2],
}

/// The persisted ``{ result_id -> MergeEntry }`` record.
pub type MergeRecord = BTreeMap<u64, MergeEntry>;

/// Re-tag an integrity failure as `MalformedPersistedState`.
pub(crate) fn malformed(err: LipiError) -> LipiError {
    match err {
        LipiError::VocabConflict(msg) => LipiError::MalformedPersistedState(msg),
        LipiError::VocabSizeOverflow { size } => LipiError::MalformedPersistedState(format!(
            "{size} tokens exceed token type capacity"
        )),
        err => err,
    }
}

fn try_token<T: TokenType>(id: u64) -> LipiResult<T> {
    T::from_u64(id).ok_or_else(|| {
        LipiError::MalformedPersistedState(format!("token id {id} exceeds token type capacity"))
    })
}

/// Build the persisted record for a [`Vocabulary`].
pub fn vocab_to_record<T: TokenType>(vocab: &Vocabulary<T>) -> VocabRecord {
    vocab
        .tokens()
        .iter()
        .map(|t| {
            (
                token_u64(t.id),
                VocabEntry {
                    text: best_effort_text(&t.bytes),
                    bytes: t.bytes.clone(),
                    is_base: t.is_base,
                },
            )
        })
        .collect()
}

/// Build the persisted record for a [`MergeTable`].
///
/// If any of a rule's three payloads is not valid UTF-8,
/// all three are rendered as ``Token_{id}`` placeholders.
///
/// ## Arguments
/// * `vocab` - the vocabulary the table is grounded in.
/// * `merges` - the merge table.
pub fn merges_to_record<T: TokenType>(
    vocab: &Vocabulary<T>,
    merges: &MergeTable<T>,
) -> MergeRecord {
    let text = |t: T| {
        vocab
            .get(t)
            .and_then(|token| token.as_str())
            .map(str::to_string)
    };

    merges
        .iter()
        .map(|rule| {
            let (a, b) = rule.pair;

            let (parts, result) = match (text(a), text(b), text(rule.result)) {
                (Some(left), Some(right), Some(merged)) => ([left, right], merged),
                _ => (
                    [token_placeholder(a), token_placeholder(b)],
                    token_placeholder(rule.result),
                ),
            };

            (
                token_u64(rule.result),
                MergeEntry {
                    parts,
                    result,
                    token_ids: [token_u64(a), token_u64(b)],
                },
            )
        })
        .collect()
}

/// Rebuild a [`Vocabulary`] from its persisted record.
///
/// ## Returns
/// A `Result` containing the vocabulary, or `MalformedPersistedState`.
pub fn vocab_from_record<T: TokenType>(record: &VocabRecord) -> LipiResult<Vocabulary<T>> {
    let tokens = record
        .iter()
        .map(|(&id, entry)| {
            Ok(Token {
                id: try_token(id)?,
                bytes: entry.bytes.clone(),
                is_base: entry.is_base,
            })
        })
        .collect::<LipiResult<Vec<Token<T>>>>()?;

    Vocabulary::from_tokens(tokens).map_err(malformed)
}

/// Rebuild a [`MergeTable`] from its persisted record.
///
/// The table is validated against `vocab`; see [`try_validate_merge_table`].
///
/// ## Returns
/// A `Result` containing the merge table, or `MalformedPersistedState`.
pub fn merges_from_record<T: TokenType>(
    vocab: &Vocabulary<T>,
    record: &MergeRecord,
) -> LipiResult<MergeTable<T>> {
    let rules = record
        .iter()
        .map(|(&result, entry)| {
            let [a, b] = entry.token_ids;
            Ok(MergeRule::new(
                (try_token(a)?, try_token(b)?),
                try_token(result)?,
            ))
        })
        .collect::<LipiResult<Vec<MergeRule<T>>>>()?;

    let merges = MergeTable::from_rules(rules).map_err(malformed)?;
    try_validate_merge_table(vocab, &merges).map_err(malformed)?;

    Ok(merges)
}
