//! # Merge Table ``{ (T, T) -> T }``

use core::fmt::Debug;

use crate::{
    errors::{LipiError, LipiResult},
    types::{CommonHashSet, Pair, TokenType},
    vocab::{vocab_types::PairTokenMap, vocabulary::Vocabulary},
};

/// A learned ``(left, right) -> result`` merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MergeRule<T: TokenType> {
    /// The ``(left, right)`` parent pair.
    pub pair: Pair<T>,

    /// The merged token.
    pub result: T,
}

impl<T: TokenType> MergeRule<T> {
    /// Create a new rule.
    pub fn new(
        pair: Pair<T>,
        result: T,
    ) -> Self {
        Self { pair, result }
    }
}

/// Validate that a [`MergeTable`] is grounded in a [`Vocabulary`].
///
/// - for every ``(a, b) -> t`` rule:
///   - the parents ``a`` and ``b`` are in the vocabulary;
///   - ``t`` is a merged (non-base) token;
///   - ``bytes(t) == bytes(a) ++ bytes(b)``.
/// - every merged token is the result of exactly one rule.
///
/// ## Arguments
/// * `vocab` - The vocabulary to validate against.
/// * `merges` - The merge table to validate.
pub fn try_validate_merge_table<T: TokenType>(
    vocab: &Vocabulary<T>,
    merges: &MergeTable<T>,
) -> LipiResult<()> {
    for rule in merges.iter() {
        let (a, b) = rule.pair;
        let t = rule.result;

        let left = vocab.get_bytes(a).ok_or_else(|| {
            LipiError::VocabConflict(format!("merge {rule:?} parent {a} is not defined"))
        })?;
        let right = vocab.get_bytes(b).ok_or_else(|| {
            LipiError::VocabConflict(format!("merge {rule:?} parent {b} is not defined"))
        })?;
        let merged = vocab.get(t).ok_or_else(|| {
            LipiError::VocabConflict(format!("merge {rule:?} result {t} is not defined"))
        })?;

        if merged.is_base {
            return Err(LipiError::VocabConflict(format!(
                "merge {rule:?} result {t} is a base token"
            )));
        }

        if merged.bytes.len() != left.len() + right.len()
            || !merged.bytes.starts_with(left)
            || !merged.bytes.ends_with(right)
        {
            return Err(LipiError::VocabConflict(format!(
                "merge {rule:?} result bytes {:?} != {left:?} ++ {right:?}",
                merged.bytes
            )));
        }
    }

    // Results are unique (see `MergeTable::from_rules`), and all non-base;
    // so equal counts means every merged token has exactly one rule.
    if merges.len() != vocab.merged_tokens().len() {
        return Err(LipiError::VocabConflict(format!(
            "{} merged tokens but {} merge rules",
            vocab.merged_tokens().len(),
            merges.len()
        )));
    }

    Ok(())
}

/// Ordered merge rules, with a ``{ (T, T) -> T }`` lookup.
///
/// Rules are kept in learned order; each rule's result is greater
/// than the previous rule's result.
#[derive(Clone, PartialEq)]
pub struct MergeTable<T: TokenType> {
    rules: Vec<MergeRule<T>>,

    pair_map: PairTokenMap<T>,
}

impl<T: TokenType> Default for MergeTable<T> {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            pair_map: Default::default(),
        }
    }
}

impl<T: TokenType> Debug for MergeTable<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("MergeTable")
            .field("len", &self.len())
            .field("rules", &self.rules)
            .finish()
    }
}

impl<T: TokenType> MergeTable<T> {
    /// Build a [`MergeTable`] from a set of rules.
    ///
    /// Rules are ordered by result id.
    ///
    /// ## Returns
    /// A `Result` containing the table, or a `VocabConflict`
    /// if a pair or a result appears twice.
    pub fn from_rules<I>(rules: I) -> LipiResult<Self>
    where
        I: IntoIterator<Item = MergeRule<T>>,
    {
        let mut rules: Vec<MergeRule<T>> = rules.into_iter().collect();
        rules.sort_by_key(|r| r.result);

        let mut results: CommonHashSet<T> = Default::default();
        let mut table = Self::default();

        for rule in rules {
            if !results.insert(rule.result) {
                return Err(LipiError::VocabConflict(format!(
                    "merge result {} appears more than once",
                    rule.result
                )));
            }
            if table.pair_map.contains_key(&rule.pair) {
                return Err(LipiError::VocabConflict(format!(
                    "merge pair {:?} appears more than once",
                    rule.pair
                )));
            }
            table.push(rule);
        }

        Ok(table)
    }

    /// The number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rules, in learned order.
    pub fn rules(&self) -> &[MergeRule<T>] {
        &self.rules
    }

    /// Iterate over the rules, in learned order.
    pub fn iter(&self) -> core::slice::Iter<'_, MergeRule<T>> {
        self.rules.iter()
    }

    /// The ``{ (T, T) -> T }`` lookup map.
    pub fn pair_map(&self) -> &PairTokenMap<T> {
        &self.pair_map
    }

    /// Look up the result of merging a pair.
    #[inline]
    pub fn lookup_pair(
        &self,
        pair: &Pair<T>,
    ) -> Option<T> {
        self.pair_map.get(pair).copied()
    }

    /// Append a rule.
    pub(crate) fn push(
        &mut self,
        rule: MergeRule<T>,
    ) {
        debug_assert!(self.rules.last().is_none_or(|r| r.result < rule.result));

        self.pair_map.insert(rule.pair, rule.result);
        self.rules.push(rule);
    }
}

impl<'a, T: TokenType> IntoIterator for &'a MergeTable<T> {
    type Item = &'a MergeRule<T>;
    type IntoIter = core::slice::Iter<'a, MergeRule<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::VocabularyBuilder;

    fn trained_state() -> (Vocabulary<u32>, MergeTable<u32>) {
        let mut vocab: Vocabulary<u32> = VocabularyBuilder::new().build().unwrap();
        let mut merges = MergeTable::default();

        let aa = vocab.push_merged(b"aa".to_vec()).unwrap();
        merges.push(MergeRule::new((97, 97), aa));

        let aaa = vocab.push_merged(b"aaa".to_vec()).unwrap();
        merges.push(MergeRule::new((aa, 97), aaa));

        (vocab, merges)
    }

    #[test]
    fn test_lookup() {
        let (_, merges) = trained_state();

        assert_eq!(merges.len(), 2);
        assert_eq!(merges.lookup_pair(&(97, 97)), Some(256));
        assert_eq!(merges.lookup_pair(&(256, 97)), Some(257));
        assert_eq!(merges.lookup_pair(&(97, 256)), None);

        assert_eq!(
            merges.iter().map(|r| r.result).collect::<Vec<_>>(),
            vec![256, 257]
        );
    }

    #[test]
    fn test_from_rules_orders_by_result() {
        let merges = MergeTable::<u32>::from_rules([
            MergeRule::new((256, 97), 257),
            MergeRule::new((97, 97), 256),
        ])
        .unwrap();

        assert_eq!(merges, trained_state().1);
    }

    #[test]
    fn test_from_rules_rejects_duplicates() {
        assert!(
            MergeTable::<u32>::from_rules([
                MergeRule::new((97, 97), 256),
                MergeRule::new((97, 97), 257),
            ])
            .is_err()
        );
        assert!(
            MergeTable::<u32>::from_rules([
                MergeRule::new((97, 97), 256),
                MergeRule::new((98, 98), 256),
            ])
            .is_err()
        );
    }

    #[test]
    fn test_validate() {
        let (vocab, merges) = trained_state();
        try_validate_merge_table(&vocab, &merges).unwrap();

        // Wrong bytes.
        let bad = MergeTable::from_rules([
            MergeRule::new((97, 98), 256),
            MergeRule::new((256, 97), 257),
        ])
        .unwrap();
        assert!(try_validate_merge_table(&vocab, &bad).is_err());

        // Base result.
        let bad = MergeTable::from_rules([MergeRule::new((97, 97), 98)]).unwrap();
        assert!(try_validate_merge_table(&vocab, &bad).is_err());

        // Dangling parent.
        let bad = MergeTable::from_rules([
            MergeRule::new((97, 97), 256),
            MergeRule::new((999, 97), 257),
        ])
        .unwrap();
        assert!(try_validate_merge_table(&vocab, &bad).is_err());

        // Merged token without a rule.
        let bad = MergeTable::from_rules([MergeRule::new((97, 97), 256)]).unwrap();
        assert!(try_validate_merge_table(&vocab, &bad).is_err());
    }
}
