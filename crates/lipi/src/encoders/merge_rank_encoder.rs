//! # Merge Rank Encoder

use std::sync::Arc;

use core::cmp::Reverse;

use dary_heap::OctonaryHeap;

use crate::{
    encoders::TokenEncoder,
    errors::LipiResult,
    pretokenize::pretokenize_append,
    training::utility::TokenChain,
    types::{Pair, TokenType},
    vocab::{MergeTable, Vocabulary},
};

/// A seed pre-tokenization / ``(T, T) -> T`` merge [`TokenEncoder`].
///
/// The input is pre-tokenized into seed tokens; then, while any adjacent
/// pair has a rule, the rule with the smallest result id (the earliest
/// learned) is applied at its leftmost occurrence.
///
/// A rule's result is always greater than its parents; so this applies
/// each rule to all of its non-overlapping occurrences, left to right,
/// before any later rule.
#[derive(Clone)]
pub struct MergeRankEncoder<T: TokenType> {
    vocab: Arc<Vocabulary<T>>,
    merges: Arc<MergeTable<T>>,
}

impl<T: TokenType> MergeRankEncoder<T> {
    /// Construct an encoder.
    ///
    /// ## Arguments
    /// * `vocab` - The vocabulary; only base tokens are pre-tokenized.
    /// * `merges` - The merge table; may be empty.
    pub fn new(
        vocab: Arc<Vocabulary<T>>,
        merges: Arc<MergeTable<T>>,
    ) -> Self {
        Self { vocab, merges }
    }

    /// The vocabulary.
    pub fn vocab(&self) -> &Arc<Vocabulary<T>> {
        &self.vocab
    }

    /// The merge table.
    pub fn merges(&self) -> &Arc<MergeTable<T>> {
        &self.merges
    }

    /// Compiler Hint.
    #[inline]
    fn lookup_pair(
        &self,
        pair: &Pair<T>,
    ) -> Option<T> {
        self.merges.lookup_pair(pair)
    }

    /// Encode bytes, appending to a target buffer.
    ///
    /// ## Arguments
    /// * `bytes` - The bytes to encode.
    /// * `tokens` - The target token buffer to append to.
    pub fn encode_append_bytes(
        &self,
        bytes: &[u8],
        tokens: &mut Vec<T>,
    ) {
        let start = tokens.len();
        pretokenize_append(&self.vocab, bytes, tokens);

        if tokens.len() - start < 2 || self.merges.is_empty() {
            return;
        }

        let mut chain = TokenChain::from_tokens(tokens.split_off(start));

        // Min-heap of ``(rank, position)``; entries are checked when popped.
        let mut heap: OctonaryHeap<Reverse<(T, usize)>> = chain
            .pairs()
            .filter_map(|(pos, pair)| self.lookup_pair(&pair).map(|t| Reverse((t, pos))))
            .collect();

        while let Some(Reverse((t, pos))) = heap.pop() {
            match chain.pair_at(pos) {
                Some(pair) if self.lookup_pair(&pair) == Some(t) => (),
                // Stale.
                _ => continue,
            }

            chain.merge_at_cb(pos, t, &mut |_, _, _| {});

            if let Some(prev) = chain.prev(pos)
                && let Some(pair) = chain.pair_at(prev)
                && let Some(rank) = self.lookup_pair(&pair)
            {
                heap.push(Reverse((rank, prev)));
            }
            if let Some(pair) = chain.pair_at(pos)
                && let Some(rank) = self.lookup_pair(&pair)
            {
                heap.push(Reverse((rank, pos)));
            }
        }

        tokens.extend(chain.iter().map(|(_, t)| t));
    }
}

impl<T: TokenType> TokenEncoder<T> for MergeRankEncoder<T> {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text, tokens)))]
    fn try_encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<T>,
    ) -> LipiResult<()> {
        self.encode_append_bytes(text.as_bytes(), tokens);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        compat::traits::static_is_send_sync_check,
        pretokenize::pretokenize,
        training::MergeTrainerOptions,
        vocab::{SeedScript, VocabularyBuilder},
    };

    /// One full left-to-right pass per rule, earliest rule first.
    fn naive_encode(
        vocab: &Vocabulary<u32>,
        merges: &MergeTable<u32>,
        text: &str,
    ) -> Vec<u32> {
        let mut seq = pretokenize(vocab, text.as_bytes());
        while let Some((pair, t)) = seq
            .windows(2)
            .filter_map(|w| merges.lookup_pair(&(w[0], w[1])).map(|t| ((w[0], w[1]), t)))
            .min_by_key(|&(_, t)| t)
        {
            let mut next = Vec::with_capacity(seq.len());
            let mut i = 0;
            while i < seq.len() {
                if i + 1 < seq.len() && (seq[i], seq[i + 1]) == pair {
                    next.push(t);
                    i += 2;
                } else {
                    next.push(seq[i]);
                    i += 1;
                }
            }
            seq = next;
        }
        seq
    }

    fn trained_encoder(
        corpus: &str,
        base: Vocabulary<u32>,
        vocab_size: usize,
    ) -> MergeRankEncoder<u32> {
        let results = MergeTrainerOptions::new(vocab_size)
            .init()
            .train(corpus, base)
            .unwrap();
        MergeRankEncoder::new(Arc::new(results.vocab), Arc::new(results.merges))
    }

    #[test]
    fn test_base_only() {
        let vocab: Arc<Vocabulary<u32>> = Arc::new(VocabularyBuilder::new().build().unwrap());
        let encoder = MergeRankEncoder::new(vocab, Default::default());
        static_is_send_sync_check(&encoder);

        assert_eq!(encoder.try_encode("").unwrap(), Vec::<u32>::new());
        assert_eq!(encoder.try_encode("ab").unwrap(), vec![97, 98]);
    }

    #[test]
    fn test_scenario_rules() {
        let encoder = trained_encoder(
            "aaab aaab aaab",
            VocabularyBuilder::new().build().unwrap(),
            258,
        );

        assert_eq!(encoder.try_encode("aaab").unwrap(), vec![257, 98]);
        assert_eq!(encoder.try_encode("aa").unwrap(), vec![256]);
        assert_eq!(encoder.try_encode("aaaa").unwrap(), vec![256, 256]);
        assert_eq!(encoder.try_encode("aaaaa").unwrap(), vec![256, 257]);
        assert_eq!(encoder.try_encode("b").unwrap(), vec![98]);
    }

    #[test]
    fn test_matches_naive_encoder() {
        let corpus = "తెలుగు భాష దేశ భాషలందు లెస్స. the cat sat on the mat ".repeat(6);
        let samples = [
            "",
            "a",
            "తెలుగు భాష",
            "the mat sat on the cat",
            "భాషలందు లెస్స తెలుగు తెలుగు",
            "unseen words: ಕನ್ನಡ, हिन्दी, 😀",
        ];

        for base in [
            VocabularyBuilder::new().build().unwrap(),
            VocabularyBuilder::new()
                .with_script(SeedScript::Telugu)
                .build()
                .unwrap(),
        ] {
            let encoder = trained_encoder(&corpus, base.clone(), base.len() + 60);

            for sample in samples {
                assert_eq!(
                    encoder.try_encode(sample).unwrap(),
                    naive_encode(encoder.vocab(), encoder.merges(), sample),
                    "sample: {sample:?}"
                );
            }
        }
    }

    #[test]
    fn test_encode_append_and_batch() {
        let encoder = trained_encoder(
            "aaab aaab aaab",
            VocabularyBuilder::new().build().unwrap(),
            258,
        );

        let mut tokens = vec![1, 2];
        encoder.try_encode_append("aaab", &mut tokens).unwrap();
        assert_eq!(tokens, vec![1, 2, 257, 98]);

        assert_eq!(
            encoder.try_encode_batch(&["aa", "", "aaab"]).unwrap(),
            vec![vec![256], vec![], vec![257, 98]]
        );
    }
}
