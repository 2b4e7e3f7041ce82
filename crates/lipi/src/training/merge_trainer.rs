//! # Merge Trainer

use core::cmp::{Ordering, Reverse};

use dary_heap::OctonaryHeap;

use crate::{
    errors::{LipiError, LipiResult},
    pretokenize::{default_chunk_size, pretokenize, pretokenize_chunked},
    training::{
        TrainingProgress,
        utility::{PairPositionIndex, TokenChain},
    },
    types::{CommonHashSet, Pair, TokenType, token_u64},
    vocab::{
        MergeRule,
        MergeTable,
        Vocabulary,
        text::best_effort_text,
        validators::try_vocab_size,
    },
};

/// The default number of merges between progress log lines.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100;

/// Options for [`MergeTrainer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeTrainerOptions {
    /// The target vocab size, including the base tokens.
    pub vocab_size: usize,

    /// The pre-tokenization chunk size, in bytes.
    ///
    /// When `None`, a size is picked from the corpus size and the pool size.
    pub chunk_size: Option<usize>,

    /// The number of merges between progress log lines; ``0`` disables them.
    pub progress_interval: usize,

    /// Pre-tokenize the corpus in parallel chunks.
    pub parallel: bool,
}

impl MergeTrainerOptions {
    /// Create new options.
    ///
    /// ## Arguments
    /// * `vocab_size` - The target vocabulary size.
    ///
    /// ## Returns
    /// A new `MergeTrainerOptions` instance.
    pub fn new(vocab_size: usize) -> Self {
        Self {
            vocab_size,
            chunk_size: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            parallel: true,
        }
    }

    /// Sets the vocab size.
    ///
    /// ## Arguments
    /// * `vocab_size` - The desired vocabulary size; must be >= the base vocabulary size.
    pub fn with_vocab_size(
        self,
        vocab_size: usize,
    ) -> Self {
        Self { vocab_size, ..self }
    }

    /// Sets the pre-tokenization chunk size.
    pub fn with_chunk_size(
        self,
        chunk_size: Option<usize>,
    ) -> Self {
        Self { chunk_size, ..self }
    }

    /// Sets the number of merges between progress log lines.
    pub fn with_progress_interval(
        self,
        progress_interval: usize,
    ) -> Self {
        Self {
            progress_interval,
            ..self
        }
    }

    /// Sets whether pre-tokenization runs in parallel chunks.
    pub fn with_parallel(
        self,
        parallel: bool,
    ) -> Self {
        Self { parallel, ..self }
    }

    /// Initializes a [`MergeTrainer`] from these options.
    pub fn init(self) -> MergeTrainer {
        MergeTrainer::new(self)
    }
}

/// Why training stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum StopReason {
    /// The vocabulary reached the target size.
    TargetReached,

    /// No adjacent pair remained in the corpus.
    NoPairsLeft,
}

/// The results of a training run.
#[derive(Debug, Clone)]
pub struct TrainResults<T: TokenType> {
    /// The extended vocabulary.
    pub vocab: Vocabulary<T>,

    /// The learned merges, in order.
    pub merges: MergeTable<T>,

    /// Why training stopped.
    pub stop_reason: StopReason,

    /// The number of merge steps; including duplicate merge results.
    pub merge_steps: usize,

    /// The number of merge steps whose result bytes were already a token.
    pub duplicate_merges: usize,
}

/// Info about a [`Pair`] that could be merged.
#[derive(Debug, Clone, Copy, Eq)]
pub struct MergeCandidate<T: TokenType> {
    /// The number of (overlapping) occurrences of this pair.
    pub count: usize,

    /// The position of the first occurrence of this pair.
    pub first: usize,

    /// The pair to merge.
    pub pair: Pair<T>,
}

impl<T: TokenType> MergeCandidate<T> {
    /// The candidate key.
    ///
    /// Max-heap by count; tie-break to the earliest first occurrence.
    pub fn heap_key(&self) -> (usize, Reverse<usize>) {
        (self.count, Reverse(self.first))
    }
}

impl<T: TokenType> PartialEq for MergeCandidate<T> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.heap_key() == other.heap_key()
    }
}

impl<T: TokenType> PartialOrd for MergeCandidate<T> {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: TokenType> Ord for MergeCandidate<T> {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        self.heap_key().cmp(&other.heap_key())
    }
}

fn current_candidate<T: TokenType>(
    index: &PairPositionIndex<T>,
    pair: Pair<T>,
) -> Option<MergeCandidate<T>> {
    index
        .stats(&pair)
        .map(|(count, first)| MergeCandidate { count, first, pair })
}

/// Trainer for learning byte-pair merges over a single corpus.
///
/// Each merge step picks the most frequent adjacent pair (ties go to the
/// earliest first occurrence), and rewrites every non-overlapping occurrence,
/// left to right. Steps repeat until the vocabulary reaches the target size,
/// or no adjacent pair remains.
#[derive(Debug, Clone)]
pub struct MergeTrainer {
    /// Trainer options.
    pub options: MergeTrainerOptions,

    progress: TrainingProgress,
}

impl MergeTrainer {
    /// Initializes a [`MergeTrainer`].
    pub fn new(options: MergeTrainerOptions) -> Self {
        Self {
            options,
            progress: TrainingProgress::new(),
        }
    }

    /// Replace the progress counter.
    pub fn with_progress(
        self,
        progress: TrainingProgress,
    ) -> Self {
        Self { progress, ..self }
    }

    /// A handle to the shared progress counter.
    pub fn progress(&self) -> TrainingProgress {
        self.progress.clone()
    }

    /// Train merges over a corpus.
    ///
    /// ## Arguments
    /// * `corpus` - the training text.
    /// * `base` - the seed vocabulary; it must hold no merged tokens.
    ///
    /// ## Returns
    /// A `Result` containing the `TrainResults<T>` or an error.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, corpus, base)))]
    pub fn train<T: TokenType>(
        &self,
        corpus: &str,
        base: Vocabulary<T>,
    ) -> LipiResult<TrainResults<T>> {
        try_vocab_size::<T>(self.options.vocab_size, base.base_vocab_size())?;

        let tokens = if self.options.parallel {
            let chunk_size = self
                .options
                .chunk_size
                .unwrap_or_else(|| default_chunk_size(corpus.len(), None));
            pretokenize_chunked(&base, corpus, chunk_size)
        } else {
            pretokenize(&base, corpus.as_bytes())
        };

        log::info!(
            "Pre-tokenized {} bytes into {} seed tokens",
            corpus.len(),
            tokens.len()
        );

        self.train_tokens(tokens, base)
    }

    /// Train merges over a pre-tokenized sequence.
    ///
    /// ## Arguments
    /// * `tokens` - the seed token sequence; every token must be in `base`.
    /// * `base` - the seed vocabulary; it must hold no merged tokens.
    ///
    /// ## Returns
    /// A `Result` containing the `TrainResults<T>` or an error.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, tokens, base)))]
    pub fn train_tokens<T: TokenType>(
        &self,
        tokens: Vec<T>,
        base: Vocabulary<T>,
    ) -> LipiResult<TrainResults<T>> {
        if !base.merged_tokens().is_empty() {
            return Err(LipiError::VocabConflict(format!(
                "training requires a seed vocabulary; found {} merged tokens",
                base.merged_tokens().len()
            )));
        }
        if let Some(&t) = tokens.iter().find(|&&t| !base.contains(t)) {
            return Err(LipiError::InvalidTokenId { id: token_u64(t) });
        }

        let target = try_vocab_size::<T>(self.options.vocab_size, base.base_vocab_size())?;
        let interval = self.options.progress_interval;

        log::info!(
            "Starting BPE training: {} -> {} tokens",
            base.len(),
            target
        );

        let mut vocab = base;
        let mut merges: MergeTable<T> = MergeTable::default();

        let mut chain = TokenChain::from_tokens(tokens);

        log::info!("Building pair index...");
        let mut index = PairPositionIndex::from_chain(&chain);

        log::info!("Building heap with {} unique pairs", index.len());
        let mut heap: OctonaryHeap<MergeCandidate<T>> = OctonaryHeap::with_capacity(index.len());
        for (pair, count, first) in index.iter() {
            heap.push(MergeCandidate { count, first, pair });
        }

        let mut merge_steps = 0;
        let mut duplicate_merges = 0;

        let stop_reason = loop {
            if vocab.len() >= target {
                break StopReason::TargetReached;
            }

            let Some(job) = heap.pop() else {
                break StopReason::NoPairsLeft;
            };

            // Lazy refresh the candidate.
            match current_candidate(&index, job.pair) {
                None => continue,
                Some(current) if current.heap_key() != job.heap_key() => {
                    heap.push(current);
                    continue;
                }
                Some(_) => (),
            }

            let (a, b) = job.pair;
            let merged_bytes = [
                vocab.get_bytes(a).unwrap_or_default(),
                vocab.get_bytes(b).unwrap_or_default(),
            ]
            .concat();

            let new_token = match vocab.lookup_span(&merged_bytes) {
                Some(existing) => {
                    log::warn!(
                        "Duplicate merge result: {:?} -> {:?} is already token {existing}",
                        job.pair,
                        merged_bytes
                    );
                    duplicate_merges += 1;
                    existing
                }
                None => {
                    let t = vocab.push_merged(merged_bytes)?;
                    merges.push(MergeRule::new(job.pair, t));
                    t
                }
            };

            // These will all contain the new token;
            // and may be absent from, or stale in, the heap.
            let mut touched: CommonHashSet<Pair<T>> = Default::default();

            let positions = index.take(&job.pair).unwrap_or_default();
            for pos in positions {
                if chain.pair_at(pos) != Some(job.pair) {
                    // Consumed by an earlier occurrence in this pass.
                    continue;
                }
                chain.merge_at_cb(pos, new_token, &mut |pair, at, delta| {
                    if delta < 0 {
                        index.remove(&pair, at);
                    } else {
                        index.insert(pair, at);
                        touched.insert(pair);
                    }
                });
            }

            for pair in touched {
                if let Some(candidate) = current_candidate(&index, pair) {
                    heap.push(candidate);
                }
            }

            merge_steps += 1;
            self.progress.increment();

            if interval > 0 && merge_steps % interval == 0 {
                log::info!(
                    "Progress: {}/{} tokens ({} merge steps) - Merge {}: {} (frequency: {})",
                    vocab.len(),
                    target,
                    merge_steps,
                    token_u64(new_token),
                    describe_merge(&vocab, job.pair, new_token),
                    job.count
                );
            }
        };

        if stop_reason == StopReason::NoPairsLeft {
            log::info!(
                "No pairs left to merge; stopping at {} of {} tokens",
                vocab.len(),
                target
            );
        }

        log::info!(
            "Finished training: {} merges learned in {} steps ({} duplicates); {} tokens remain in the corpus",
            merges.len(),
            merge_steps,
            duplicate_merges,
            chain.len()
        );

        Ok(TrainResults {
            vocab,
            merges,
            stop_reason,
            merge_steps,
            duplicate_merges,
        })
    }
}

/// Render a merge as ``"left + right = merged"``.
fn describe_merge<T: TokenType>(
    vocab: &Vocabulary<T>,
    pair: Pair<T>,
    merged: T,
) -> String {
    let text = |t: T| best_effort_text(vocab.get_bytes(t).unwrap_or_default());
    format!("{} + {} = {}", text(pair.0), text(pair.1), text(merged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        compat::traits::static_is_send_sync_check,
        types::CommonHashMap,
        vocab::{SeedScript, VocabularyBuilder, try_validate_merge_table},
    };

    /// Recount-everything reference trainer.
    fn naive_train(
        mut seq: Vec<u32>,
        mut vocab: Vocabulary<u32>,
        target: usize,
    ) -> (Vocabulary<u32>, MergeTable<u32>, Vec<u32>) {
        let mut merges = MergeTable::default();

        while vocab.len() < target {
            let mut stats: CommonHashMap<Pair<u32>, (usize, usize)> = Default::default();
            for (i, w) in seq.windows(2).enumerate() {
                stats.entry((w[0], w[1])).or_insert((0, i)).0 += 1;
            }
            let Some((&pair, _)) = stats
                .iter()
                .max_by_key(|(_, (count, first))| (*count, Reverse(*first)))
            else {
                break;
            };

            let bytes = [
                vocab.get_bytes(pair.0).unwrap(),
                vocab.get_bytes(pair.1).unwrap(),
            ]
            .concat();
            let t = match vocab.lookup_span(&bytes) {
                Some(t) => t,
                None => {
                    let t = vocab.push_merged(bytes).unwrap();
                    merges.push(MergeRule::new(pair, t));
                    t
                }
            };

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

        (vocab, merges, seq)
    }

    fn byte_vocab() -> Vocabulary<u32> {
        VocabularyBuilder::new().build().unwrap()
    }

    #[test]
    fn test_trainer_options() {
        let options = MergeTrainerOptions::new(1000);
        assert_eq!(options.vocab_size, 1000);
        assert_eq!(options.chunk_size, None);
        assert_eq!(options.progress_interval, DEFAULT_PROGRESS_INTERVAL);
        assert!(options.parallel);

        let options = options
            .with_vocab_size(2000)
            .with_chunk_size(Some(4096))
            .with_progress_interval(10)
            .with_parallel(false);

        assert_eq!(
            options,
            MergeTrainerOptions {
                vocab_size: 2000,
                chunk_size: Some(4096),
                progress_interval: 10,
                parallel: false,
            }
        );

        let trainer = options.init();
        static_is_send_sync_check(&trainer);
    }

    #[test]
    fn test_merge_candidate_heap_key() {
        let job1: MergeCandidate<u32> = MergeCandidate {
            count: 3,
            first: 0,
            pair: (256, 97),
        };
        let job2 = MergeCandidate {
            count: 3,
            first: 2,
            pair: (97, 98),
        };
        let job3 = MergeCandidate {
            count: 4,
            first: 9,
            pair: (1, 2),
        };

        assert_eq!(job1.heap_key(), (3, Reverse(0)));

        // Same count: the earlier occurrence wins.
        assert_eq!(job1.cmp(&job2), Ordering::Greater);
        assert_eq!(job3.cmp(&job1), Ordering::Greater);
        assert_ne!(&job1, &job2);

        let mut heap = OctonaryHeap::from(vec![job2, job1, job3]);
        assert_eq!(heap.pop().map(|j| j.pair), Some((1, 2)));
        assert_eq!(heap.pop().map(|j| j.pair), Some((256, 97)));
        assert_eq!(heap.pop().map(|j| j.pair), Some((97, 98)));
    }

    #[test]
    fn test_scenario_tie_break() {
        let trainer = MergeTrainerOptions::new(258).init();
        let results = trainer.train("aaab aaab aaab", byte_vocab()).unwrap();

        assert_eq!(results.stop_reason, StopReason::TargetReached);
        assert_eq!(
            results.merges.rules(),
            &[
                MergeRule::new((97, 97), 256),
                MergeRule::new((256, 97), 257),
            ]
        );
        assert_eq!(results.vocab.get_bytes(256), Some(&b"aa"[..]));
        assert_eq!(results.vocab.get_bytes(257), Some(&b"aaa"[..]));
        assert_eq!(results.vocab.len(), 258);
        assert_eq!(trainer.progress().merges_done(), 2);
    }

    #[test]
    fn test_describe_merge() {
        let results = MergeTrainerOptions::new(258)
            .init()
            .train("aaab aaab aaab", byte_vocab())
            .unwrap();
        assert_eq!(describe_merge(&results.vocab, (97, 97), 256), "a + a = aa");
        assert_eq!(
            describe_merge(&results.vocab, (256, 97), 257),
            "aa + a = aaa"
        );

        let mut vocab = byte_vocab();
        let partial = vocab.push_merged(vec![0xE0, 0xB0]).unwrap();
        assert_eq!(
            describe_merge(&vocab, (0xE0, 0xB0), partial),
            "[Bytes: [224]] + [Bytes: [176]] = [Bytes: [224, 176]]"
        );
    }

    #[test]
    fn test_no_pairs_left() {
        let trainer = MergeTrainerOptions::new(1000).init();
        let results = trainer.train("abab", byte_vocab()).unwrap();

        assert_eq!(results.stop_reason, StopReason::NoPairsLeft);
        assert_eq!(results.vocab.len(), 258);
        assert_eq!(
            results.merges.rules(),
            &[
                MergeRule::new((97, 98), 256),
                MergeRule::new((256, 256), 257),
            ]
        );

        let results = trainer.train("", byte_vocab()).unwrap();
        assert_eq!(results.stop_reason, StopReason::NoPairsLeft);
        assert!(results.merges.is_empty());
    }

    #[test]
    fn test_target_equals_base() {
        let results = MergeTrainerOptions::new(256)
            .init()
            .train("aaaa", byte_vocab())
            .unwrap();

        assert_eq!(results.stop_reason, StopReason::TargetReached);
        assert_eq!(results.merge_steps, 0);
        assert!(results.merges.is_empty());
    }

    #[test]
    fn test_invalid_configuration() {
        let trainer = MergeTrainerOptions::new(100).init();
        assert!(matches!(
            trainer.train("abc", byte_vocab()),
            Err(LipiError::VocabSizeTooSmall {
                size: 100,
                base: 256
            })
        ));

        let mut vocab = byte_vocab();
        vocab.push_merged(b"ab".to_vec()).unwrap();
        assert!(matches!(
            MergeTrainerOptions::new(300).init().train("abc", vocab),
            Err(LipiError::VocabConflict(_))
        ));

        assert!(matches!(
            MergeTrainerOptions::new(300)
                .init()
                .train_tokens(vec![97, 999], byte_vocab()),
            Err(LipiError::InvalidTokenId { id: 999 })
        ));
    }

    #[test]
    fn test_duplicate_merge_result() {
        // A ligature seed, split by chunking into its parts.
        let base: Vocabulary<u32> = VocabularyBuilder::new()
            .with_seed_str("ab")
            .build()
            .unwrap();
        assert_eq!(base.lookup_seed(b"ab"), Some(256));

        let options = MergeTrainerOptions::new(258)
            .with_parallel(true)
            .with_chunk_size(Some(1));
        let results = options.init().train("abababab", base).unwrap();

        assert_eq!(results.duplicate_merges, 1);
        assert_eq!(results.merge_steps, 2);
        assert_eq!(results.merges.rules(), &[MergeRule::new((256, 256), 257)]);
        assert_eq!(results.vocab.get_bytes(257), Some(&b"abab"[..]));

        try_validate_merge_table(&results.vocab, &results.merges).unwrap();
    }

    #[test]
    fn test_matches_naive_trainer() {
        let corpora = [
            "aaab aaab aaab",
            "aaaa",
            "abababab ba ba ab",
            "the cat sat on the mat; the rat sat on the hat.",
            "తెలుగు భాష దేశ భాషలందు లెస్స. తెలుగు తెలుగు భాష",
            "mississippi missus misses the mist",
        ];

        for vocab in [
            byte_vocab(),
            VocabularyBuilder::new()
                .with_script(SeedScript::Telugu)
                .build()
                .unwrap(),
        ] {
            for corpus in corpora {
                let target = vocab.len() + 40;
                let seq = pretokenize(&vocab, corpus.as_bytes());

                let (naive_vocab, naive_merges, _) = naive_train(seq.clone(), vocab.clone(), target);

                let results = MergeTrainerOptions::new(target)
                    .with_parallel(false)
                    .init()
                    .train_tokens(seq, vocab.clone())
                    .unwrap();

                assert_eq!(results.merges, naive_merges, "corpus: {corpus:?}");
                assert_eq!(results.vocab, naive_vocab, "corpus: {corpus:?}");
            }
        }
    }

    #[test]
    fn test_trained_invariants() {
        let corpus = "తెలుగు భాష దేశ భాషలందు లెస్స. hello hello world! ".repeat(8);
        let base: Vocabulary<u32> = VocabularyBuilder::new()
            .with_script(SeedScript::Telugu)
            .build()
            .unwrap();
        let target = 450;

        let results = MergeTrainerOptions::new(target)
            .with_chunk_size(Some(17))
            .with_progress_interval(5)
            .init()
            .train(&corpus, base)
            .unwrap();

        // Bounded growth.
        assert!(results.vocab.len() <= target);

        // Merge correctness.
        try_validate_merge_table(&results.vocab, &results.merges).unwrap();
        for rule in results.merges.iter() {
            let (a, b) = rule.pair;
            assert_eq!(
                results.vocab.get_bytes(rule.result).unwrap(),
                [
                    results.vocab.get_bytes(a).unwrap(),
                    results.vocab.get_bytes(b).unwrap()
                ]
                .concat()
            );
        }

        // Result ids are strictly increasing.
        for w in results.merges.rules().windows(2) {
            assert!(w[0].result < w[1].result);
        }

        // Dedup invariant.
        let unique: CommonHashSet<&[u8]> = results
            .vocab
            .tokens()
            .iter()
            .map(|t| t.bytes.as_slice())
            .collect();
        assert_eq!(unique.len(), results.vocab.len());
    }

    #[test]
    fn test_deterministic() {
        let corpus = "తెలుగు భాష దేశ భాషలందు లెస్స ".repeat(4);
        let base: Vocabulary<u32> = VocabularyBuilder::new()
            .with_script(SeedScript::Telugu)
            .build()
            .unwrap();

        let train = || {
            MergeTrainerOptions::new(420)
                .init()
                .train(&corpus, base.clone())
                .unwrap()
        };

        let first = train();
        let second = train();
        assert_eq!(first.vocab, second.vocab);
        assert_eq!(first.merges, second.merges);
    }
}
