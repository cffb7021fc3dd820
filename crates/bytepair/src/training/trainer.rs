//! # Trainer

use crate::errors::{BpeError, BpeResult};
use crate::heap::PairHeap;
use crate::text::Segmenter;
use crate::training::pair_index::PairIndex;
use crate::training::word_store::Word;
use crate::types::{CommonHashMap, CommonHashSet, Count, Pair, TokenId, BYTE_ALPHABET_SIZE};
use std::path::Path;

/// The outcome of a training run: an ordered merge-rule list.
///
/// Position in the list is the new token ID minus 256: the rule at index 0
/// introduced token 256, the rule at index 1 introduced token 257, and so on.
#[derive(Debug, Clone, Default)]
pub struct TrainedModel {
    /// Learned merges, in the order they were applied.
    pub merge_rules: Vec<Pair>,

    /// Token ID `->` byte-string table, present only when debug tracking was requested.
    pub debug_vocab: Option<CommonHashMap<TokenId, Vec<u8>>>,
}

impl TrainedModel {
    /// The size of the vocabulary this model produces: 256 plus the merges learned.
    pub fn vocab_size(&self) -> usize {
        BYTE_ALPHABET_SIZE + self.merge_rules.len()
    }
}

/// Trains a BPE vocabulary by incrementally merging the most frequent byte pair.
///
/// `Trainer` owns no long-lived corpus state between calls: each `train_*`
/// call takes a fresh word/frequency table, builds the heap and inverted
/// index, runs the merge loop to completion, and returns. It is not `Sync`
/// by convention, not by type: nothing in this API hands out `&mut self`
/// to more than one caller.
pub struct Trainer {
    vocab_size: usize,
    segmenter: Segmenter,
}

impl Trainer {
    /// Create a trainer targeting `vocab_size`, using the default GPT-2-style segmenter.
    ///
    /// # Errors
    /// Returns [`BpeError::VocabSizeTooSmall`] if `vocab_size < 256`.
    pub fn new(vocab_size: usize) -> BpeResult<Self> {
        Self::with_segmenter(vocab_size, Segmenter::gpt2())
    }

    /// Create a trainer targeting `vocab_size`, using a custom word segmenter.
    ///
    /// # Errors
    /// Returns [`BpeError::VocabSizeTooSmall`] if `vocab_size < 256`.
    pub fn with_segmenter(
        vocab_size: usize,
        segmenter: Segmenter,
    ) -> BpeResult<Self> {
        if vocab_size < BYTE_ALPHABET_SIZE {
            return Err(BpeError::VocabSizeTooSmall { size: vocab_size });
        }
        Ok(Self {
            vocab_size,
            segmenter,
        })
    }

    /// Train from an iterator of pre-tokenized text samples.
    ///
    /// Mirrors `BPELearner::Learn(vocabSize, textChunks)` in the reference
    /// implementation: each sample is segmented into words, which are
    /// counted and merged in place.
    pub fn train_from_samples<I, S>(
        &self,
        samples: I,
    ) -> TrainedModel
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut word_counts: CommonHashMap<String, Count> = CommonHashMap::default();
        for sample in samples {
            for word in self.segmenter.segment(sample.as_ref()) {
                *word_counts.entry(word.to_string()).or_default() += 1;
            }
        }
        self.train_from_word_counts(word_counts)
    }

    /// Train from a corpus file, memory-mapped and partitioned for parallel word counting.
    ///
    /// Mirrors `BPELearner::Learn(vocabSize, inputFileName)`.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be opened or mapped.
    pub fn train_from_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> std::io::Result<TrainedModel> {
        let word_counts = crate::text::count_words_in_file(path, &self.segmenter)?;
        Ok(self.train_from_word_counts(word_counts))
    }

    fn train_from_word_counts(
        &self,
        word_counts: CommonHashMap<String, Count>,
    ) -> TrainedModel {
        self.run(word_counts, false)
    }

    /// Train, additionally tracking a token ID `->` byte-string debug vocabulary.
    ///
    /// This doubles the trainer's allocation traffic (every merge appends a
    /// concatenated byte string) and is meant for inspection/debugging, not
    /// production training runs — callers who don't need it should use
    /// [`Trainer::train_from_samples`] or [`Trainer::train_from_path`] instead.
    pub fn train_from_samples_with_debug_vocab<I, S>(
        &self,
        samples: I,
    ) -> TrainedModel
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut word_counts: CommonHashMap<String, Count> = CommonHashMap::default();
        for sample in samples {
            for word in self.segmenter.segment(sample.as_ref()) {
                *word_counts.entry(word.to_string()).or_default() += 1;
            }
        }
        self.run(word_counts, true)
    }

    fn run(
        &self,
        word_counts: CommonHashMap<String, Count>,
        track_debug_vocab: bool,
    ) -> TrainedModel {
        let num_merges = self.vocab_size - BYTE_ALPHABET_SIZE;

        log::info!(
            "starting BPE training: {} merges targeted, {} distinct words",
            num_merges,
            word_counts.len()
        );

        let (mut words, frequencies): (Vec<Word>, Vec<Count>) = word_counts
            .iter()
            .map(|(text, &count)| (Word::from_str(text), count))
            .unzip();

        let PairIndex {
            pair_counts,
            pair_index,
        } = PairIndex::from_words(&words, &frequencies);

        let mut debug_vocab = track_debug_vocab.then(|| {
            let mut table: CommonHashMap<TokenId, Vec<u8>> = CommonHashMap::default();
            for byte in 0..BYTE_ALPHABET_SIZE {
                table.insert(byte as TokenId, vec![byte as u8]);
            }
            table
        });

        // The heap is the sole authority on live counts from here on;
        // `pair_counts` was only needed to seed it.
        let mut heap = PairHeap::with_capacity(pair_counts.len());
        for (pair, count) in pair_counts {
            heap.upsert(pair, count as i64);
        }

        let mut pair_words = pair_index;
        let mut merge_rules = Vec::with_capacity(num_merges);
        let mut next_token = BYTE_ALPHABET_SIZE as TokenId;

        while merge_rules.len() < num_merges {
            let Some((pair, count)) = heap.extract_top() else {
                log::info!("no pairs remain; stopping early at {} merges", merge_rules.len());
                break;
            };

            if count == 0 {
                break;
            }

            let new_token = next_token;
            next_token += 1;

            if let Some(table) = debug_vocab.as_mut() {
                let mut span = table.get(&pair.0).cloned().unwrap_or_default();
                span.extend(table.get(&pair.1).cloned().unwrap_or_default());
                table.insert(new_token, span);
            }

            merge_rules.push(pair);

            let word_indices = pair_words.remove(&pair).unwrap_or_default();
            let mut newly_touched: CommonHashMap<Pair, CommonHashSet<usize>> = CommonHashMap::default();

            for &word_idx in &word_indices {
                words[word_idx].merge_pair_cb(pair, new_token, &mut |delta_pair, delta| {
                    heap.upsert(delta_pair, delta as i64 * frequencies[word_idx] as i64);

                    if delta > 0 {
                        newly_touched
                            .entry(delta_pair)
                            .or_default()
                            .insert(word_idx);
                    }
                });
            }

            for (pair, indices) in newly_touched {
                pair_words.entry(pair).or_default().extend(indices);
            }
        }

        log::info!("finished training: {} merges completed", merge_rules.len());

        TrainedModel {
            merge_rules,
            debug_vocab,
        }
    }
}
