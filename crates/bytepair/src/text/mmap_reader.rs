//! # Memory-Mapped Corpus Reader
//!
//! Counts words across a large training file without reading it into
//! process memory up front: the file is `mmap`ed, split into roughly equal
//! byte ranges aligned to line boundaries, and each range is segmented and
//! counted independently. Splitting on line boundaries rather than word
//! boundaries means no cross-thread coordination is needed while scanning:
//! each thread's range is self-contained UTF-8 text.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::text::segmenter::Segmenter;
use crate::types::CommonHashMap;

/// Number of line-aligned partitions to split the corpus into.
///
/// With the `rayon` feature enabled, each partition is counted on its own
/// worker thread; the count only bounds parallelism, not correctness.
const DEFAULT_PARTITIONS: usize = 4;

/// Find the first `\n` at or after `from`, or the end of `data`.
///
/// Mirrors the reference reader's line-boundary search: a partition's end is
/// never allowed to fall inside a line, so no word is ever split across two
/// partitions.
fn line_end(
    data: &[u8],
    from: usize,
) -> usize {
    if from >= data.len() {
        return data.len();
    }
    match data[from..].iter().position(|&b| b == b'\n') {
        Some(offset) => from + offset + 1,
        None => data.len(),
    }
}

/// Compute `partitions` line-aligned `[start, end)` byte ranges covering `data`.
fn partition_ranges(
    data: &[u8],
    partitions: usize,
) -> Vec<(usize, usize)> {
    if data.is_empty() || partitions == 0 {
        return Vec::new();
    }

    let target_len = data.len() / partitions;
    let mut ranges = Vec::with_capacity(partitions);

    let mut start = 0;
    while start < data.len() {
        let end = line_end(data, start + target_len);
        if end <= start {
            ranges.push((start, data.len()));
            break;
        }
        ranges.push((start, end));
        start = end;
    }

    ranges
}

fn count_range(
    data: &[u8],
    range: (usize, usize),
    segmenter: &Segmenter,
) -> CommonHashMap<String, u32> {
    let text = std::str::from_utf8(&data[range.0..range.1])
        .expect("corpus partition boundary split a UTF-8 code point");

    let mut counts: CommonHashMap<String, u32> = CommonHashMap::default();
    for word in segmenter.segment(text) {
        *counts.entry(word.to_string()).or_default() += 1;
    }
    counts
}

fn merge_counts(
    into: &mut CommonHashMap<String, u32>,
    from: CommonHashMap<String, u32>,
) {
    for (word, count) in from {
        *into.entry(word).or_default() += count;
    }
}

/// Count word occurrences across a file, memory-mapping it and partitioning
/// the scan across line-aligned byte ranges.
///
/// # Errors
/// Returns an I/O error if the file cannot be opened or mapped.
pub fn count_words_in_file<P: AsRef<Path>>(
    path: P,
    segmenter: &Segmenter,
) -> std::io::Result<CommonHashMap<String, u32>> {
    let file = File::open(path)?;

    // SAFETY: the mapped file is treated as read-only for the duration of
    // this call; concurrent external mutation of the file is the caller's
    // responsibility, as with any `mmap`-based reader.
    let mmap = unsafe { Mmap::map(&file)? };

    Ok(count_words_in_bytes(&mmap, segmenter))
}

/// Count word occurrences across an in-memory byte buffer, using the same
/// partitioning strategy as [`count_words_in_file`].
pub fn count_words_in_bytes(
    data: &[u8],
    segmenter: &Segmenter,
) -> CommonHashMap<String, u32> {
    let ranges = partition_ranges(data, DEFAULT_PARTITIONS);

    #[cfg(feature = "rayon")]
    let partial_counts: Vec<CommonHashMap<String, u32>> = {
        use rayon::prelude::*;
        ranges
            .into_par_iter()
            .map(|range| count_range(data, range, segmenter))
            .collect()
    };

    #[cfg(not(feature = "rayon"))]
    let partial_counts: Vec<CommonHashMap<String, u32>> = ranges
        .into_iter()
        .map(|range| count_range(data, range, segmenter))
        .collect();

    let mut total: CommonHashMap<String, u32> = CommonHashMap::default();
    for counts in partial_counts {
        merge_counts(&mut total, counts);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_end_finds_newline() {
        let data = b"abc\ndef\n";
        assert_eq!(line_end(data, 0), 4);
        assert_eq!(line_end(data, 4), 8);
        assert_eq!(line_end(data, 8), 8);
    }

    #[test]
    fn line_end_handles_missing_trailing_newline() {
        let data = b"abc\ndef";
        assert_eq!(line_end(data, 4), 7);
    }

    #[test]
    fn partition_ranges_cover_whole_buffer_without_overlap() {
        let data = b"one two three\nfour five\nsix\nseven eight nine ten\n";
        let ranges = partition_ranges(data, 4);

        assert_eq!(ranges.first().unwrap().0, 0);
        assert_eq!(ranges.last().unwrap().1, data.len());
        for w in ranges.windows(2) {
            assert_eq!(w[0].1, w[1].0);
        }
    }

    #[test]
    fn partition_ranges_never_splits_a_line() {
        let data = b"aaaa\nbbbb\ncccc\ndddd\n";
        let ranges = partition_ranges(data, 3);
        for &(start, end) in &ranges {
            assert!(start == 0 || data[start - 1] == b'\n');
            assert!(end == data.len() || data[end - 1] == b'\n');
        }
    }

    #[test]
    fn counts_words_regardless_of_partition_count() {
        let seg = Segmenter::gpt2();
        let text = "the quick brown fox\njumps over the lazy dog\nthe fox runs\n";

        let counts = count_words_in_bytes(text.as_bytes(), &seg);
        assert_eq!(*counts.get("the").unwrap_or(&0), 1);
        assert_eq!(*counts.get(" the").unwrap_or(&0), 2);
        assert_eq!(*counts.get(" fox").unwrap_or(&0), 2);
    }

    #[test]
    fn empty_buffer_has_no_words() {
        let seg = Segmenter::gpt2();
        let counts = count_words_in_bytes(b"", &seg);
        assert!(counts.is_empty());
    }
}
