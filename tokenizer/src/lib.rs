//Copyright 2024 Felix Engl
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.

//! Byte-level tokenisation (C6): chunk splitting, case-folding, `[A-Z']`
//! word extraction, and n-gram hashing.

pub mod chunk;
pub mod ngram;
pub mod scan;

pub use chunk::chunk_boundaries;
pub use ngram::{fnv1a, fnv1a_append, hash_words, NgramWindow, DEFAULT_N};
pub use scan::{uppercase_ascii_in_place, WordScanner};

/// Default chunk size for splitting a file before tokenising it: 1 MiB,
/// matching the upstream catalogue builder.
pub const DEFAULT_CHUNK_SIZE: usize = 1 << 20;

/// Walks `data` chunk by chunk, folding case and extracting words, and
/// invokes `on_word` for each one in document order. Mutates `data` in
/// place (uppercasing it) as it goes.
pub fn tokenize_words(data: &mut [u8], chunk_size: usize, mut on_word: impl FnMut(&[u8])) {
    for (start, end) in chunk::chunk_boundaries(data, chunk_size) {
        let piece = &mut data[start..end];
        scan::uppercase_ascii_in_place(piece);
        for word in scan::WordScanner::new(piece) {
            on_word(word);
        }
    }
}

/// Like [`tokenize_words`], but slides an n-gram window of width `n` over
/// the word stream and invokes `on_ngram` with each n-gram's combined hash
/// and its constituent words once the window has filled.
pub fn tokenize_ngrams(
    data: &mut [u8],
    n: usize,
    chunk_size: usize,
    mut on_ngram: impl FnMut(u64, &[&[u8]]),
) {
    for (start, end) in chunk::chunk_boundaries(data, chunk_size) {
        let piece = &mut data[start..end];
        scan::uppercase_ascii_in_place(piece);
        let mut window = ngram::NgramWindow::new(n);
        for word in scan::WordScanner::new(piece) {
            if let Some(ng) = window.push(word) {
                let hash = ngram::hash_words(&ng);
                on_ngram(hash, &ng);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_words_extracts_expected_words() {
        let mut data = b"The quick brown fox jumps over the lazy dog.".to_vec();
        let mut words = Vec::new();
        tokenize_words(&mut data, DEFAULT_CHUNK_SIZE, |w| words.push(w.to_vec()));
        assert_eq!(words.len(), 9);
        assert_eq!(words[0], b"THE");
        assert_eq!(words.last().unwrap(), b"DOG");
    }

    #[test]
    fn tokenize_ngrams_emits_one_ngram_per_word_after_the_first_n_minus_one() {
        let mut data = b"alpha beta gamma delta".to_vec();
        let mut ngrams = Vec::new();
        tokenize_ngrams(&mut data, 2, DEFAULT_CHUNK_SIZE, |hash, words| {
            ngrams.push((hash, words.iter().map(|w| w.to_vec()).collect::<Vec<_>>()));
        });
        assert_eq!(ngrams.len(), 3);
        assert_eq!(ngrams[0].1, vec![b"ALPHA".to_vec(), b"BETA".to_vec()]);
        assert_eq!(ngrams[2].1, vec![b"GAMMA".to_vec(), b"DELTA".to_vec()]);
    }

    #[test]
    fn tokenize_ngrams_window_resets_at_each_chunk() {
        // A chunk boundary starts a fresh n-gram window, same as the
        // upstream per-chunk catalogue builder: a chunk sized so each
        // chunk covers exactly one word never accumulates enough words to
        // emit a 3-gram.
        let mut data = b"aaaa bbbb cccc dddd".to_vec();
        let mut ngrams = Vec::new();
        tokenize_ngrams(&mut data, 3, 3, |hash, words| {
            ngrams.push((hash, words.iter().map(|w| w.to_vec()).collect::<Vec<_>>()));
        });
        assert!(ngrams.is_empty());
    }

    #[test]
    fn small_chunk_size_never_truncates_a_word() {
        let mut data = b"aaaa bbbb cccc dddd".to_vec();
        let mut words = Vec::new();
        tokenize_words(&mut data, 3, |w| words.push(w.to_vec()));
        assert_eq!(
            words,
            vec![b"AAAA".to_vec(), b"BBBB".to_vec(), b"CCCC".to_vec(), b"DDDD".to_vec()]
        );
    }
}
