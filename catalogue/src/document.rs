use std::fs;
use std::path::Path;
use std::sync::Arc;

use asapcat_toolkit::Error;
use asapcat_tokenizer::{tokenize_ngrams, uppercase_ascii_in_place, WordScanner};
use asapcat_wordbank::{WordBank, WordList, WordMap};

/// Tokenises a single file into a per-document term-frequency list.
///
/// `n <= 1` builds a plain word catalogue; `n > 1` builds an n-gram
/// catalogue, joining an n-gram's constituent words with `#` (a byte that
/// can never appear inside an extracted `[A-Z']` word) into a single key.
pub fn build_document(path: &Path, n: usize, chunk_size: usize) -> Result<WordList<usize>, Error> {
    let mut data = fs::read(path).map_err(|e| annotate(Error::from(e), path))?;

    if n <= 1 {
        build_word_document(&mut data)
    } else {
        build_ngram_document(&mut data, n, chunk_size)
    }
}

/// Case-folds the whole file once, then enregisters it as a single shared
/// chunk: every word handle is interned at its offset in that chunk with
/// [`WordMap::entry_preallocated`], so the arena never copies a word out of
/// the file bytes it was read from. Chunking the file never changes which
/// words come out (boundaries always land on whitespace), so unlike the
/// n-gram path there is no per-chunk window to reset and `chunk_size` does
/// not apply here.
fn build_word_document(data: &mut Vec<u8>) -> Result<WordList<usize>, Error> {
    uppercase_ascii_in_place(data);
    let bytes: Arc<[u8]> = Arc::from(std::mem::take(data).into_boxed_slice());

    let mut bank = WordBank::pre_allocated();
    let chunk = bank.enregister(Arc::clone(&bytes));
    let mut map: WordMap<usize> = WordMap::new(bank);

    let base = bytes.as_ptr() as usize;
    for word in WordScanner::new(&bytes) {
        let start = (word.as_ptr() as usize - base) as u32;
        let (_, count) = map.entry_preallocated(word, chunk, start, 0);
        *count += 1;
    }

    Ok(map.into_list())
}

/// N-gram keys are synthesised by joining constituent words with `#`, so
/// unlike a plain word they never correspond to a contiguous run of file
/// bytes — there is nothing to enregister them against, and they are
/// interned into a managed bank by copy as before.
fn build_ngram_document(data: &mut [u8], n: usize, chunk_size: usize) -> Result<WordList<usize>, Error> {
    let mut map: WordMap<usize> = WordMap::new(WordBank::managed());
    let mut first_err: Option<Error> = None;

    tokenize_ngrams(data, n, default_chunk_size(chunk_size), |_hash, words| {
        if first_err.is_some() {
            return;
        }
        let joined = join_ngram(words);
        match map.entry(&joined, 0) {
            Ok((_, count)) => *count += 1,
            Err(e) => first_err = Some(e),
        }
    });

    if let Some(e) = first_err {
        return Err(e);
    }
    Ok(map.into_list())
}

fn default_chunk_size(chunk_size: usize) -> usize {
    if chunk_size == 0 {
        asapcat_tokenizer::DEFAULT_CHUNK_SIZE
    } else {
        chunk_size
    }
}

fn annotate(e: Error, path: &Path) -> Error {
    match e {
        Error::Io(io) => Error::Io(std::io::Error::new(
            io.kind(),
            format!("{}: {io}", path.display()),
        )),
        other => other,
    }
}

fn join_ngram(words: &[&[u8]]) -> Vec<u8> {
    let mut joined = Vec::with_capacity(words.iter().map(|w| w.len() + 1).sum());
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            joined.push(b'#');
        }
        joined.extend_from_slice(word);
    }
    joined
}
