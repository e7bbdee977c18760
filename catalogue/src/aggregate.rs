use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use asapcat_toolkit::Error;
use asapcat_wordbank::{assign_ids, AppearCount, PathList, WordBank, WordList, WordMap};
use rayon::prelude::*;

use crate::document::build_document;

/// Checked at file boundaries only, never mid-file: a cancelled run leaves
/// whatever documents had already started their tokenisation pass intact,
/// rather than tearing one in half.
#[derive(Debug, Default)]
pub struct CancellationToken(AtomicBool);

impl CancellationToken {
    pub fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The result of a full catalogue build: the global document-frequency
/// aggregate (with ids assigned), the per-document term lists in file-list
/// order, and the file listing itself.
pub struct Catalogue {
    pub aggregate: WordMap<AppearCount>,
    pub per_document: Vec<WordList<usize>>,
    pub files: PathList,
}

/// Builds a catalogue from `files`: one document pass per file (in
/// parallel), reduced into a single document-frequency aggregate with ids
/// assigned in alphabetical order.
///
/// A file I/O error or a cancellation request aborts the whole build — there
/// is no partial-success result.
pub fn build_catalogue(
    files: PathList,
    n: usize,
    chunk_size: usize,
    cancel: Option<&CancellationToken>,
) -> Result<Catalogue, Error> {
    let paths: Vec<PathBuf> = files.iter().cloned().collect();

    let per_document: Vec<WordList<usize>> = paths
        .par_iter()
        .map(|path| -> Result<WordList<usize>, Error> {
            if cancel.map(CancellationToken::is_cancelled).unwrap_or(false) {
                return Err(Error::Cancelled);
            }
            build_document(path, n, chunk_size)
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Each rayon worker accumulates its own slice of documents into a
    // thread-local aggregate; `reduce` then merges those pairwise. This
    // mirrors the upstream catalogue builder's reducer hyperobject, which
    // likewise gives every worker its own local map and only merges at join
    // points.
    let aggregate = per_document
        .par_iter()
        .fold(
            || Ok(WordMap::<AppearCount>::new(WordBank::managed())),
            |acc: Result<WordMap<AppearCount>, Error>, doc| {
                let mut acc = acc?;
                acc.count_presence(doc)?;
                Ok(acc)
            },
        )
        .reduce(
            || Ok(WordMap::<AppearCount>::new(WordBank::managed())),
            |a, b| {
                let mut a = a?;
                let b = b?;
                a.reduce(b);
                Ok(a)
            },
        )?;

    let mut aggregate = aggregate;
    assign_ids(&mut aggregate);

    Ok(Catalogue {
        aggregate,
        per_document,
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn builds_document_frequency_across_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "apple banana apple").unwrap();
        fs::write(dir.path().join("b.txt"), "banana cherry").unwrap();
        fs::write(dir.path().join("c.txt"), "apple cherry cherry").unwrap();

        let files = crate::listing::list_directory(dir.path()).unwrap();
        let catalogue = build_catalogue(files, 1, 0, None).unwrap();

        assert_eq!(catalogue.per_document.len(), 3);
        let (_, apple_df) = catalogue.aggregate.find(b"APPLE").unwrap();
        assert_eq!(apple_df.doc_frequency, 2);
        let (_, cherry_df) = catalogue.aggregate.find(b"CHERRY").unwrap();
        assert_eq!(cherry_df.doc_frequency, 2);
        let (_, banana_df) = catalogue.aggregate.find(b"BANANA").unwrap();
        assert_eq!(banana_df.doc_frequency, 2);
    }

    #[test]
    fn assigns_ids_in_alphabetical_order_across_the_whole_catalogue() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "zebra apple mango").unwrap();

        let files = crate::listing::list_directory(dir.path()).unwrap();
        let catalogue = build_catalogue(files, 1, 0, None).unwrap();

        let mut by_id = catalogue.aggregate.iter().collect::<Vec<_>>();
        by_id.sort_by_key(|(_, v)| v.id);
        let words: Vec<&[u8]> = by_id
            .iter()
            .map(|(h, _)| catalogue.aggregate.resolve(*h))
            .collect();
        assert_eq!(words, vec![b"APPLE".as_slice(), b"MANGO".as_slice(), b"ZEBRA".as_slice()]);
    }

    #[test]
    fn cancellation_aborts_the_whole_build() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "apple").unwrap();

        let files = crate::listing::list_directory(dir.path()).unwrap();
        let token = CancellationToken::new();
        token.cancel();
        assert!(build_catalogue(files, 1, 0, Some(&token)).is_err());
    }
}
