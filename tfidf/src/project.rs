use std::path::PathBuf;
use std::sync::Mutex;

use asapcat_catalogue::Catalogue;
use asapcat_toolkit::Error;
use asapcat_vectors::{DataSet, SparseVectorSet, VectorSetKind};
use asapcat_wordbank::{WordBank, WordList};
use rayon::prelude::*;

use crate::weight::tfidf_weight;

/// Builds the column index (vocabulary, in ascending-id order) that every
/// projection variant shares. Copies each word's bytes into a fresh word
/// bank — the aggregate's own bank stays with the aggregate.
fn columns(catalogue: &Catalogue) -> Result<WordList<()>, Error> {
    let mut by_id: Vec<_> = catalogue.aggregate.iter().collect();
    by_id.sort_by_key(|(_, v)| v.id);

    let mut bank = WordBank::managed();
    let mut handles = Vec::with_capacity(by_id.len());
    for (handle, _) in &by_id {
        let bytes = catalogue.aggregate.resolve(*handle).to_vec();
        handles.push(bank.store(&bytes)?);
    }
    let mut list = WordList::new(bank);
    for handle in handles {
        list.push(handle, ());
    }
    Ok(list)
}

fn row_names(catalogue: &Catalogue) -> Vec<String> {
    catalogue.files.iter().map(|p| p.display().to_string()).collect()
}

/// Document-major projection: each document's row is computed independently
/// (in parallel across documents), then committed into the shared vector
/// set one row at a time.
pub fn project_document_major(catalogue: &Catalogue) -> Result<DataSet, Error> {
    let columns = columns(catalogue)?;
    let dim = columns.size();
    let num_docs = catalogue.per_document.len();
    let num_documents = catalogue.files.len();
    let total_nnz: usize = catalogue.per_document.iter().map(|d| d.size()).sum();

    let computed: Vec<Result<Vec<(u32, f64)>, Error>> = catalogue
        .per_document
        .par_iter()
        .map(|doc| {
            let mut row: Vec<(u32, f64)> = doc
                .iter()
                .map(|(handle, &tf)| {
                    let term = doc.resolve(handle);
                    let (_, appear) = catalogue
                        .aggregate
                        .find(term)
                        .ok_or_else(|| Error::invariant("term missing from global aggregate"))?;
                    Ok((appear.id, tfidf_weight(tf, num_documents, appear.doc_frequency)))
                })
                .collect::<Result<Vec<_>, Error>>()?;
            row.sort_unstable_by_key(|(idx, _)| *idx);
            Ok(row)
        })
        .collect();

    let mut vectors = SparseVectorSet::new(num_docs, dim as u32, total_nnz);
    for row_entries in computed {
        let row_entries = row_entries?;
        let row = vectors.emplace_back(row_entries.len())?;
        let (values, indices) = vectors.row_mut(row);
        for (i, (idx, val)) in row_entries.into_iter().enumerate() {
            indices[i] = idx;
            values[i] = val;
        }
    }

    DataSet::new("tfidf", columns, Some(row_names(catalogue)), VectorSetKind::Sparse(vectors), false)
}

/// Term-major projection: every (document, term) pair is flattened into one
/// list and processed in parallel, each entry claiming a slot in its row's
/// mutex-guarded scratch buffer rather than waiting its turn behind the rest
/// of its own document.
pub fn project_term_major(catalogue: &Catalogue) -> Result<DataSet, Error> {
    let columns = columns(catalogue)?;
    let dim = columns.size();
    let num_docs = catalogue.per_document.len();
    let num_documents = catalogue.files.len();
    let total_nnz: usize = catalogue.per_document.iter().map(|d| d.size()).sum();

    let row_scratch: Vec<Mutex<Vec<(u32, f64)>>> = catalogue
        .per_document
        .iter()
        .map(|d| Mutex::new(Vec::with_capacity(d.size())))
        .collect();

    let entries: Vec<(usize, &[u8], usize)> = catalogue
        .per_document
        .iter()
        .enumerate()
        .flat_map(|(row, doc)| doc.iter().map(move |(h, &count)| (row, doc.resolve(h), count)))
        .collect();

    entries
        .par_iter()
        .try_for_each(|&(row, term, tf)| -> Result<(), Error> {
            let (_, appear) = catalogue
                .aggregate
                .find(term)
                .ok_or_else(|| Error::invariant("term missing from global aggregate"))?;
            let weight = tfidf_weight(tf, num_documents, appear.doc_frequency);
            row_scratch[row]
                .lock()
                .expect("row scratch mutex poisoned")
                .push((appear.id, weight));
            Ok(())
        })?;

    let mut vectors = SparseVectorSet::new(num_docs, dim as u32, total_nnz);
    for scratch in row_scratch {
        let mut entries = scratch.into_inner().expect("row scratch mutex poisoned");
        entries.sort_unstable_by_key(|(idx, _)| *idx);
        let row = vectors.emplace_back(entries.len())?;
        let (values, indices) = vectors.row_mut(row);
        for (i, (idx, val)) in entries.into_iter().enumerate() {
            indices[i] = idx;
            values[i] = val;
        }
    }

    DataSet::new("tfidf", columns, Some(row_names(catalogue)), VectorSetKind::Sparse(vectors), false)
}

/// In-place projection: consumes the catalogue and replaces each document's
/// own term counts with TF-IDF weights, reusing that document's existing
/// word bank and handles instead of allocating a separate vector set. Suits
/// callers that only need per-document weighted term lists (e.g. an
/// IMR-style listing) rather than a dense column-indexed matrix.
pub fn project_in_place(catalogue: Catalogue) -> Result<Vec<(PathBuf, WordList<f64>)>, Error> {
    let Catalogue { aggregate, per_document, files } = catalogue;
    let paths: Vec<PathBuf> = files.iter().cloned().collect();
    let num_documents = paths.len();

    per_document
        .into_iter()
        .zip(paths)
        .map(|(doc, path)| -> Result<(PathBuf, WordList<f64>), Error> {
            let mut weights = Vec::with_capacity(doc.size());
            for (handle, &tf) in doc.iter() {
                let term = doc.resolve(handle);
                let (_, appear) = aggregate
                    .find(term)
                    .ok_or_else(|| Error::invariant("term missing from global aggregate"))?;
                weights.push(tfidf_weight(tf, num_documents, appear.doc_frequency));
            }
            let mut weights = weights.into_iter();
            let weighted = doc.map_values(move |_| weights.next().expect("one weight per entry"));
            Ok((path, weighted))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use asapcat_catalogue::build_catalogue;
    use std::fs;

    fn sample_catalogue() -> Catalogue {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "apple banana apple").unwrap();
        fs::write(dir.path().join("b.txt"), "banana cherry").unwrap();
        let files = asapcat_catalogue::list_directory(dir.path()).unwrap();
        build_catalogue(files, 1, 0, None).unwrap()
    }

    fn weight_for(ds: &DataSet, row: usize, col: usize) -> f64 {
        match ds.vectors() {
            VectorSetKind::Sparse(s) => s
                .row_indices(row)
                .iter()
                .zip(s.row_values(row))
                .find(|(&idx, _)| idx as usize == col)
                .map(|(_, &v)| v)
                .unwrap_or(0.0),
            VectorSetKind::Dense(d) => d.row(row)[col],
        }
    }

    #[test]
    fn document_major_and_term_major_agree() {
        let catalogue = sample_catalogue();
        let doc_major = project_document_major(&catalogue).unwrap();
        let term_major = project_term_major(&catalogue).unwrap();

        assert_eq!(doc_major.num_rows(), term_major.num_rows());
        assert_eq!(doc_major.num_columns(), term_major.num_columns());
        for row in 0..doc_major.num_rows() {
            for col in 0..doc_major.num_columns() {
                assert_relative_eq!(
                    weight_for(&doc_major, row, col),
                    weight_for(&term_major, row, col),
                    epsilon = 1e-12
                );
            }
        }
    }

    #[test]
    fn in_place_matches_document_major_per_term() {
        let catalogue = sample_catalogue();
        let doc_major = project_document_major(&catalogue).unwrap();

        let catalogue = sample_catalogue();
        let in_place = project_in_place(catalogue).unwrap();

        for (row, (_, list)) in in_place.iter().enumerate() {
            for (handle, &weight) in list.iter() {
                let term = list.resolve(handle);
                let col = doc_major
                    .columns()
                    .iter()
                    .position(|(h, _)| doc_major.columns().resolve(h) == term)
                    .unwrap();
                assert_relative_eq!(weight, weight_for(&doc_major, row, col), epsilon = 1e-12);
            }
        }
    }
}
