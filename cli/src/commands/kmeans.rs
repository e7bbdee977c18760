use std::io::Write;

use asapcat_arff::{read, write, Mode};
use asapcat_kmeans::{cluster, KMeansResult};
use asapcat_toolkit::Error;
use asapcat_vectors::{DataSet, DenseVectorSet, VectorSetKind};
use asapcat_wordbank::{WordBank, WordList};
use rand::rngs::ThreadRng;

use crate::args::KmeansArgs;
use crate::error::CliError;
use crate::output::{open_output, read_input};

pub fn run(args: &KmeansArgs) -> Result<(), CliError> {
    if args.clusters == 0 {
        return Err(Error::invalid_argument("-c must be greater than zero").into());
    }

    let text = read_input(&args.input)?;
    let data_set = read(&text, Mode::Arff)?;

    if !args.force_dense {
        log::debug!("k-means centres are always stored densely, regardless of -d");
    }

    let mut rng = rand::thread_rng();
    let mut best: Option<KMeansResult> = None;
    for attempt in 0..args.restarts.max(1) {
        let result = run_once(&data_set, args.clusters, args.max_iters, &mut rng)?;
        log::info!(
            "restart {attempt}: {} iterations, state {:?}, within-cluster SSE {:.6}",
            result.num_iterations,
            result.state,
            result.within_sse
        );
        if best.as_ref().map_or(true, |b| result.within_sse < b.within_sse) {
            best = Some(result);
        }
    }
    let result = best.expect("restarts.max(1) always runs at least once");

    let mut centres = DenseVectorSet::new(result.centres.k(), result.centres.dim());
    for c in 0..result.centres.k() {
        let row = centres.emplace_back()?;
        centres.row_mut(row).copy_from_slice(result.centres.centre(c));
    }

    let columns = clone_columns(data_set.columns())?;
    let centre_set = DataSet::new("kmeans_centres", columns, None, VectorSetKind::Dense(centres), false)?;

    let text = write(&centre_set, Mode::Arff);
    let mut out = open_output(&args.output)?;
    out.write_all(text.as_bytes())?;
    Ok(())
}

fn run_once(
    data_set: &DataSet,
    clusters: usize,
    max_iters: usize,
    rng: &mut ThreadRng,
) -> Result<KMeansResult, CliError> {
    match data_set.vectors() {
        VectorSetKind::Dense(d) => {
            let points: Vec<asapcat_vectors::DenseVector> =
                d.rows().map(|row| asapcat_vectors::DenseVector::from_values(row.to_vec())).collect();
            Ok(cluster(&points, clusters, max_iters, rng)?)
        }
        VectorSetKind::Sparse(s) => {
            let points: Vec<asapcat_vectors::SparseVector> = (0..s.len()).map(|r| s.row_vector(r)).collect();
            Ok(cluster(&points, clusters, max_iters, rng)?)
        }
    }
}

/// `DataSet::new` takes ownership of its column index, so a dataset built
/// from another dataset's columns (here: centres reusing the input's
/// attribute names) needs its own copy rather than borrowing one.
fn clone_columns(columns: &WordList<()>) -> Result<WordList<()>, CliError> {
    let mut bank = WordBank::managed();
    let mut handles = Vec::with_capacity(columns.size());
    for (handle, _) in columns.iter() {
        handles.push(bank.store(columns.resolve(handle))?);
    }
    let mut list = WordList::new(bank);
    for handle in handles {
        list.push(handle, ());
    }
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn clusters_two_well_separated_groups_into_two_dense_centre_rows() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("in.arff");
        fs::write(
            &input_path,
            "@relation points\n\
             @attribute x numeric\n\
             @attribute y numeric\n\
             @data\n\
             0, 0\n\
             0, 1\n\
             1, 0\n\
             100, 100\n\
             100, 101\n\
             101, 100\n",
        )
        .unwrap();
        let out_path = dir.path().join("out.arff");

        let args = KmeansArgs {
            input: input_path,
            output: out_path.to_string_lossy().into_owned(),
            clusters: 2,
            max_iters: 0,
            restarts: 2,
            force_dense: false,
        };
        run(&args).unwrap();

        let ds = read(&fs::read_to_string(&out_path).unwrap(), Mode::Arff).unwrap();
        assert_eq!(ds.num_rows(), 2);
        assert_eq!(ds.num_columns(), 2);
    }

    #[test]
    fn rejects_zero_clusters() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("in.arff");
        fs::write(
            &input_path,
            "@relation points\n@attribute x numeric\n@data\n1\n",
        )
        .unwrap();

        let args = KmeansArgs {
            input: input_path,
            output: "-".to_string(),
            clusters: 0,
            max_iters: 0,
            restarts: 1,
            force_dense: false,
        };
        assert!(run(&args).is_err());
    }
}
