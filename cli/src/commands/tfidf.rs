use std::cmp::Ordering;
use std::io::Write;
use std::path::PathBuf;

use asapcat_arff::{write, Mode};
use asapcat_catalogue::{build_catalogue, list_directory};
use asapcat_tfidf::{project_document_major, project_in_place, project_term_major};
use asapcat_wordbank::WordList;

use crate::args::TfidfArgs;
use crate::error::CliError;
use crate::output::open_output;

pub fn run(args: &TfidfArgs) -> Result<(), CliError> {
    let files = list_directory(&args.input)?;
    let catalogue = build_catalogue(files, 1, 0, None)?;

    if args.use_map {
        log::info!(
            "-m requested an intermediate-map build; this crate's builders already \
             aggregate through a WordMap internally, so the result is identical"
        );
    }

    // `-w` forces term-major regardless of `-a`; otherwise `-a` picks the variant.
    let variant = if args.term_major { "u" } else { args.algorithm.as_str() };

    if variant == "h" {
        let rows = project_in_place(catalogue)?;
        return write_in_place(&args.output, rows, args.sort);
    }

    if args.sort {
        log::debug!("-s has no effect on ARFF output: rows and columns are already in stable id order");
    }

    let data_set = if variant == "u" {
        project_term_major(&catalogue)?
    } else {
        project_document_major(&catalogue)?
    };

    let text = write(&data_set, Mode::Arff);
    let mut out = open_output(&args.output)?;
    out.write_all(text.as_bytes())?;
    Ok(())
}

fn write_in_place(
    output: &str,
    rows: Vec<(PathBuf, WordList<f64>)>,
    sort: bool,
) -> Result<(), CliError> {
    let mut out = open_output(output)?;
    for (path, terms) in rows {
        let mut pairs: Vec<(String, f64)> = terms
            .iter()
            .map(|(handle, &weight)| (String::from_utf8_lossy(terms.resolve(handle)).into_owned(), weight))
            .collect();
        if sort {
            pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        } else {
            pairs.sort_by(|a, b| a.0.cmp(&b.0));
        }
        writeln!(out, "% {}", path.display())?;
        for (term, weight) in pairs {
            writeln!(out, "{term}\t{weight}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn base_args(dir: &std::path::Path, output: &std::path::Path) -> TfidfArgs {
        TfidfArgs {
            input: dir.to_path_buf(),
            output: output.to_string_lossy().into_owned(),
            sort: false,
            term_major: false,
            algorithm: "s".to_string(),
            use_map: false,
        }
    }

    #[test]
    fn document_major_variant_writes_a_readable_arff_document() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "apple banana").unwrap();
        fs::write(dir.path().join("b.txt"), "apple cherry").unwrap();
        let out_path = dir.path().join("out.arff");

        run(&base_args(dir.path(), &out_path)).unwrap();

        let text = fs::read_to_string(&out_path).unwrap();
        assert!(text.contains("@relation"));
        assert!(text.contains("@attribute"));
        assert!(text.contains("@data"));
    }

    #[test]
    fn all_hash_variant_writes_one_block_per_document() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "apple banana").unwrap();
        let out_path = dir.path().join("out.txt");

        let mut args = base_args(dir.path(), &out_path);
        args.algorithm = "h".to_string();
        run(&args).unwrap();

        let text = fs::read_to_string(&out_path).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with('%')).count(), 1);
        assert!(text.contains("APPLE"));
    }
}
