use std::collections::HashMap;
use std::io::Write;

use asapcat_catalogue::{build_catalogue, list_directory};

use crate::args::WordcountArgs;
use crate::error::CliError;
use crate::output::open_output;

/// Total occurrence count per term across the whole corpus, summed from the
/// per-document lists rather than read off the aggregate (which tracks
/// document frequency, a different number).
pub fn run(args: &WordcountArgs) -> Result<(), CliError> {
    let files = list_directory(&args.input)?;
    let catalogue = build_catalogue(files, 1, 0, None)?;

    let mut totals: HashMap<Vec<u8>, usize> = HashMap::new();
    for doc in &catalogue.per_document {
        for (handle, &count) in doc.iter() {
            *totals.entry(doc.resolve(handle).to_vec()).or_insert(0) += count;
        }
    }

    let mut counts: Vec<(String, usize)> = totals
        .into_iter()
        .map(|(bytes, count)| (String::from_utf8_lossy(&bytes).into_owned(), count))
        .collect();

    if args.sort_descending {
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    } else {
        counts.sort_by(|a, b| a.0.cmp(&b.0));
    }

    if args.top_n > 0 {
        counts.truncate(args.top_n);
    }

    let mut out = open_output(&args.output)?;
    for (word, count) in counts {
        writeln!(out, "{word}\t{count}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn sorts_by_descending_total_occurrence_count() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "apple apple banana").unwrap();
        fs::write(dir.path().join("b.txt"), "apple cherry").unwrap();
        let out_path = dir.path().join("out.tsv");

        let args = WordcountArgs {
            input: dir.path().to_path_buf(),
            output: out_path.to_string_lossy().into_owned(),
            top_n: 0,
            sort_descending: true,
        };
        run(&args).unwrap();

        let text = fs::read_to_string(&out_path).unwrap();
        let first_line = text.lines().next().unwrap();
        assert_eq!(first_line, "APPLE\t3");
    }

    #[test]
    fn top_n_truncates_the_alphabetical_listing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "zebra mango apple").unwrap();
        let out_path = dir.path().join("out.tsv");

        let args = WordcountArgs {
            input: dir.path().to_path_buf(),
            output: out_path.to_string_lossy().into_owned(),
            top_n: 1,
            sort_descending: false,
        };
        run(&args).unwrap();

        let text = fs::read_to_string(&out_path).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert_eq!(text.lines().next().unwrap(), "APPLE\t1");
    }
}
