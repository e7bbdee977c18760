use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "asapcat",
    version,
    about = "Parallel catalogue, TF-IDF, and K-Means tooling for text corpora"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Count term occurrences across a directory of documents.
    Wordcount(WordcountArgs),
    /// Build a TF-IDF weighted matrix from a directory of documents.
    Tfidf(TfidfArgs),
    /// Cluster the rows of an ARFF/array dataset with K-Means.
    Kmeans(KmeansArgs),
}

#[derive(Args, Debug)]
pub struct WordcountArgs {
    /// Input file or directory.
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Output file, or `-` for stdout.
    #[arg(short = 'o', long = "output", default_value = "-")]
    pub output: String,
    /// Top-N terms to display (0 = all).
    #[arg(short = 'd', long = "display", default_value_t = 0)]
    pub top_n: usize,
    /// Sort by descending count instead of alphabetically.
    #[arg(short = 's', long = "sort")]
    pub sort_descending: bool,
}

#[derive(Args, Debug)]
pub struct TfidfArgs {
    /// Input file or directory.
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Output file, or `-` for stdout.
    #[arg(short = 'o', long = "output", default_value = "-")]
    pub output: String,
    /// Sort output rows by descending weight (only affects `-a h`).
    #[arg(short = 's', long = "sort")]
    pub sort: bool,
    /// Project term-major instead of document-major.
    #[arg(short = 'w', long = "term-major")]
    pub term_major: bool,
    /// Algorithm variant: h(all-hash) / u(nsorted-fast) / s(orted-fast).
    #[arg(short = 'a', long = "algorithm", default_value = "s", value_parser = ["h", "u", "s"])]
    pub algorithm: String,
    /// Use an intermediate map rather than a list while aggregating.
    #[arg(short = 'm', long = "use-map")]
    pub use_map: bool,
}

#[derive(Args, Debug)]
pub struct KmeansArgs {
    /// Input ARFF/array dataset, or `-` for stdin.
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Output file, or `-` for stdout.
    #[arg(short = 'o', long = "output", default_value = "-")]
    pub output: String,
    /// Number of clusters (> 0).
    #[arg(short = 'c', long = "clusters")]
    pub clusters: usize,
    /// Max Lloyd iterations (0 = unlimited).
    #[arg(short = 'm', long = "max-iters", default_value_t = 0)]
    pub max_iters: usize,
    /// Number of restarts; the run with the lowest within-cluster SSE wins.
    #[arg(short = 'r', long = "restarts", default_value_t = 1)]
    pub restarts: usize,
    /// Force dense centre output (centres are already stored densely).
    #[arg(short = 'd', long = "dense")]
    pub force_dense: bool,
}
