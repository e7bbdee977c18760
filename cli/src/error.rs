use thiserror::Error;

/// Folds every collaborator's error type into the single value `main`
/// reports, so the binary's exit-code contract stays one line.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] asapcat_toolkit::Error),

    #[error(transparent)]
    Arff(#[from] asapcat_arff::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        1
    }
}
