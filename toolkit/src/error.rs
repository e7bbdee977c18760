use thiserror::Error;

/// The error taxonomy shared by every crate in the workspace.
///
/// Every public operation (`catalogue`, `tfidf`, `normalize`, `kmeans`, ...)
/// surfaces exactly one of these kinds from its outermost call; there is no
/// local recovery beyond the warnings documented on the individual
/// operations (non-numeric ARFF attribute, empty-cluster retention, lazy
/// reducer-view init).
#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),

    #[error("invariant violated: {0}")]
    Invariant(String),

    #[error("empty input: {0}")]
    EmptyInput(String),

    #[error("cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn resource_exhausted(message: impl Into<String>) -> Self {
        Self::ResourceExhausted(message.into())
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant(message.into())
    }

    pub fn empty_input(message: impl Into<String>) -> Self {
        Self::EmptyInput(message.into())
    }

    /// Exit code used by the `asapcat-cli` binary: 0 is reserved for success.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
