use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] asapcat_toolkit::Error),

    #[error("malformed record: {0}")]
    Parse(String),

    #[error("sparse record is missing its closing bracket")]
    UnterminatedSparseRecord,

    #[error("file has no '@relation' line")]
    MissingRelation,

    #[error("file declares no '@attribute's")]
    MissingAttribute,
}

impl Error {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
