use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Empty vocabulary: no document contains an indexable term")]
    EmptyVocabulary,

    #[error("Vectorizer is not fitted")]
    NotFitted,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
