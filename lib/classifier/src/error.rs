use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClassifierError>;

/// Failures that keep the classifier from reaching its ready state
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Failed to fetch dataset from {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Model artifact error: {0}")]
    Artifact(String),

    #[error("Training error: {0}")]
    Training(String),

    #[error("Classifier unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Core(#[from] sift_core::Error),
}

impl From<bincode::Error> for ClassifierError {
    fn from(e: bincode::Error) -> Self {
        ClassifierError::Serialization(e.to_string())
    }
}
