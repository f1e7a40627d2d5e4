use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("vocabulary not found: {0}")]
    VocabularyNotFound(PathBuf),

    #[error("vocabulary '{0}' has no words")]
    EmptyVocabulary(String),
}

pub type Result<T> = std::result::Result<T, Error>;
