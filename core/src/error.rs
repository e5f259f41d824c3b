use crate::DocId;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for all sift-core operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage error: {0}")]
    Storage(#[from] sled::Error),

    #[error("posting codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("index metadata error: {0}")]
    Meta(#[from] serde_json::Error),

    #[error("not a valid index: {0}")]
    Corrupt(String),

    #[error("index at {0} is locked by another writer")]
    AlreadyLocked(PathBuf),

    #[error("cannot analyze field {field:?}: {reason}")]
    Analysis { field: String, reason: String },

    #[error("document not found: {0}")]
    DocNotFound(DocId),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for sift-core operations.
pub type Result<T> = std::result::Result<T, Error>;
