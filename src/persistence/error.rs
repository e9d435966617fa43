//! Persistence layer error types

use thiserror::Error;

/// Errors that can occur while loading or saving templates
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the backing file failed
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored document could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PersistenceError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;
