use std::path::PathBuf;

use async_graphql::ErrorExtensions;
use thiserror::Error;

/// Failures while loading or persisting the datastore file.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read datastore `{}`: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to persist datastore `{}`: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed datastore: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl ErrorExtensions for StoreError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| match self {
            StoreError::Write { .. } => e.set("code", "PERSISTENCE"),
            StoreError::Read { .. } | StoreError::Json(_) => e.set("code", "DATASTORE"),
        })
    }
}
