use connectors::{file::jsonl::error::FileError, sql::error::DbError};
use thiserror::Error;

/// Fatal errors that end a load run.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading the input stream failed.
    #[error("Input error: {0}")]
    Input(#[from] FileError),

    /// Db error.
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}
