use thiserror::Error;

/// All errors coming from the store layer. Every variant is fatal to a run.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Failed to open database '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Database '{0}' is read-only")]
    ReadOnly(String),

    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("Failed to prepare table '{table}': {source}")]
    TableSetup {
        table: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to insert row into '{table}': {source}")]
    Insert {
        table: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to commit batch {batch} on '{table}': {source}")]
    Commit {
        table: String,
        batch: u64,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to roll back transaction on '{table}': {source}")]
    Rollback {
        table: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to close database: {0}")]
    Close(#[source] rusqlite::Error),

    #[error("Row has {found} values but the table has {expected} columns")]
    RowWidth { expected: usize, found: usize },

    #[error("Writer is {found}, expected {expected}")]
    InvalidState {
        expected: &'static str,
        found: &'static str,
    },
}
