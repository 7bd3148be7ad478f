use thiserror::Error;

/// Failure while running a unit of work through a [`crate::Session`].
#[derive(Debug, Error)]
pub enum DbError {
    #[error("failed to check out a database connection: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("database task did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),
}
