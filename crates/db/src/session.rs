//! Request-scoped access to the store.

use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use rusqlite::Transaction;

use crate::{DbError, DbPool};

/// Handle to the store for a single request.
///
/// Extracted from router state, so every request gets its own `Session`.
/// The connection is only checked out inside [`Session::run`] and is back in
/// the pool once `run` returns, whether the work succeeded, failed or panicked.
pub struct Session {
    pool: DbPool,
}

impl Session {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Runs `work` inside one transaction on a blocking worker thread.
    ///
    /// The transaction commits when `work` returns `Ok` and rolls back
    /// otherwise. Consumes the session: one unit of work per request.
    pub async fn run<T, F>(self, work: F) -> Result<T, DbError>
    where
        T: Send + 'static,
        F: FnOnce(&Transaction<'_>) -> rusqlite::Result<T> + Send + 'static,
    {
        let pool = self.pool;
        tokio::task::spawn_blocking(move || -> Result<T, DbError> {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;
            let value = work(&tx)?;
            tx.commit()?;
            Ok(value)
        })
        .await?
    }
}

impl<S> FromRequestParts<S> for Session
where
    DbPool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::new(DbPool::from_ref(state)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pool, DbRuntimeSettings};

    fn single_connection_pool(dir: &tempfile::TempDir) -> DbPool {
        let path = dir.path().join("session.db");
        let pool = create_pool(
            path.to_str().unwrap(),
            DbRuntimeSettings {
                busy_timeout_ms: 1_000,
                pool_max_size: 1,
            },
        )
        .expect("pool should build");
        pool.get()
            .expect("should get a connection")
            .execute_batch("CREATE TABLE note (id INTEGER PRIMARY KEY, body TEXT NOT NULL);")
            .expect("should create table");
        pool
    }

    fn count_notes(pool: &DbPool) -> i64 {
        pool.get()
            .expect("should get a connection")
            .query_row("SELECT COUNT(*) FROM note", [], |row| row.get(0))
            .expect("should count notes")
    }

    #[tokio::test]
    async fn commits_successful_work() {
        let dir = tempfile::tempdir().unwrap();
        let pool = single_connection_pool(&dir);

        let id = Session::new(pool.clone())
            .run(|tx| {
                tx.execute("INSERT INTO note (body) VALUES ('hello')", [])?;
                Ok(tx.last_insert_rowid())
            })
            .await
            .expect("work should succeed");

        assert_eq!(id, 1);
        assert_eq!(count_notes(&pool), 1);
    }

    #[tokio::test]
    async fn rolls_back_failed_work_and_releases_connection() {
        let dir = tempfile::tempdir().unwrap();
        let pool = single_connection_pool(&dir);

        let err = Session::new(pool.clone())
            .run(|tx| {
                tx.execute("INSERT INTO note (body) VALUES ('lost')", [])?;
                tx.execute("INSERT INTO note (body) VALUES (NULL)", [])?;
                Ok(())
            })
            .await
            .expect_err("NOT NULL violation should fail");
        assert!(matches!(err, DbError::Sqlite(_)));

        // Only one connection exists; this would time out if it leaked.
        assert_eq!(count_notes(&pool), 0);
    }

    #[tokio::test]
    async fn panicking_work_releases_connection() {
        let dir = tempfile::tempdir().unwrap();
        let pool = single_connection_pool(&dir);

        let err = Session::new(pool.clone())
            .run(|tx| -> rusqlite::Result<()> {
                tx.execute("INSERT INTO note (body) VALUES ('boom')", [])?;
                panic!("handler bug");
            })
            .await
            .expect_err("panic should surface as an error");
        assert!(matches!(err, DbError::Task(_)));

        let idle = pool.state().idle_connections;
        assert_eq!(idle, 1);
        assert_eq!(count_notes(&pool), 0);
    }
}
