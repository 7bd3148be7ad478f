//! Storage layer for bookshelf.
//!
//! Provides the SQLite connection pool (via `r2d2`), idempotent schema
//! creation from module-contributed table definitions, and the
//! request-scoped [`Session`] handed to HTTP handlers.

mod error;
mod pool;
mod schema;
mod session;

pub use error::DbError;
pub use pool::{create_pool, DbPool, DbRuntimeSettings, PoolError};
pub use schema::{ensure_schema, SchemaError, TableDef};
pub use session::Session;
