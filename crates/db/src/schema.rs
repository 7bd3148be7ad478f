//! Startup schema bootstrap.
//!
//! Modules contribute `CREATE ... IF NOT EXISTS` statements; they are
//! executed together on every start. There is no version tracking: a table
//! that already exists is left untouched.

use rusqlite::Connection;
use thiserror::Error;

/// A table (or index) definition contributed by a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDef {
    pub name: &'static str,
    /// Idempotent DDL, e.g. `CREATE TABLE IF NOT EXISTS ...`.
    pub ddl: &'static str,
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to create '{name}': {source}")]
    Create {
        name: String,
        source: rusqlite::Error,
    },

    #[error("schema transaction failed: {0}")]
    Transaction(#[from] rusqlite::Error),
}

/// Ensures every definition exists, inside one transaction.
///
/// Returns the number of definitions executed. If any statement fails,
/// nothing is created.
pub fn ensure_schema(conn: &Connection, defs: &[TableDef]) -> Result<usize, SchemaError> {
    let tx = conn.unchecked_transaction()?;

    for def in defs {
        tracing::debug!(table = def.name, "ensuring table exists");
        tx.execute_batch(def.ddl)
            .map_err(|source| SchemaError::Create {
                name: def.name.to_string(),
                source,
            })?;
    }

    tx.commit()?;
    Ok(defs.len())
}
