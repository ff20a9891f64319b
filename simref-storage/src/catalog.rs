//! Field catalog over the `field_config` relation.
//!
//! The catalog is externally owned; this module reads it and, for setup
//! and fixtures, can create and populate the backing table.

use rusqlite::{params, Connection};

use simref_core::traits::ReferenceFieldCatalog;
use simref_core::{SimrefError, SimrefResult};

/// Catalog lookup backed by a `field_config` table.
pub struct SqliteFieldCatalog<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteFieldCatalog<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl ReferenceFieldCatalog for SqliteFieldCatalog<'_> {
    fn reference_fields(
        &self,
        entity_type: &str,
        target_type: &str,
    ) -> SimrefResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT field_name FROM field_config
                 WHERE entity_type = ?1 AND target_type = ?2
                   AND field_kind = 'entity_reference'
                   AND deleted = 0 AND enabled = 1
                 ORDER BY field_name",
            )
            .map_err(|e| SimrefError::catalog(e.to_string()))?;

        let rows = stmt
            .query_map(params![entity_type, target_type], |row| row.get::<_, String>(0))
            .map_err(|e| SimrefError::catalog(e.to_string()))?;

        let mut names = Vec::new();
        for row in rows {
            names.push(row.map_err(|e| SimrefError::catalog(e.to_string()))?);
        }
        Ok(names)
    }
}

/// Create the `field_config` table if it does not exist.
pub fn init_schema(conn: &Connection) -> SimrefResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS field_config (
            entity_type TEXT NOT NULL,
            target_type TEXT NOT NULL,
            field_name  TEXT NOT NULL,
            field_kind  TEXT NOT NULL,
            deleted     INTEGER NOT NULL DEFAULT 0,
            enabled     INTEGER NOT NULL DEFAULT 1,
            PRIMARY KEY (entity_type, field_name)
        )",
    )
    .map_err(|e| SimrefError::catalog(e.to_string()))
}

/// Register an enabled entity-reference field.
pub fn register_field(
    conn: &Connection,
    entity_type: &str,
    target_type: &str,
    field_name: &str,
) -> SimrefResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO field_config
            (entity_type, target_type, field_name, field_kind, deleted, enabled)
         VALUES (?1, ?2, ?3, 'entity_reference', 0, 1)",
        params![entity_type, target_type, field_name],
    )
    .map_err(|e| SimrefError::catalog(e.to_string()))?;
    Ok(())
}
