//! Reference-field reads: distinct target ids per source entity, and the
//! entities overlapping a target set.

use rusqlite::Connection;

use simref_core::traits::ReferenceStore;
use simref_core::{EntityId, FieldOverlap, ReferenceField, SimrefResult, TargetIdSet};

use crate::to_storage_err;

/// Read-only reference store over one rusqlite connection.
pub struct SqliteReferenceStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteReferenceStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl ReferenceStore for SqliteReferenceStore<'_> {
    fn target_ids(&self, field: &ReferenceField, source: EntityId) -> SimrefResult<TargetIdSet> {
        let sql = format!(
            "SELECT DISTINCT {column} FROM {table} WHERE entity_id = ?1",
            column = field.column,
            table = field.table,
        );

        let mut stmt = self.conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;
        let rows = stmt
            .query_map([source], |row| row.get::<_, EntityId>(0))
            .map_err(|e| to_storage_err(e.to_string()))?;

        let mut ids = TargetIdSet::new();
        for row in rows {
            let id = row.map_err(|e| to_storage_err(e.to_string()))?;
            // Zero denotes "no reference", never a legitimate target.
            if id != 0 {
                ids.insert(id);
            }
        }
        Ok(ids)
    }

    fn find_overlap(
        &self,
        field: &ReferenceField,
        targets: &TargetIdSet,
    ) -> SimrefResult<FieldOverlap> {
        let mut overlap = FieldOverlap::default();
        // An unconstrained IN () must never degrade into "match everything".
        if targets.is_empty() {
            return Ok(overlap);
        }

        let placeholders: Vec<String> =
            (1..=targets.len()).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "SELECT entity_id, {column} FROM {table} WHERE {column} IN ({})",
            placeholders.join(", "),
            column = field.column,
            table = field.table,
        );

        let params: Vec<Box<dyn rusqlite::types::ToSql>> = targets
            .iter()
            .map(|t| Box::new(*t) as Box<dyn rusqlite::types::ToSql>)
            .collect();
        let params_refs: Vec<&dyn rusqlite::types::ToSql> =
            params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;
        let rows = stmt
            .query_map(params_refs.as_slice(), |row| {
                Ok((row.get::<_, EntityId>(0)?, row.get::<_, EntityId>(1)?))
            })
            .map_err(|e| to_storage_err(e.to_string()))?;

        for row in rows {
            let (entity, shared_target) = row.map_err(|e| to_storage_err(e.to_string()))?;
            overlap.insert(entity, shared_target);
        }
        Ok(overlap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_with_field(field: &ReferenceField) -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(&format!(
            "CREATE TABLE {table} (entity_id INTEGER NOT NULL, {column} INTEGER NOT NULL)",
            table = field.table,
            column = field.column,
        ))
        .unwrap();
        conn
    }

    fn insert(conn: &Connection, field: &ReferenceField, entity: EntityId, target: EntityId) {
        conn.execute(
            &format!(
                "INSERT INTO {table} (entity_id, {column}) VALUES (?1, ?2)",
                table = field.table,
                column = field.column,
            ),
            [entity, target],
        )
        .unwrap();
    }

    #[test]
    fn target_ids_are_distinct_and_never_zero() {
        let field = ReferenceField::new("node", "related");
        let conn = open_with_field(&field);
        insert(&conn, &field, 1, 5);
        insert(&conn, &field, 1, 5);
        insert(&conn, &field, 1, 7);
        insert(&conn, &field, 1, 0);
        insert(&conn, &field, 2, 9);

        let store = SqliteReferenceStore::new(&conn);
        let ids = store.target_ids(&field, 1).unwrap();
        assert_eq!(ids, TargetIdSet::from([5, 7]));
    }

    #[test]
    fn target_ids_empty_when_nothing_stored() {
        let field = ReferenceField::new("node", "related");
        let conn = open_with_field(&field);
        let store = SqliteReferenceStore::new(&conn);
        assert!(store.target_ids(&field, 42).unwrap().is_empty());
    }

    #[test]
    fn missing_table_is_a_hard_failure() {
        let conn = Connection::open_in_memory().unwrap();
        let store = SqliteReferenceStore::new(&conn);
        let field = ReferenceField::new("node", "gone");
        assert!(store.target_ids(&field, 1).is_err());
    }

    #[test]
    fn overlap_short_circuits_on_empty_targets() {
        // The table does not exist; only the short-circuit keeps this Ok.
        let conn = Connection::open_in_memory().unwrap();
        let store = SqliteReferenceStore::new(&conn);
        let field = ReferenceField::new("node", "related");
        let overlap = store.find_overlap(&field, &TargetIdSet::new()).unwrap();
        assert!(overlap.is_empty());
    }

    #[test]
    fn reads_from_file_backed_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("refs.db");
        let field = ReferenceField::new("node", "related");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(&format!(
                "CREATE TABLE {table} (entity_id INTEGER NOT NULL, {column} INTEGER NOT NULL)",
                table = field.table,
                column = field.column,
            ))
            .unwrap();
            insert(&conn, &field, 1, 5);
        }

        let conn = Connection::open(&path).unwrap();
        let store = SqliteReferenceStore::new(&conn);
        assert_eq!(store.target_ids(&field, 1).unwrap(), TargetIdSet::from([5]));
    }

    #[test]
    fn overlap_groups_shared_targets_by_entity() {
        let field = ReferenceField::new("node", "related");
        let conn = open_with_field(&field);
        insert(&conn, &field, 1, 5);
        insert(&conn, &field, 1, 7);
        insert(&conn, &field, 2, 7);
        insert(&conn, &field, 2, 9);
        insert(&conn, &field, 3, 5);
        insert(&conn, &field, 4, 11);

        let store = SqliteReferenceStore::new(&conn);
        let overlap = store.find_overlap(&field, &TargetIdSet::from([5, 7])).unwrap();

        assert_eq!(overlap.len(), 3);
        assert_eq!(overlap.shared_targets(1).unwrap(), &TargetIdSet::from([5, 7]));
        assert_eq!(overlap.shared_targets(2).unwrap(), &TargetIdSet::from([7]));
        assert_eq!(overlap.shared_targets(3).unwrap(), &TargetIdSet::from([5]));
        assert!(overlap.shared_targets(4).is_none());
    }
}
