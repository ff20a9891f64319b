//! Minimal listing executor.
//!
//! Merges a query plan into a base `SELECT id, COUNT(id)` statement and
//! runs it. This stands in for the surrounding listing engine: it consumes
//! the plan as data and binds every id set as a parameter.

use rusqlite::Connection;
use tracing::debug;

use simref_core::plan::{FilterOp, QueryPlan, SortDirection};
use simref_core::{EntityId, SimrefResult};

use crate::to_storage_err;

/// The base relation a plan is merged into.
pub struct ListingQuery {
    pub base_table: String,
    pub id_column: String,
}

/// One ranked result row: entity id plus its aggregate overlap count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub entity_id: EntityId,
    pub similarity: i64,
}

impl ListingQuery {
    pub fn new(base_table: impl Into<String>, id_column: impl Into<String>) -> Self {
        Self { base_table: base_table.into(), id_column: id_column.into() }
    }

    /// Render the merged statement and its bound parameters.
    pub fn to_sql(&self, plan: &QueryPlan) -> (String, Vec<EntityId>) {
        let base = &self.base_table;
        let id = &self.id_column;
        let mut sql = format!("SELECT {base}.{id}, COUNT({base}.{id}) AS similarity FROM {base}");

        for join in &plan.joins {
            sql.push_str(&format!(
                " INNER JOIN {} AS {} ON {}.{} = {}.{}",
                join.table, join.alias, join.left_table, join.left_column, join.alias, join.column,
            ));
        }

        let mut params: Vec<EntityId> = Vec::new();
        let mut clauses: Vec<String> = Vec::new();
        for filter in &plan.filters {
            let first = params.len() + 1;
            let placeholders: Vec<String> =
                (0..filter.values.len()).map(|i| format!("?{}", first + i)).collect();
            let op = match filter.op {
                FilterOp::In => "IN",
                FilterOp::NotIn => "NOT IN",
            };
            clauses.push(format!(
                "{}.{} {op} ({})",
                filter.table,
                filter.column,
                placeholders.join(", "),
            ));
            params.extend(filter.values.iter().copied());
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        if !plan.group_by.is_empty() {
            let columns: Vec<String> = plan
                .group_by
                .iter()
                .map(|g| format!("{}.{}", g.table, g.column))
                .collect();
            sql.push_str(&format!(" GROUP BY {}", columns.join(", ")));
        }

        if let Some(order) = &plan.order_by {
            let direction = match order.direction {
                SortDirection::Descending => "DESC",
                SortDirection::Ascending => "ASC",
            };
            // Secondary key keeps tied counts in a stable id order.
            sql.push_str(&format!(
                " ORDER BY COUNT({}.{}) {direction}, {base}.{id} ASC",
                order.table, order.column,
            ));
        }

        (sql, params)
    }

    /// Execute the merged statement.
    pub fn execute(&self, conn: &Connection, plan: &QueryPlan) -> SimrefResult<Vec<ListingRow>> {
        let (sql, params) = self.to_sql(plan);
        debug!(%sql, params = params.len(), "executing listing query");

        let boxed: Vec<Box<dyn rusqlite::types::ToSql>> = params
            .iter()
            .map(|p| Box::new(*p) as Box<dyn rusqlite::types::ToSql>)
            .collect();
        let params_refs: Vec<&dyn rusqlite::types::ToSql> =
            boxed.iter().map(|p| p.as_ref()).collect();

        let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;
        let rows = stmt
            .query_map(params_refs.as_slice(), |row| {
                Ok(ListingRow { entity_id: row.get(0)?, similarity: row.get(1)? })
            })
            .map_err(|e| to_storage_err(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| to_storage_err(e.to_string()))?);
        }
        Ok(results)
    }
}
