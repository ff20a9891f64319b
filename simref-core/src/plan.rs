//! Typed query-plan primitives. The engine assembles these as immutable
//! values and hands them to the listing layer as data; ids travel as bound
//! parameters, never as interpolated strings.

use serde::{Deserialize, Serialize};

use crate::field::EntityId;

/// Inner join from the primary entity relation to one field relation.
/// Unmatched rows are not produced. The alias is unique per field so the
/// fragment composes with whatever joins the surrounding query already has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinSpec {
    pub left_table: String,
    pub left_column: String,
    pub table: String,
    pub alias: String,
    pub column: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    In,
    NotIn,
}

/// Membership filter on one relation column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub table: String,
    pub column: String,
    pub op: FilterOp,
    pub values: Vec<EntityId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Descending,
    Ascending,
}

/// ORDER BY COUNT(table.column) in the given direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub table: String,
    pub column: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupBy {
    pub table: String,
    pub column: String,
}

/// The composable fragment: per-field joins and filters, the source
/// exclusion, one group-by on the primary id, and the similarity order-by.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPlan {
    pub joins: Vec<JoinSpec>,
    pub filters: Vec<FilterSpec>,
    pub group_by: Vec<GroupBy>,
    pub order_by: Option<OrderBy>,
}

impl QueryPlan {
    pub fn is_empty(&self) -> bool {
        self.joins.is_empty() && self.filters.is_empty()
    }
}
