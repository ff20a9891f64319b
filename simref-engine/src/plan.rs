//! Query-plan construction from an evaluation's material fields.

use simref_core::plan::{FilterOp, FilterSpec, GroupBy, JoinSpec, OrderBy, QueryPlan};
use simref_core::{EntityId, SimilarityConfig};

use crate::aggregate::Evaluation;

/// The primary entity relation the plan's joins hang off.
#[derive(Debug, Clone)]
pub struct PrimaryRelation {
    pub table: String,
    pub id_column: String,
}

impl PrimaryRelation {
    pub fn new(table: impl Into<String>, id_column: impl Into<String>) -> Self {
        Self { table: table.into(), id_column: id_column.into() }
    }
}

/// Build the composable fragment for a qualified evaluation: one inner join
/// plus entity-id IN filter per material field, the source exclusion unless
/// configured otherwise, a group-by collapsing multiplied rows, and the
/// count order-by. Returns an empty plan when the evaluation does not
/// qualify; callers must not execute that.
pub fn build_plan(
    evaluation: &Evaluation,
    sources: &[EntityId],
    primary: &PrimaryRelation,
    config: &SimilarityConfig,
) -> QueryPlan {
    let mut plan = QueryPlan::default();
    if !evaluation.qualifies() {
        return plan;
    }

    for entry in &evaluation.material {
        // Field table name doubles as the alias, unique per field.
        plan.joins.push(JoinSpec {
            left_table: primary.table.clone(),
            left_column: primary.id_column.clone(),
            table: entry.field.table.clone(),
            alias: entry.field.table.clone(),
            column: "entity_id".to_string(),
        });
        plan.filters.push(FilterSpec {
            table: entry.field.table.clone(),
            column: "entity_id".to_string(),
            op: FilterOp::In,
            values: entry.overlap.entity_ids().collect(),
        });
    }

    if !config.include_source {
        plan.filters.push(FilterSpec {
            table: primary.table.clone(),
            column: primary.id_column.clone(),
            op: FilterOp::NotIn,
            values: sources.to_vec(),
        });
    }

    plan.group_by.push(GroupBy {
        table: primary.table.clone(),
        column: primary.id_column.clone(),
    });
    plan.order_by = Some(OrderBy {
        table: primary.table.clone(),
        column: primary.id_column.clone(),
        direction: config.order,
    });

    plan
}
