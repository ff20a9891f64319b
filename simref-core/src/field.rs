//! Entity ids, reference fields, and the per-evaluation overlap structures.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Opaque row identifier. Positive; zero is reserved for "no reference"
/// and is never a valid target.
pub type EntityId = i64;

/// The distinct target ids one source entity holds in one field.
pub type TargetIdSet = BTreeSet<EntityId>;

/// A multi-valued reference field on an entity type. The backing table and
/// value column names are derived deterministically from the entity type
/// and the field name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReferenceField {
    pub name: String,
    /// Storage relation holding this field's values, `{entity_type}__{name}`.
    pub table: String,
    /// Value column inside the relation, `{name}_target_id`.
    pub column: String,
}

impl ReferenceField {
    pub fn new(entity_type: &str, field_name: &str) -> Self {
        Self {
            name: field_name.to_string(),
            table: format!("{entity_type}__{field_name}"),
            column: format!("{field_name}_target_id"),
        }
    }
}

/// One field's overlap result: matched entity id → the target ids it shares
/// with the source. An entity sharing nothing is absent, never present with
/// an empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOverlap {
    matched: BTreeMap<EntityId, TargetIdSet>,
}

impl FieldOverlap {
    pub fn insert(&mut self, entity: EntityId, shared_target: EntityId) {
        self.matched.entry(entity).or_default().insert(shared_target);
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    /// Number of distinct matched entities.
    pub fn len(&self) -> usize {
        self.matched.len()
    }

    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.matched.keys().copied()
    }

    pub fn shared_targets(&self, entity: EntityId) -> Option<&TargetIdSet> {
        self.matched.get(&entity)
    }
}

/// Per-evaluation mapping from candidate entity id to aggregate overlap
/// count. One matching entity contributes one unit per field it matched in;
/// an entity with count zero is absent rather than stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityIndex {
    counts: BTreeMap<EntityId, u32>,
}

impl SimilarityIndex {
    /// Fold one field's overlap into the index: +1 per matched entity.
    pub fn record_field(&mut self, overlap: &FieldOverlap) {
        for entity in overlap.entity_ids() {
            *self.counts.entry(entity).or_insert(0) += 1;
        }
    }

    pub fn count(&self, entity: EntityId) -> u32 {
        self.counts.get(&entity).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, u32)> + '_ {
        self.counts.iter().map(|(id, count)| (*id, *count))
    }

    /// Entities ordered by aggregate count. Ties keep ascending id order.
    pub fn ranked(&self, descending: bool) -> Vec<(EntityId, u32)> {
        let mut entries: Vec<(EntityId, u32)> = self.iter().collect();
        entries.sort_by(|a, b| {
            let by_count = if descending { b.1.cmp(&a.1) } else { a.1.cmp(&b.1) };
            by_count.then(a.0.cmp(&b.0))
        });
        entries
    }
}
