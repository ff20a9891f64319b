//! Seams between the engine and its collaborators. The storage crate
//! provides the SQLite implementations; tests substitute in-memory fakes.

use crate::errors::SimrefResult;
use crate::field::{EntityId, FieldOverlap, ReferenceField, TargetIdSet};

/// Read-only access to reference-field storage.
pub trait ReferenceStore {
    /// Distinct non-zero target ids `source` holds in `field`.
    /// Empty when nothing is stored; zero values are never returned.
    fn target_ids(&self, field: &ReferenceField, source: EntityId) -> SimrefResult<TargetIdSet>;

    /// Entities referencing any of `targets` through `field`, with the
    /// target ids each shares. Must return an empty result without touching
    /// storage when `targets` is empty.
    fn find_overlap(
        &self,
        field: &ReferenceField,
        targets: &TargetIdSet,
    ) -> SimrefResult<FieldOverlap>;
}

/// Lookup of the reference fields active on an entity type. Externally
/// owned and read-only; the engine treats it as a pure function at call
/// time and takes no responsibility for its staleness.
pub trait ReferenceFieldCatalog {
    /// Names of enabled, non-deleted entity-reference fields on
    /// `entity_type` pointing at `target_type`.
    fn reference_fields(&self, entity_type: &str, target_type: &str)
        -> SimrefResult<Vec<String>>;
}
