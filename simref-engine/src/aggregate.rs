//! Material-field pruning results and index aggregation.

use simref_core::{EntityId, FieldOverlap, ReferenceField, SimilarityIndex};

/// A field that survived pruning: its target-id set and overlap result
/// were both non-empty.
#[derive(Debug, Clone)]
pub struct MaterialField {
    pub field: ReferenceField,
    pub overlap: FieldOverlap,
}

/// Outcome of one similarity evaluation. Rebuilt per call and returned by
/// value; nothing here survives the request.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub material: Vec<MaterialField>,
    pub index: SimilarityIndex,
    /// Sum of per-field overlap sizes across material fields; the
    /// denominator for percentage display.
    pub normalization_total: usize,
}

impl Evaluation {
    /// True iff at least one field contributed a non-empty overlap. Gates
    /// whether the listing engine executes at all.
    pub fn qualifies(&self) -> bool {
        !self.material.is_empty()
    }
}

/// Fold material fields into the similarity index. Each field contributes
/// one unit per matched entity; the source ids are kept in the per-field
/// overlaps (they feed the plan filters and the normalization total) but
/// never ranked against themselves in the index.
pub fn aggregate(material: Vec<MaterialField>, sources: &[EntityId]) -> Evaluation {
    let mut index = SimilarityIndex::default();
    let mut normalization_total = 0;
    for entry in &material {
        normalization_total += entry.overlap.len();
        let mut candidates = FieldOverlap::default();
        for entity in entry.overlap.entity_ids() {
            if sources.contains(&entity) {
                continue;
            }
            if let Some(shared) = entry.overlap.shared_targets(entity) {
                for target in shared {
                    candidates.insert(entity, *target);
                }
            }
        }
        index.record_field(&candidates);
    }
    Evaluation { material, index, normalization_total }
}
