//! Property tests: percentage bounds, aggregate monotonicity under field
//! selection growth, qualification implies a non-empty index.

use std::collections::BTreeMap;

use proptest::prelude::*;

use simref_core::traits::{ReferenceFieldCatalog, ReferenceStore};
use simref_core::{
    DisplayConfig, DisplayMode, EntityId, FieldOverlap, ReferenceField, SimilarityConfig,
    SimrefResult, TargetIdSet,
};
use simref_engine::{format_similarity, SimilarityEngine};

/// In-memory reference store: field name → entity → targets.
#[derive(Default)]
struct MemoryStore {
    fields: BTreeMap<String, BTreeMap<EntityId, TargetIdSet>>,
}

impl MemoryStore {
    fn add(&mut self, field: &str, entity: EntityId, target: EntityId) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .entry(entity)
            .or_default()
            .insert(target);
    }
}

impl ReferenceStore for MemoryStore {
    fn target_ids(&self, field: &ReferenceField, source: EntityId) -> SimrefResult<TargetIdSet> {
        Ok(self
            .fields
            .get(&field.name)
            .and_then(|entities| entities.get(&source))
            .map(|targets| targets.iter().copied().filter(|t| *t != 0).collect())
            .unwrap_or_default())
    }

    fn find_overlap(
        &self,
        field: &ReferenceField,
        targets: &TargetIdSet,
    ) -> SimrefResult<FieldOverlap> {
        let mut overlap = FieldOverlap::default();
        if targets.is_empty() {
            return Ok(overlap);
        }
        if let Some(entities) = self.fields.get(&field.name) {
            for (entity, held) in entities {
                for shared in held.intersection(targets) {
                    overlap.insert(*entity, *shared);
                }
            }
        }
        Ok(overlap)
    }
}

struct TwoFieldCatalog;

impl ReferenceFieldCatalog for TwoFieldCatalog {
    fn reference_fields(&self, _entity_type: &str, target_type: &str) -> SimrefResult<Vec<String>> {
        Ok(match target_type {
            "entity" => vec!["related".to_string(), "tags".to_string()],
            _ => Vec::new(),
        })
    }
}

fn config_with_fields(fields: &[&str]) -> SimilarityConfig {
    SimilarityConfig {
        reference_fields: fields.iter().map(|f| f.to_string()).collect(),
        ..Default::default()
    }
}

proptest! {
    #[test]
    fn prop_percentage_stays_within_bounds(
        total in 1usize..500,
        count_frac in 0.0f64..=1.0,
    ) {
        let count = (total as f64 * count_frac) as i64;
        let display = DisplayConfig { mode: DisplayMode::Percentage, percent_suffix: false };
        let rendered = format_similarity(count, &display, total).unwrap();
        let percent: i64 = rendered.parse().unwrap();
        prop_assert!((0..=100).contains(&percent));
    }

    #[test]
    fn prop_full_overlap_is_exactly_one_hundred(total in 1usize..500) {
        let display = DisplayConfig { mode: DisplayMode::Percentage, percent_suffix: true };
        let rendered = format_similarity(total as i64, &display, total).unwrap();
        prop_assert_eq!(rendered, "100%".to_string());
    }

    #[test]
    fn prop_zero_total_never_renders(count in 0i64..1000) {
        let display = DisplayConfig { mode: DisplayMode::Percentage, percent_suffix: true };
        prop_assert_eq!(format_similarity(count, &display, 0), None);
    }

    #[test]
    fn prop_adding_fields_never_lowers_counts(
        refs in proptest::collection::vec(
            (1i64..=6, 0usize..2, 1i64..=8),
            0..40,
        ),
    ) {
        let mut store = MemoryStore::default();
        for (entity, field_idx, target) in refs {
            let field = if field_idx == 0 { "related" } else { "tags" };
            store.add(field, entity, target);
        }
        let catalog = TwoFieldCatalog;

        let narrow = SimilarityEngine::new(&store, &catalog, "node", config_with_fields(&["related"]));
        let wide = SimilarityEngine::new(&store, &catalog, "node", config_with_fields(&[]));

        let narrow_eval = narrow.evaluate(&[1]).unwrap();
        let wide_eval = wide.evaluate(&[1]).unwrap();

        for entity in 2i64..=6 {
            prop_assert!(wide_eval.index.count(entity) >= narrow_eval.index.count(entity));
        }
        prop_assert!(wide_eval.normalization_total >= narrow_eval.normalization_total);
    }

    #[test]
    fn prop_qualifies_iff_index_could_be_non_empty(
        refs in proptest::collection::vec(
            (2i64..=6, 0usize..2, 1i64..=8),
            0..30,
        ),
        source_targets in proptest::collection::vec(1i64..=8, 0..4),
    ) {
        let mut store = MemoryStore::default();
        for target in source_targets {
            store.add("related", 1, target);
        }
        for (entity, field_idx, target) in refs {
            let field = if field_idx == 0 { "related" } else { "tags" };
            store.add(field, entity, target);
        }
        let catalog = TwoFieldCatalog;
        let engine = SimilarityEngine::new(&store, &catalog, "node", SimilarityConfig::default());

        let evaluation = engine.evaluate(&[1]).unwrap();
        if !evaluation.qualifies() {
            prop_assert!(evaluation.index.is_empty());
            prop_assert_eq!(evaluation.normalization_total, 0);
        } else {
            prop_assert!(evaluation.normalization_total > 0);
        }
    }
}
