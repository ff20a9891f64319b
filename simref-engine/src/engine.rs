//! SimilarityEngine: orchestrates one evaluation end to end.
//!
//! select fields → resolve targets → find overlap → prune → aggregate.
//! Every structure is rebuilt per call; the engine holds no mutable state.

use tracing::{debug, info, warn};

use simref_core::traits::{ReferenceFieldCatalog, ReferenceStore};
use simref_core::{EntityId, ReferenceField, SimilarityConfig, SimrefResult, TargetIdSet};

use crate::aggregate::{aggregate, Evaluation, MaterialField};

/// Target types consulted when the configuration selects no fields.
const DEFAULT_TARGET_TYPES: [&str; 2] = ["entity", "user"];

pub struct SimilarityEngine<'a> {
    store: &'a dyn ReferenceStore,
    catalog: &'a dyn ReferenceFieldCatalog,
    entity_type: String,
    config: SimilarityConfig,
}

impl<'a> SimilarityEngine<'a> {
    pub fn new(
        store: &'a dyn ReferenceStore,
        catalog: &'a dyn ReferenceFieldCatalog,
        entity_type: impl Into<String>,
        config: SimilarityConfig,
    ) -> Self {
        Self { store, catalog, entity_type: entity_type.into(), config }
    }

    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    /// Evaluate similarity for one or more source entity ids.
    pub fn evaluate(&self, sources: &[EntityId]) -> SimrefResult<Evaluation> {
        let selection = self.select_fields()?;
        debug!(fields = selection.len(), sources = sources.len(), "selected reference fields");

        let mut material = Vec::new();
        for name in &selection {
            let field = ReferenceField::new(&self.entity_type, name);

            let mut targets = TargetIdSet::new();
            for source in sources {
                targets.extend(self.store.target_ids(&field, *source)?);
            }
            if targets.is_empty() {
                debug!(field = %name, "no target ids, field pruned");
                continue;
            }

            let overlap = self.store.find_overlap(&field, &targets)?;
            if overlap.is_empty() {
                debug!(field = %name, "no overlap, field pruned");
                continue;
            }

            debug!(field = %name, matched = overlap.len(), "material field");
            material.push(MaterialField { field, overlap });
        }

        let evaluation = aggregate(material, sources);
        info!(
            qualifies = evaluation.qualifies(),
            candidates = evaluation.index.len(),
            normalization_total = evaluation.normalization_total,
            "similarity evaluation complete"
        );
        Ok(evaluation)
    }

    /// The field names to evaluate: the configured selection intersected
    /// with the catalog, or every catalog field when nothing is configured.
    /// Configured names the catalog no longer knows are pruned, not fatal.
    fn select_fields(&self) -> SimrefResult<Vec<String>> {
        let mut catalog_fields: Vec<String> = Vec::new();
        for target_type in DEFAULT_TARGET_TYPES {
            for name in self.catalog.reference_fields(&self.entity_type, target_type)? {
                if !catalog_fields.contains(&name) {
                    catalog_fields.push(name);
                }
            }
        }

        if self.config.reference_fields.is_empty() {
            return Ok(catalog_fields);
        }

        let selected: Vec<String> = self
            .config
            .reference_fields
            .iter()
            .filter(|name| catalog_fields.iter().any(|known| known == *name))
            .cloned()
            .collect();
        if selected.len() < self.config.reference_fields.len() {
            warn!(
                configured = self.config.reference_fields.len(),
                known = selected.len(),
                "configured reference fields missing from catalog"
            );
        }
        Ok(selected)
    }
}
