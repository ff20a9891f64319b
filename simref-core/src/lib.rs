//! # simref-core
//!
//! Foundation crate for the simref reference-overlap similarity engine.
//! Defines the entity/field/plan types, errors, config, and the traits the
//! storage and engine crates implement and consume.

pub mod config;
pub mod errors;
pub mod field;
pub mod plan;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{DisplayConfig, DisplayMode, SimilarityConfig};
pub use errors::{SimrefError, SimrefResult};
pub use field::{EntityId, FieldOverlap, ReferenceField, SimilarityIndex, TargetIdSet};
pub use plan::{FilterOp, FilterSpec, JoinSpec, OrderBy, QueryPlan, SortDirection};
pub use traits::{ReferenceFieldCatalog, ReferenceStore};
