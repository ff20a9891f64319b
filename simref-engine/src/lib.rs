//! # simref-engine
//!
//! The similarity evaluation pipeline: select reference fields, resolve the
//! source's targets, find overlapping entities, aggregate them into a
//! similarity index, and emit a composable query plan for the listing layer.

pub mod aggregate;
pub mod engine;
pub mod format;
pub mod plan;

pub use aggregate::{Evaluation, MaterialField};
pub use engine::SimilarityEngine;
pub use format::format_similarity;
pub use plan::{build_plan, PrimaryRelation};
