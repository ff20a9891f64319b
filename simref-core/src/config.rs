//! Per-listing similarity configuration.

use serde::{Deserialize, Serialize};

use crate::errors::{SimrefError, SimrefResult};
use crate::plan::SortDirection;

/// How a raw overlap count is rendered per result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// The raw shared-reference count.
    Count,
    /// The count as a percentage of the normalization total.
    #[default]
    Percentage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub mode: DisplayMode,
    /// Append a literal `%` to the percentage form.
    pub percent_suffix: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { mode: DisplayMode::default(), percent_suffix: true }
    }
}

/// Configuration for one similarity listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Reference fields to consider. Empty means every catalog field.
    pub reference_fields: Vec<String>,
    /// Leave the source entity eligible for its own result row.
    pub include_source: bool,
    pub display: DisplayConfig,
    pub order: SortDirection,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            reference_fields: Vec::new(),
            include_source: false,
            display: DisplayConfig::default(),
            order: SortDirection::Descending,
        }
    }
}

impl SimilarityConfig {
    pub fn from_toml_str(raw: &str) -> SimrefResult<Self> {
        toml::from_str(raw)
            .map_err(|e| SimrefError::invalid_config(format!("parse similarity config: {e}")))
    }
}
