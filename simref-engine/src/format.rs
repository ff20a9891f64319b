//! Display formatting for raw overlap counts. Presentation only; ranking
//! always orders by the raw count.

use simref_core::{DisplayConfig, DisplayMode};

/// Render a raw count per the display config. Percentage mode returns
/// `None` when the normalization total is zero: nothing displayable, never
/// a division by zero.
pub fn format_similarity(
    raw: i64,
    display: &DisplayConfig,
    normalization_total: usize,
) -> Option<String> {
    match display.mode {
        DisplayMode::Count => Some(raw.to_string()),
        DisplayMode::Percentage => {
            if normalization_total == 0 {
                return None;
            }
            let percent = (raw as f64 / normalization_total as f64 * 100.0).round() as i64;
            if display.percent_suffix {
                Some(format!("{percent}%"))
            } else {
                Some(percent.to_string())
            }
        }
    }
}
