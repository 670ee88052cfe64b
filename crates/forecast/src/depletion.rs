use serde::{Deserialize, Serialize};

use aiventory_inventory::{reconstruct_levels, StockMovement};

/// Maximum number of projected steps.
pub const PROJECTION_HORIZON: usize = 7;

/// Assumed consumption per period when the series is too short to derive a
/// trend (fewer than two points).
pub const FALLBACK_DAILY_CHANGE: f64 = 2.0;

/// Secondary threshold multiplier separating `Warning` from `Good`.
pub const WARNING_MULTIPLIER: f64 = 1.5;

/// Stock health relative to the reorder threshold.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    AtRisk,
    Warning,
    Good,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::AtRisk => "At Risk",
            StockStatus::Warning => "Warning",
            StockStatus::Good => "Good",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify stock purely from current level vs reorder threshold.
pub fn classify_stock(stock: i64, threshold: i64) -> StockStatus {
    if stock <= threshold {
        StockStatus::AtRisk
    } else if (stock as f64) <= (threshold as f64) * WARNING_MULTIPLIER {
        StockStatus::Warning
    } else {
        StockStatus::Good
    }
}

/// Immutable snapshot the depletion analysis runs on.
///
/// Current stock and movement log are read independently by the caller, so
/// the two may straddle a write (accepted inconsistency window; the
/// reconstruction does not try to detect or correct it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepletionInput {
    pub current_stock: i64,
    pub reorder_threshold: i64,
    /// Movement log, newest-first.
    pub movements: Vec<StockMovement>,
}

/// Output of [`analyze`]: reconstructed history plus short-horizon forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepletionReport {
    /// Chronological (oldest-first) reconstructed levels, current stock last.
    pub series: Vec<i64>,
    /// Projected levels for the next `min(7, series.len())` steps, clamped
    /// at zero.
    pub projection: Vec<f64>,
    /// Average per-period decline derived from the series (positive means
    /// stock is shrinking), or [`FALLBACK_DAILY_CHANGE`].
    pub avg_daily_change: f64,
    pub status: StockStatus,
}

/// Linear short-horizon extrapolation of a reconstructed series.
///
/// Returns the projected levels and the average daily change used.
pub fn project_depletion(series: &[i64]) -> (Vec<f64>, f64) {
    let horizon = PROJECTION_HORIZON.min(series.len());
    let last = *series.last().unwrap_or(&0) as f64;

    let avg_daily_change = if series.len() > 1 {
        (series[0] as f64 - last) / series.len() as f64
    } else {
        FALLBACK_DAILY_CHANGE
    };

    let projection = (0..horizon)
        .map(|i| (last - avg_daily_change * (i as f64 + 1.0)).max(0.0))
        .collect();

    (projection, avg_daily_change)
}

/// Run the full pipeline: reconstruction, projection, classification.
///
/// Pure function over the snapshot; this is the single entry point the API
/// layer uses, so fetch-completion order cannot leak into the result.
pub fn analyze(input: &DepletionInput) -> DepletionReport {
    let series = reconstruct_levels(input.current_stock, &input.movements);
    let (projection, avg_daily_change) = project_depletion(&series);

    DepletionReport {
        series,
        projection,
        avg_daily_change,
        status: classify_stock(input.current_stock, input.reorder_threshold),
    }
}
