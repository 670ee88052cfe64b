use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::depletion::{classify_stock, StockStatus};

/// Default days-until-depletion when no model prediction is usable.
pub const FALLBACK_DEPLETION_DAYS: i64 = 7;

/// Default suggested reorder quantity when no model prediction is usable.
pub const FALLBACK_REORDER_QUANTITY: i64 = 50;

/// JSON envelope returned by the external LSTM prediction service.
///
/// The service is an opaque HTTP dependency; every field beyond `success`
/// is optional and tolerated missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depletion_prediction: Option<DepletionPrediction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reorder_suggestion: Option<ReorderSuggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepletionPrediction {
    pub depletion_days: i64,
    #[serde(default)]
    pub depletion_date: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderSuggestion {
    pub suggested_quantity: i64,
}

/// Where a resolved estimate came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateSource {
    /// External model prediction was used.
    Model,
    /// Local heuristic defaults were substituted.
    Heuristic,
}

/// Resolved depletion estimate, always available regardless of whether the
/// external call succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepletionEstimate {
    pub days_until_depletion: i64,
    pub suggested_reorder_quantity: i64,
    pub predicted_depletion_date: Option<String>,
    pub confidence: Option<f64>,
    pub status: StockStatus,
    pub source: EstimateSource,
}

/// Fold an (optional) external prediction into a usable estimate.
///
/// Any failure upstream is represented as `None`; a `success: false`
/// envelope or one without a depletion prediction is equally unusable. In
/// all of those cases the fixed defaults are substituted and the status is
/// computed only from current stock vs reorder threshold. The caller never
/// sees a forecasting error.
pub fn resolve_estimate(
    envelope: Option<PredictionEnvelope>,
    stock: i64,
    threshold: i64,
) -> DepletionEstimate {
    let status = classify_stock(stock, threshold);

    let usable = envelope.filter(|e| e.success);
    match usable.and_then(|e| {
        e.depletion_prediction
            .clone()
            .map(|dp| (dp, e.reorder_suggestion))
    }) {
        Some((dp, reorder)) => DepletionEstimate {
            days_until_depletion: dp.depletion_days,
            suggested_reorder_quantity: reorder
                .map(|r| r.suggested_quantity)
                .unwrap_or(FALLBACK_REORDER_QUANTITY),
            predicted_depletion_date: dp.depletion_date,
            confidence: dp.confidence,
            status,
            source: EstimateSource::Model,
        },
        None => DepletionEstimate {
            days_until_depletion: FALLBACK_DEPLETION_DAYS,
            suggested_reorder_quantity: FALLBACK_REORDER_QUANTITY,
            predicted_depletion_date: None,
            confidence: None,
            status,
            source: EstimateSource::Heuristic,
        },
    }
}
