//! `aiventory-forecast`
//!
//! **Responsibility:** depletion estimation and chart assembly.
//!
//! This crate is intentionally **not** part of the domain model:
//! - It must not mutate domain state.
//! - It consumes snapshots provided by callers (API layer) and stays
//!   storage- and transport-agnostic; the HTTP client for the external
//!   prediction service lives in the API crate.
//! - Every function here is deterministic.

pub mod chart;
pub mod depletion;
pub mod prediction;

pub use chart::{chart_bundle, ChartBundle};
pub use depletion::{
    analyze, classify_stock, project_depletion, DepletionInput, DepletionReport, StockStatus,
    FALLBACK_DAILY_CHANGE, PROJECTION_HORIZON, WARNING_MULTIPLIER,
};
pub use prediction::{
    resolve_estimate, DepletionEstimate, DepletionPrediction, EstimateSource, PredictionEnvelope,
    ReorderSuggestion, FALLBACK_DEPLETION_DAYS, FALLBACK_REORDER_QUANTITY,
};
