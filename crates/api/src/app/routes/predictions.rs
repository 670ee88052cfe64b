use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use aiventory_core::ProductId;
use aiventory_forecast::{analyze, chart_bundle, resolve_estimate, DepletionInput};
use aiventory_inventory::{StockMovement, RECONSTRUCTION_WINDOW};

use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/products/:id", get(depletion_estimate))
        .route("/products/:id/chart", get(depletion_chart))
}

/// Read the (stock, reorder threshold) snapshot for an analysis endpoint.
///
/// Any failure, including an unknown product, degrades to `(0, 0)` so the
/// analysis still answers; these endpoints never surface a hard error.
async fn stock_snapshot(services: &AppServices, id: &ProductId) -> (i64, i64) {
    match services.products.get(id).await {
        Ok(Some(product)) => (product.stock, product.reorder_level),
        Ok(None) => {
            tracing::debug!(product_id = %id, "analysis requested for unknown product");
            (0, 0)
        }
        Err(e) => {
            tracing::warn!(product_id = %id, error = %e, "product read failed; using zero snapshot");
            (0, 0)
        }
    }
}

/// Movement log, newest-first; failures degrade to an empty log.
async fn movement_log(services: &AppServices, id: &ProductId) -> Vec<StockMovement> {
    match services.movements.list_for_product(id).await {
        Ok(m) => m,
        Err(e) => {
            tracing::warn!(product_id = %id, error = %e, "movement read failed; using empty log");
            Vec::new()
        }
    }
}

/// Days-until-depletion estimate: external model when available, fixed
/// heuristic defaults otherwise.
pub async fn depletion_estimate(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<ProductId>() else {
        let estimate = resolve_estimate(None, 0, 0);
        return estimate_response(&estimate);
    };

    let (stock, threshold) = stock_snapshot(&services, &id).await;
    let envelope = services.predictions.fetch(&id).await;
    let estimate = resolve_estimate(envelope, stock, threshold);

    estimate_response(&estimate)
}

fn estimate_response(
    estimate: &aiventory_forecast::DepletionEstimate,
) -> axum::response::Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "status": estimate.status.as_str(),
            "source": estimate.source,
            "days_until_depletion": estimate.days_until_depletion,
            "suggested_reorder_quantity": estimate.suggested_reorder_quantity,
            "predicted_depletion_date": estimate.predicted_depletion_date,
            "confidence": estimate.confidence,
        })),
    )
        .into_response()
}

/// Chart bundle: reconstructed history, linear projection, and the
/// constant reorder-threshold line, with matching labels.
pub async fn depletion_chart(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<ProductId>() else {
        return chart_response(0, &[], 0);
    };

    let (stock, threshold) = stock_snapshot(&services, &id).await;
    let movements = movement_log(&services, &id).await;

    chart_response(stock, &movements, threshold)
}

fn chart_response(
    stock: i64,
    movements: &[StockMovement],
    threshold: i64,
) -> axum::response::Response {
    let input = DepletionInput {
        current_stock: stock,
        reorder_threshold: threshold,
        movements: movements.to_vec(),
    };
    let report = analyze(&input);

    // One label per historical point: the date of each windowed movement
    // in chronological order, then "Now" for the current-stock point.
    let window = &movements[..movements.len().min(RECONSTRUCTION_WINDOW)];
    let mut labels = window
        .iter()
        .rev()
        .map(|m| m.occurred_at.format("%m-%d").to_string())
        .collect::<Vec<_>>();
    labels.push("Now".to_string());

    let bundle = chart_bundle(&report.series, &labels, &report.projection, threshold);

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "labels": bundle.labels,
            "history": bundle.history,
            "projection": bundle.projection,
            "threshold": bundle.threshold,
            "status": report.status.as_str(),
            "avg_daily_change": report.avg_daily_change,
        })),
    )
        .into_response()
}
