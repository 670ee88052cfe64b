use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use aiventory_core::InvoiceId;
use aiventory_invoicing::NewInvoice;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_invoice).get(list_invoices))
        .route("/:id", get(get_invoice))
}

pub async fn create_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewInvoice>,
) -> axum::response::Response {
    let invoice = match body.into_invoice(Utc::now()) {
        Ok(i) => i,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = services.invoices.insert(&invoice).await {
        return errors::store_error_to_response(e);
    }

    (StatusCode::CREATED, Json(dto::invoice_to_json(&invoice))).into_response()
}

pub async fn list_invoices(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.invoices.list().await {
        Ok(invoices) => {
            let items = invoices.iter().map(dto::invoice_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: InvoiceId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid invoice id"),
    };

    match services.invoices.get(&id).await {
        Ok(Some(invoice)) => (StatusCode::OK, Json(dto::invoice_to_json(&invoice))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "invoice not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}
