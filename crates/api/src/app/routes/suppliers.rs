use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use aiventory_core::SupplierId;
use aiventory_suppliers::{NewSupplier, SupplierUpdate};

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_supplier).get(list_suppliers))
        .route(
            "/:id",
            get(get_supplier).put(update_supplier).delete(delete_supplier),
        )
}

pub async fn create_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewSupplier>,
) -> axum::response::Response {
    let supplier = match body.into_supplier(Utc::now()) {
        Ok(s) => s,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = services.suppliers.insert(&supplier).await {
        return errors::store_error_to_response(e);
    }

    (StatusCode::CREATED, Json(supplier)).into_response()
}

pub async fn list_suppliers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.suppliers.list().await {
        Ok(suppliers) => {
            (StatusCode::OK, Json(serde_json::json!({ "items": suppliers }))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: SupplierId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid supplier id"),
    };

    match services.suppliers.get(&id).await {
        Ok(Some(supplier)) => (StatusCode::OK, Json(supplier)).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "supplier not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<SupplierUpdate>,
) -> axum::response::Response {
    let id: SupplierId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid supplier id"),
    };

    let mut supplier = match services.suppliers.get(&id).await {
        Ok(Some(s)) => s,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "supplier not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    if let Err(e) = supplier.apply_update(body, Utc::now()) {
        return errors::domain_error_to_response(e);
    }

    if let Err(e) = services.suppliers.update(&supplier).await {
        return errors::store_error_to_response(e);
    }

    (StatusCode::OK, Json(supplier)).into_response()
}

pub async fn delete_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: SupplierId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid supplier id"),
    };

    match services.suppliers.delete(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
