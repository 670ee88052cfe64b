use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use chrono::Utc;

use aiventory_core::ProductId;
use aiventory_inventory::{MovementDirection, NewStockMovement};
use aiventory_products::{NewProduct, ProductUpdate, StockAction};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::StaffContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/barcode/:code", get(find_by_barcode))
        .route("/:id/stock", patch(patch_stock))
        .route("/:id/history", get(history))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    let product = match NewProduct::from(body).into_product(Utc::now()) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = services.products.insert(&product).await {
        return errors::store_error_to_response(e);
    }

    (StatusCode::CREATED, Json(dto::product_to_json(&product))).into_response()
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.products.list().await {
        Ok(products) => {
            let items = products.iter().map(dto::product_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"),
    };

    match services.products.get(&id).await {
        Ok(Some(product)) => (StatusCode::OK, Json(dto::product_to_json(&product))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateProductRequest>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"),
    };

    let mut product = match services.products.get(&id).await {
        Ok(Some(p)) => p,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    if let Err(e) = product.apply_update(ProductUpdate::from(body), Utc::now()) {
        return errors::domain_error_to_response(e);
    }

    if let Err(e) = services.products.update(&product).await {
        return errors::store_error_to_response(e);
    }

    (StatusCode::OK, Json(dto::product_to_json(&product))).into_response()
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"),
    };

    match services.products.delete(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn find_by_barcode(
    Extension(services): Extension<Arc<AppServices>>,
    Path(code): Path<String>,
) -> axum::response::Response {
    match services.products.find_by_barcode(code.trim()).await {
        Ok(Some(product)) => (StatusCode::OK, Json(dto::product_to_json(&product))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "no product with that barcode"),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Adjust stock and append the matching ledger entry.
///
/// The two writes are independent and not atomic; a failed ledger append
/// is logged and swallowed so the stock adjustment still succeeds.
pub async fn patch_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(staff): Extension<StaffContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::StockPatchRequest>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"),
    };

    let action = match StockAction::parse(&body.action) {
        Ok(a) => a,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let mut product = match services.products.get(&id).await {
        Ok(Some(p)) => p,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    let now = Utc::now();
    let new_stock = match product.apply_stock_action(action, body.quantity, now) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = services.products.update(&product).await {
        return errors::store_error_to_response(e);
    }

    let direction = match action {
        StockAction::Add => MovementDirection::In,
        StockAction::Remove => MovementDirection::Out,
    };
    let movement = NewStockMovement {
        product_id: id,
        direction,
        quantity: body.quantity,
        reason: body.reason,
        actor_id: Some(body.staff_id.unwrap_or_else(|| staff.staff_id())),
        actor_name: Some(body.user_name.unwrap_or_else(|| staff.name().to_string())),
    }
    .into_movement(now);

    match movement {
        Ok(movement) => {
            if let Err(e) = services.movements.append(&movement).await {
                tracing::warn!(product_id = %id, error = %e, "ledger append failed; stock already adjusted");
            }
        }
        Err(e) => {
            tracing::warn!(product_id = %id, error = %e, "ledger entry rejected; stock already adjusted");
        }
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "Product_id": id,
            "new_stock": new_stock,
            "Product_stock": new_stock,
        })),
    )
        .into_response()
}

/// Movement history, newest-first, in the wire shape the mobile client
/// consumes. Store failures and unknown products degrade to an empty
/// array, never an error.
pub async fn history(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<ProductId>() else {
        return (StatusCode::OK, Json(serde_json::json!([]))).into_response();
    };

    let movements = match services.movements.list_for_product(&id).await {
        Ok(m) => m,
        Err(e) => {
            tracing::warn!(product_id = %id, error = %e, "history read failed; serving empty log");
            Vec::new()
        }
    };

    let entries = movements.iter().map(dto::movement_to_json).collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::Value::Array(entries))).into_response()
}
