//! Request DTOs and JSON mapping helpers.
//!
//! Response field names on products and movement history keep the casing
//! the mobile client consumes (`Product_id`, `stock_movement_id`, ...);
//! do not "fix" them.

use serde::Deserialize;
use serde_json::{json, Value};

use aiventory_auth::Staff;
use aiventory_core::{StaffId, SupplierId};
use aiventory_inventory::StockMovement;
use aiventory_invoicing::Invoice;
use aiventory_products::{NewProduct, Product, ProductUpdate};

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub unit_price: u64,
    #[serde(default)]
    pub initial_stock: i64,
    #[serde(default)]
    pub reorder_level: i64,
    #[serde(default)]
    pub supplier_id: Option<SupplierId>,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(body: CreateProductRequest) -> Self {
        NewProduct {
            name: body.name,
            barcode: body.barcode,
            category: body.category,
            unit_price: body.unit_price,
            initial_stock: body.initial_stock,
            reorder_level: body.reorder_level,
            supplier_id: body.supplier_id,
        }
    }
}

/// Absent fields are left untouched. Clearing `barcode`/`supplier_id` is
/// not exposed over the wire.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub barcode: Option<String>,
    pub category: Option<String>,
    pub unit_price: Option<u64>,
    pub reorder_level: Option<i64>,
    pub supplier_id: Option<SupplierId>,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(body: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: body.name,
            barcode: body.barcode.map(Some),
            category: body.category,
            unit_price: body.unit_price,
            reorder_level: body.reorder_level,
            supplier_id: body.supplier_id.map(Some),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StockPatchRequest {
    pub quantity: i64,
    pub action: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub staff_id: Option<StaffId>,
    #[serde(default)]
    pub user_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub fn product_to_json(product: &Product) -> Value {
    json!({
        "Product_id": product.id,
        "Product_name": product.name,
        "barcode": product.barcode,
        "category": product.category,
        "unit_price": product.unit_price,
        "Product_stock": product.stock,
        "reorder_level": product.reorder_level,
        "supplier_id": product.supplier_id,
        "created_at": product.created_at,
        "updated_at": product.updated_at,
    })
}

pub fn movement_to_json(movement: &StockMovement) -> Value {
    json!({
        "stock_movement_id": movement.id,
        "sm_date": movement.occurred_at,
        "stock_movement_type": movement.direction.as_str(),
        "stock_movement_quantity": movement.quantity,
        "user_name": movement.actor_name,
        "action": movement.action,
        "quantity_display": movement.quantity_display(),
    })
}

pub fn invoice_to_json(invoice: &Invoice) -> Value {
    json!({
        "id": invoice.id,
        "number": invoice.number,
        "customer_name": invoice.customer_name,
        "lines": invoice.lines,
        "status": invoice.status,
        "total": invoice.total(),
        "issued_at": invoice.issued_at,
    })
}

/// Staff JSON for auth responses. The password hash never leaves the
/// server.
pub fn staff_to_json(staff: &Staff) -> Value {
    json!({
        "id": staff.id,
        "username": staff.username,
        "display_name": staff.display_name,
        "role": staff.role,
        "created_at": staff.created_at,
    })
}
