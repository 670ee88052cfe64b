//! Repository traits, one per aggregate-like concern.
//!
//! All listing is deterministic: products/suppliers/invoices by creation
//! order, movements newest-first (the order the ledger reconstruction
//! expects).

use async_trait::async_trait;

use aiventory_auth::Staff;
use aiventory_core::{InvoiceId, ProductId, SupplierId};
use aiventory_inventory::StockMovement;
use aiventory_invoicing::Invoice;
use aiventory_products::Product;
use aiventory_suppliers::Supplier;

use crate::error::StoreError;

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a new product. Fails with `Conflict` on duplicate barcode.
    async fn insert(&self, product: &Product) -> Result<(), StoreError>;

    /// Replace an existing product row. Fails with `NotFound` if absent.
    async fn update(&self, product: &Product) -> Result<(), StoreError>;

    async fn delete(&self, id: &ProductId) -> Result<(), StoreError>;

    async fn get(&self, id: &ProductId) -> Result<Option<Product>, StoreError>;

    async fn find_by_barcode(&self, barcode: &str) -> Result<Option<Product>, StoreError>;

    async fn list(&self) -> Result<Vec<Product>, StoreError>;
}

#[async_trait]
pub trait MovementStore: Send + Sync {
    /// Append one ledger entry. Entries are never updated or deleted.
    async fn append(&self, movement: &StockMovement) -> Result<(), StoreError>;

    /// All movements for a product, newest-first.
    async fn list_for_product(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<StockMovement>, StoreError>;
}

#[async_trait]
pub trait SupplierStore: Send + Sync {
    async fn insert(&self, supplier: &Supplier) -> Result<(), StoreError>;

    async fn update(&self, supplier: &Supplier) -> Result<(), StoreError>;

    async fn delete(&self, id: &SupplierId) -> Result<(), StoreError>;

    async fn get(&self, id: &SupplierId) -> Result<Option<Supplier>, StoreError>;

    async fn list(&self) -> Result<Vec<Supplier>, StoreError>;
}

#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Insert a new invoice. Fails with `Conflict` on duplicate number.
    async fn insert(&self, invoice: &Invoice) -> Result<(), StoreError>;

    async fn get(&self, id: &InvoiceId) -> Result<Option<Invoice>, StoreError>;

    async fn list(&self) -> Result<Vec<Invoice>, StoreError>;
}

#[async_trait]
pub trait StaffStore: Send + Sync {
    /// Insert a new staff account. Fails with `Conflict` on duplicate
    /// username.
    async fn insert(&self, staff: &Staff) -> Result<(), StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Staff>, StoreError>;
}
