//! In-memory stores for dev/test.
//!
//! Backed by `RwLock<Vec<_>>`; insertion order is preserved, which gives
//! the same deterministic ordering the Postgres implementations produce
//! with their `ORDER BY` clauses.

use std::sync::RwLock;

use async_trait::async_trait;

use aiventory_auth::Staff;
use aiventory_core::{InvoiceId, ProductId, SupplierId};
use aiventory_inventory::StockMovement;
use aiventory_invoicing::Invoice;
use aiventory_products::Product;
use aiventory_suppliers::Supplier;

use crate::error::StoreError;
use crate::repository::{InvoiceStore, MovementStore, ProductStore, StaffStore, SupplierStore};

fn poisoned() -> StoreError {
    StoreError::Database("store lock poisoned".to_string())
}

#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Vec<Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, product: &Product) -> Result<(), StoreError> {
        let mut rows = self.inner.write().map_err(|_| poisoned())?;
        if let Some(barcode) = &product.barcode {
            if rows.iter().any(|p| p.barcode.as_ref() == Some(barcode)) {
                return Err(StoreError::Conflict(format!("barcode {barcode} already in use")));
            }
        }
        rows.push(product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), StoreError> {
        let mut rows = self.inner.write().map_err(|_| poisoned())?;
        match rows.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => {
                *slot = product.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete(&self, id: &ProductId) -> Result<(), StoreError> {
        let mut rows = self.inner.write().map_err(|_| poisoned())?;
        let before = rows.len();
        rows.retain(|p| p.id != *id);
        if rows.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn get(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        let rows = self.inner.read().map_err(|_| poisoned())?;
        Ok(rows.iter().find(|p| p.id == *id).cloned())
    }

    async fn find_by_barcode(&self, barcode: &str) -> Result<Option<Product>, StoreError> {
        let rows = self.inner.read().map_err(|_| poisoned())?;
        Ok(rows
            .iter()
            .find(|p| p.barcode.as_deref() == Some(barcode))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let rows = self.inner.read().map_err(|_| poisoned())?;
        Ok(rows.clone())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryMovementStore {
    inner: RwLock<Vec<StockMovement>>,
}

impl InMemoryMovementStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MovementStore for InMemoryMovementStore {
    async fn append(&self, movement: &StockMovement) -> Result<(), StoreError> {
        let mut rows = self.inner.write().map_err(|_| poisoned())?;
        rows.push(movement.clone());
        Ok(())
    }

    async fn list_for_product(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<StockMovement>, StoreError> {
        let rows = self.inner.read().map_err(|_| poisoned())?;
        // Appends are chronological, so newest-first is reverse order.
        Ok(rows
            .iter()
            .rev()
            .filter(|m| m.product_id == *product_id)
            .cloned()
            .collect())
    }
}

#[derive(Debug, Default)]
pub struct InMemorySupplierStore {
    inner: RwLock<Vec<Supplier>>,
}

impl InMemorySupplierStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SupplierStore for InMemorySupplierStore {
    async fn insert(&self, supplier: &Supplier) -> Result<(), StoreError> {
        let mut rows = self.inner.write().map_err(|_| poisoned())?;
        rows.push(supplier.clone());
        Ok(())
    }

    async fn update(&self, supplier: &Supplier) -> Result<(), StoreError> {
        let mut rows = self.inner.write().map_err(|_| poisoned())?;
        match rows.iter_mut().find(|s| s.id == supplier.id) {
            Some(slot) => {
                *slot = supplier.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete(&self, id: &SupplierId) -> Result<(), StoreError> {
        let mut rows = self.inner.write().map_err(|_| poisoned())?;
        let before = rows.len();
        rows.retain(|s| s.id != *id);
        if rows.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn get(&self, id: &SupplierId) -> Result<Option<Supplier>, StoreError> {
        let rows = self.inner.read().map_err(|_| poisoned())?;
        Ok(rows.iter().find(|s| s.id == *id).cloned())
    }

    async fn list(&self) -> Result<Vec<Supplier>, StoreError> {
        let rows = self.inner.read().map_err(|_| poisoned())?;
        Ok(rows.clone())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryInvoiceStore {
    inner: RwLock<Vec<Invoice>>,
}

impl InMemoryInvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn insert(&self, invoice: &Invoice) -> Result<(), StoreError> {
        let mut rows = self.inner.write().map_err(|_| poisoned())?;
        if rows.iter().any(|i| i.number == invoice.number) {
            return Err(StoreError::Conflict(format!(
                "invoice number {} already in use",
                invoice.number
            )));
        }
        rows.push(invoice.clone());
        Ok(())
    }

    async fn get(&self, id: &InvoiceId) -> Result<Option<Invoice>, StoreError> {
        let rows = self.inner.read().map_err(|_| poisoned())?;
        Ok(rows.iter().find(|i| i.id == *id).cloned())
    }

    async fn list(&self) -> Result<Vec<Invoice>, StoreError> {
        let rows = self.inner.read().map_err(|_| poisoned())?;
        Ok(rows.clone())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStaffStore {
    inner: RwLock<Vec<Staff>>,
}

impl InMemoryStaffStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StaffStore for InMemoryStaffStore {
    async fn insert(&self, staff: &Staff) -> Result<(), StoreError> {
        let mut rows = self.inner.write().map_err(|_| poisoned())?;
        if rows.iter().any(|s| s.username == staff.username) {
            return Err(StoreError::Conflict(format!(
                "username {} already in use",
                staff.username
            )));
        }
        rows.push(staff.clone());
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Staff>, StoreError> {
        let rows = self.inner.read().map_err(|_| poisoned())?;
        Ok(rows.iter().find(|s| s.username == username).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aiventory_inventory::{MovementDirection, NewStockMovement};
    use aiventory_products::NewProduct;
    use chrono::Utc;

    fn product(name: &str, barcode: Option<&str>) -> Product {
        NewProduct {
            name: name.to_string(),
            barcode: barcode.map(str::to_string),
            category: None,
            unit_price: 100,
            initial_stock: 10,
            reorder_level: 5,
            supplier_id: None,
        }
        .into_product(Utc::now())
        .unwrap()
    }

    #[tokio::test]
    async fn product_crud_round_trip() {
        let store = InMemoryProductStore::new();
        let mut p = product("Beans", Some("123"));
        store.insert(&p).await.unwrap();

        assert_eq!(store.get(&p.id).await.unwrap().unwrap().name, "Beans");
        assert_eq!(
            store.find_by_barcode("123").await.unwrap().unwrap().id,
            p.id
        );

        p.stock = 99;
        store.update(&p).await.unwrap();
        assert_eq!(store.get(&p.id).await.unwrap().unwrap().stock, 99);

        store.delete(&p.id).await.unwrap();
        assert!(store.get(&p.id).await.unwrap().is_none());
        assert!(matches!(
            store.delete(&p.id).await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn duplicate_barcode_conflicts() {
        let store = InMemoryProductStore::new();
        store.insert(&product("A", Some("123"))).await.unwrap();
        assert!(matches!(
            store.insert(&product("B", Some("123"))).await,
            Err(StoreError::Conflict(_))
        ));
        // No barcode never conflicts.
        store.insert(&product("C", None)).await.unwrap();
        store.insert(&product("D", None)).await.unwrap();
    }

    #[tokio::test]
    async fn movements_are_listed_newest_first() {
        let store = InMemoryMovementStore::new();
        let product_id = ProductId::new();

        for (direction, quantity) in [
            (MovementDirection::In, 20),
            (MovementDirection::Out, 5),
        ] {
            let movement = NewStockMovement {
                product_id,
                direction,
                quantity,
                reason: None,
                actor_id: None,
                actor_name: None,
            }
            .into_movement(Utc::now())
            .unwrap();
            store.append(&movement).await.unwrap();
        }

        let listed = store.list_for_product(&product_id).await.unwrap();
        assert_eq!(listed.len(), 2);
        // Appended second, returned first.
        assert_eq!(listed[0].direction, MovementDirection::Out);
        assert_eq!(listed[1].direction, MovementDirection::In);

        let other = store.list_for_product(&ProductId::new()).await.unwrap();
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn staff_usernames_are_unique() {
        let store = InMemoryStaffStore::new();
        let staff = aiventory_auth::NewStaff {
            username: "alice".to_string(),
            display_name: "Alice".to_string(),
            role: "staff".to_string(),
            password: "s3cret-password".to_string(),
        }
        .into_staff(Utc::now())
        .unwrap();

        store.insert(&staff).await.unwrap();
        assert!(matches!(
            store.insert(&staff).await,
            Err(StoreError::Conflict(_))
        ));
        assert!(store.find_by_username("alice").await.unwrap().is_some());
        assert!(store.find_by_username("bob").await.unwrap().is_none());
    }
}
