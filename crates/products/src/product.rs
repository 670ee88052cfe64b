use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use aiventory_core::{DomainError, Entity, ProductId, SupplierId};

/// Direction of a stock adjustment request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockAction {
    Add,
    Remove,
}

impl StockAction {
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "add" => Ok(StockAction::Add),
            "remove" => Ok(StockAction::Remove),
            other => Err(DomainError::validation(format!(
                "action must be 'add' or 'remove', got '{other}'"
            ))),
        }
    }
}

/// Catalog product.
///
/// # Invariants
/// - Stock never goes negative through [`Product::apply_stock_action`].
/// - The reorder level is non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub barcode: Option<String>,
    pub category: Option<String>,
    /// Unit price in minor currency units.
    pub unit_price: u64,
    pub stock: i64,
    pub reorder_level: i64,
    pub supplier_id: Option<SupplierId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Product {
    /// Apply a stock adjustment, returning the new stock level.
    ///
    /// The quantity must be positive; removals may not take stock below
    /// zero. The matching ledger entry is appended by the caller — the two
    /// writes are deliberately independent (not atomic).
    pub fn apply_stock_action(
        &mut self,
        action: StockAction,
        quantity: i64,
        now: DateTime<Utc>,
    ) -> Result<i64, DomainError> {
        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        let new_stock = match action {
            StockAction::Add => self.stock + quantity,
            StockAction::Remove => self.stock - quantity,
        };
        if new_stock < 0 {
            return Err(DomainError::invariant("stock cannot go negative"));
        }

        self.stock = new_stock;
        self.updated_at = now;
        Ok(new_stock)
    }

    /// Apply a partial update in place.
    pub fn apply_update(&mut self, update: ProductUpdate, now: DateTime<Utc>) -> Result<(), DomainError> {
        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name cannot be empty"));
            }
            self.name = name.trim().to_string();
        }
        if let Some(barcode) = update.barcode {
            self.barcode = normalize_barcode(barcode)?;
        }
        if let Some(category) = update.category {
            let category = category.trim().to_string();
            self.category = if category.is_empty() { None } else { Some(category) };
        }
        if let Some(unit_price) = update.unit_price {
            self.unit_price = unit_price;
        }
        if let Some(reorder_level) = update.reorder_level {
            if reorder_level < 0 {
                return Err(DomainError::validation("reorder level cannot be negative"));
            }
            self.reorder_level = reorder_level;
        }
        if let Some(supplier_id) = update.supplier_id {
            self.supplier_id = supplier_id;
        }
        self.updated_at = now;
        Ok(())
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub barcode: Option<String>,
    pub category: Option<String>,
    pub unit_price: u64,
    pub initial_stock: i64,
    pub reorder_level: i64,
    pub supplier_id: Option<SupplierId>,
}

impl NewProduct {
    /// Validate and materialize a product.
    pub fn into_product(self, now: DateTime<Utc>) -> Result<Product, DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.initial_stock < 0 {
            return Err(DomainError::validation("initial stock cannot be negative"));
        }
        if self.reorder_level < 0 {
            return Err(DomainError::validation("reorder level cannot be negative"));
        }

        Ok(Product {
            id: ProductId::new(),
            name: self.name.trim().to_string(),
            barcode: normalize_barcode(self.barcode)?,
            category: self
                .category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            unit_price: self.unit_price,
            stock: self.initial_stock,
            reorder_level: self.reorder_level,
            supplier_id: self.supplier_id,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial product update; `None` leaves a field untouched. The nested
/// options on `barcode` and `supplier_id` allow explicit clearing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub barcode: Option<Option<String>>,
    pub category: Option<String>,
    pub unit_price: Option<u64>,
    pub reorder_level: Option<i64>,
    pub supplier_id: Option<Option<SupplierId>>,
}

fn normalize_barcode(barcode: Option<String>) -> Result<Option<String>, DomainError> {
    match barcode {
        None => Ok(None),
        Some(code) => {
            let code = code.trim().to_string();
            if code.is_empty() {
                return Err(DomainError::validation("barcode cannot be blank"));
            }
            Ok(Some(code))
        }
    }
}
