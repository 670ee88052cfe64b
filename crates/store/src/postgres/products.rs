use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use aiventory_core::ProductId;
use aiventory_products::Product;

use super::map_sqlx_error;
use crate::error::StoreError;
use crate::repository::ProductStore;

/// Postgres product catalog.
#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    barcode: Option<String>,
    category: Option<String>,
    unit_price: i64,
    stock: i64,
    reorder_level: i64,
    supplier_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId::from_uuid(row.id),
            name: row.name,
            barcode: row.barcode,
            category: row.category,
            unit_price: row.unit_price.max(0) as u64,
            stock: row.stock,
            reorder_level: row.reorder_level,
            supplier_id: row.supplier_id.map(Into::into),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str = "id, name, barcode, category, unit_price, stock, reorder_level, supplier_id, created_at, updated_at";

#[async_trait]
impl ProductStore for PgProductStore {
    #[instrument(skip(self, product), fields(product_id = %product.id), err)]
    async fn insert(&self, product: &Product) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO products
                (id, name, barcode, category, unit_price, stock, reorder_level, supplier_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(&product.barcode)
        .bind(&product.category)
        .bind(product.unit_price as i64)
        .bind(product.stock)
        .bind(product.reorder_level)
        .bind(product.supplier_id.map(Uuid::from))
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("products.insert", e))?;
        Ok(())
    }

    #[instrument(skip(self, product), fields(product_id = %product.id), err)]
    async fn update(&self, product: &Product) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, barcode = $3, category = $4, unit_price = $5,
                stock = $6, reorder_level = $7, supplier_id = $8, updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(&product.barcode)
        .bind(&product.category)
        .bind(product.unit_price as i64)
        .bind(product.stock)
        .bind(product.reorder_level)
        .bind(product.supplier_id.map(Uuid::from))
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("products.update", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn delete(&self, id: &ProductId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("products.delete", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn get(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("products.get", e))?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self), err)]
    async fn find_by_barcode(&self, barcode: &str) -> Result<Option<Product>, StoreError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE barcode = $1"
        ))
        .bind(barcode)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("products.find_by_barcode", e))?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM products ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("products.list", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
