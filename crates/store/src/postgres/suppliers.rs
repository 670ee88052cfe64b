use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use aiventory_core::SupplierId;
use aiventory_suppliers::{ContactInfo, Supplier};

use super::map_sqlx_error;
use crate::error::StoreError;
use crate::repository::SupplierStore;

/// Postgres supplier directory. Contact details are flattened into columns.
#[derive(Debug, Clone)]
pub struct PgSupplierStore {
    pool: PgPool,
}

impl PgSupplierStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SupplierRow {
    id: Uuid,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Supplier {
            id: SupplierId::from_uuid(row.id),
            name: row.name,
            contact: ContactInfo {
                email: row.email,
                phone: row.phone,
                address: row.address,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str = "id, name, email, phone, address, created_at, updated_at";

#[async_trait]
impl SupplierStore for PgSupplierStore {
    #[instrument(skip(self, supplier), fields(supplier_id = %supplier.id), err)]
    async fn insert(&self, supplier: &Supplier) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO suppliers (id, name, email, phone, address, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(supplier.id.as_uuid())
        .bind(&supplier.name)
        .bind(&supplier.contact.email)
        .bind(&supplier.contact.phone)
        .bind(&supplier.contact.address)
        .bind(supplier.created_at)
        .bind(supplier.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("suppliers.insert", e))?;
        Ok(())
    }

    #[instrument(skip(self, supplier), fields(supplier_id = %supplier.id), err)]
    async fn update(&self, supplier: &Supplier) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE suppliers
            SET name = $2, email = $3, phone = $4, address = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(supplier.id.as_uuid())
        .bind(&supplier.name)
        .bind(&supplier.contact.email)
        .bind(&supplier.contact.phone)
        .bind(&supplier.contact.address)
        .bind(supplier.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("suppliers.update", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self), fields(supplier_id = %id), err)]
    async fn delete(&self, id: &SupplierId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("suppliers.delete", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self), fields(supplier_id = %id), err)]
    async fn get(&self, id: &SupplierId) -> Result<Option<Supplier>, StoreError> {
        let row: Option<SupplierRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM suppliers WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("suppliers.get", e))?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<Supplier>, StoreError> {
        let rows: Vec<SupplierRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM suppliers ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("suppliers.list", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
