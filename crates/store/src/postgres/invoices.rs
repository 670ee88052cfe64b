use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::JsonValue;
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use aiventory_core::InvoiceId;
use aiventory_invoicing::{Invoice, InvoiceLine, InvoiceStatus};

use super::map_sqlx_error;
use crate::error::StoreError;
use crate::repository::InvoiceStore;

/// Postgres invoice store. Lines are kept as a jsonb column so an invoice
/// is written in a single statement.
#[derive(Debug, Clone)]
pub struct PgInvoiceStore {
    pool: PgPool,
}

impl PgInvoiceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct InvoiceRow {
    id: Uuid,
    number: String,
    customer_name: String,
    lines: JsonValue,
    status: String,
    issued_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRow> for Invoice {
    type Error = StoreError;

    fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
        let lines: Vec<InvoiceLine> = serde_json::from_value(row.lines)
            .map_err(|e| StoreError::Database(format!("invoices row decode: {e}")))?;
        let status = InvoiceStatus::parse(&row.status)
            .map_err(|e| StoreError::Database(format!("invoices row decode: {e}")))?;
        Ok(Invoice {
            id: InvoiceId::from_uuid(row.id),
            number: row.number,
            customer_name: row.customer_name,
            lines,
            status,
            issued_at: row.issued_at,
        })
    }
}

const SELECT_COLUMNS: &str = "id, number, customer_name, lines, status, issued_at";

#[async_trait]
impl InvoiceStore for PgInvoiceStore {
    #[instrument(skip(self, invoice), fields(invoice_id = %invoice.id), err)]
    async fn insert(&self, invoice: &Invoice) -> Result<(), StoreError> {
        let lines = serde_json::to_value(&invoice.lines)
            .map_err(|e| StoreError::Database(format!("invoices.insert encode: {e}")))?;

        sqlx::query(
            r#"
            INSERT INTO invoices (id, number, customer_name, lines, status, issued_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(invoice.id.as_uuid())
        .bind(&invoice.number)
        .bind(&invoice.customer_name)
        .bind(lines)
        .bind(invoice.status.as_str())
        .bind(invoice.issued_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("invoices.insert", e))?;
        Ok(())
    }

    #[instrument(skip(self), fields(invoice_id = %id), err)]
    async fn get(&self, id: &InvoiceId) -> Result<Option<Invoice>, StoreError> {
        let row: Option<InvoiceRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM invoices WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("invoices.get", e))?;

        row.map(TryInto::try_into).transpose()
    }

    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<Invoice>, StoreError> {
        let rows: Vec<InvoiceRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM invoices ORDER BY issued_at ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("invoices.list", e))?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
