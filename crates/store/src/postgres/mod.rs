//! Postgres-backed stores (sqlx).
//!
//! Every operation is a single statement against the connection pool; the
//! schema (see `schema.sql` at the crate root) enforces the uniqueness
//! guarantees surfaced as [`StoreError::Conflict`].
//!
//! SQLx errors are mapped as follows: unique violations (`23505`) become
//! `Conflict`, everything else becomes `Database` with the operation name
//! attached for diagnostics.

mod invoices;
mod movements;
mod products;
mod staff;
mod suppliers;

pub use invoices::PgInvoiceStore;
pub use movements::PgMovementStore;
pub use products::PgProductStore;
pub use staff::PgStaffStore;
pub use suppliers::PgSupplierStore;

use crate::error::StoreError;

pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.code().as_deref() == Some("23505") {
            return StoreError::Conflict(db_err.message().to_string());
        }
    }
    StoreError::Database(format!("{operation}: {err}"))
}
