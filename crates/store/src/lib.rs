//! `aiventory-store` — persistence boundary.
//!
//! Async repository traits plus two implementations: in-memory (dev/test)
//! and Postgres (sqlx). Each write is a single statement; there is no
//! cross-repository transaction — in particular a stock update and its
//! ledger append are two independent writes by design.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use error::StoreError;
pub use memory::{
    InMemoryInvoiceStore, InMemoryMovementStore, InMemoryProductStore, InMemoryStaffStore,
    InMemorySupplierStore,
};
pub use postgres::{
    PgInvoiceStore, PgMovementStore, PgProductStore, PgStaffStore, PgSupplierStore,
};
pub use repository::{InvoiceStore, MovementStore, ProductStore, StaffStore, SupplierStore};
