//! Supplier directory domain module.

pub mod supplier;

pub use supplier::{ContactInfo, NewSupplier, Supplier, SupplierUpdate};
