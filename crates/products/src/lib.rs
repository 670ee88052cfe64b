//! Product catalog domain module.
//!
//! Deterministic domain logic only (no IO, no HTTP, no storage).

pub mod product;

pub use product::{NewProduct, Product, ProductUpdate, StockAction};
