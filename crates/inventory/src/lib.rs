//! Inventory domain module.
//!
//! This crate contains the stock movement ledger and the level
//! reconstruction used by the depletion analysis, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod ledger;
pub mod movement;

pub use ledger::{reconstruct_levels, replay_forward, RECONSTRUCTION_WINDOW};
pub use movement::{MovementDirection, NewStockMovement, StockMovement};
