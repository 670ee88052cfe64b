//! Stock level reconstruction from the movement ledger.
//!
//! The ledger is append-only and carries no starting balance, so historical
//! levels are derived by walking backward from the known current stock.
//! Only the most recent [`RECONSTRUCTION_WINDOW`] movements are considered;
//! periods before the window (or before the product existed in its current
//! form) cannot be reconstructed. When the log is incomplete or disagrees
//! with the current stock, the derived series will simply not match any true
//! historical state. That approximation is accepted and deliberately left
//! uncorrected.

use crate::movement::{MovementDirection, StockMovement};

/// Maximum number of movements considered for reconstruction.
pub const RECONSTRUCTION_WINDOW: usize = 12;

/// Reconstruct a chronological (oldest-first) series of stock levels.
///
/// `movements` must be ordered newest-first, as delivered by the store.
/// For a windowed log of N entries the result has exactly N+1 points: one
/// level before each movement, plus the current stock as the final point.
/// Levels may be transiently negative if the log is inconsistent.
pub fn reconstruct_levels(current_stock: i64, movements: &[StockMovement]) -> Vec<i64> {
    let window = &movements[..movements.len().min(RECONSTRUCTION_WINDOW)];

    let mut running = current_stock;
    let mut levels = Vec::with_capacity(window.len() + 1);

    // Undo each windowed movement, recording the level before it applied.
    for entry in window.iter().rev() {
        match entry.direction {
            MovementDirection::In => running -= entry.quantity,
            MovementDirection::Out => running += entry.quantity,
        }
        levels.push(running);
    }

    levels.reverse();
    levels.push(current_stock);
    levels
}

/// Replay the windowed movements forward from a starting level.
///
/// Applying the signed deltas of the (at most [`RECONSTRUCTION_WINDOW`])
/// newest movements to the first reconstructed level must reproduce the
/// current stock exactly; the tests rely on this closure to validate
/// [`reconstruct_levels`].
pub fn replay_forward(start: i64, movements: &[StockMovement]) -> i64 {
    let window = &movements[..movements.len().min(RECONSTRUCTION_WINDOW)];
    window.iter().rev().fold(start, |level, m| level + m.delta())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::NewStockMovement;
    use aiventory_core::ProductId;
    use chrono::Utc;
    use proptest::prelude::*;

    /// Build a newest-first log from (direction, quantity) pairs.
    fn log(entries: &[(MovementDirection, i64)]) -> Vec<StockMovement> {
        let product_id = ProductId::new();
        entries
            .iter()
            .map(|(direction, quantity)| {
                NewStockMovement {
                    product_id,
                    direction: *direction,
                    quantity: *quantity,
                    reason: None,
                    actor_id: None,
                    actor_name: None,
                }
                .into_movement(Utc::now())
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn literal_scenario_out5_in20() {
        // Stock 45, newest-first log [out 5, in 20].
        let movements = log(&[(MovementDirection::Out, 5), (MovementDirection::In, 20)]);
        let series = reconstruct_levels(45, &movements);
        assert_eq!(series, vec![30, 25, 45]);
    }

    #[test]
    fn empty_log_yields_single_current_point() {
        let series = reconstruct_levels(10, &[]);
        assert_eq!(series, vec![10]);
    }

    #[test]
    fn short_log_uses_all_entries() {
        let movements = log(&[(MovementDirection::In, 3)]);
        let series = reconstruct_levels(7, &movements);
        assert_eq!(series, vec![4, 7]);
    }

    #[test]
    fn long_log_is_capped_at_window() {
        let entries: Vec<(MovementDirection, i64)> =
            (0..20).map(|i| (MovementDirection::In, i + 1)).collect();
        let movements = log(&entries);
        let series = reconstruct_levels(500, &movements);
        assert_eq!(series.len(), RECONSTRUCTION_WINDOW + 1);
        assert_eq!(*series.last().unwrap(), 500);
    }

    #[test]
    fn inconsistent_log_may_go_negative() {
        // More inbound recorded than current stock accounts for; the
        // reconstructed past dips below zero and stays that way.
        let movements = log(&[(MovementDirection::In, 100)]);
        let series = reconstruct_levels(10, &movements);
        assert_eq!(series, vec![-90, 10]);
    }

    fn arb_direction() -> impl Strategy<Value = MovementDirection> {
        prop_oneof![Just(MovementDirection::In), Just(MovementDirection::Out)]
    }

    proptest! {
        #[test]
        fn closure_replay_reproduces_current_stock(
            current_stock in -1_000i64..100_000,
            entries in prop::collection::vec((arb_direction(), 1i64..1_000), 0..40),
        ) {
            let movements = log(&entries);
            let series = reconstruct_levels(current_stock, &movements);

            prop_assert_eq!(replay_forward(series[0], &movements), current_stock);
        }

        #[test]
        fn series_length_is_windowed_n_plus_one(
            current_stock in 0i64..10_000,
            entries in prop::collection::vec((arb_direction(), 1i64..100), 0..40),
        ) {
            let movements = log(&entries);
            let series = reconstruct_levels(current_stock, &movements);

            let expected = movements.len().min(RECONSTRUCTION_WINDOW) + 1;
            prop_assert_eq!(series.len(), expected);
            prop_assert_eq!(*series.last().unwrap(), current_stock);
        }
    }
}
