use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use aiventory_core::{DomainError, Entity, MovementId, ProductId, StaffId};

/// Direction of a stock movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementDirection {
    In,
    Out,
}

impl MovementDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementDirection::In => "in",
            MovementDirection::Out => "out",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "in" => Ok(MovementDirection::In),
            "out" => Ok(MovementDirection::Out),
            other => Err(DomainError::validation(format!(
                "movement direction must be 'in' or 'out', got '{other}'"
            ))),
        }
    }

    /// Signed contribution of a movement to the stock level.
    pub fn signum(&self) -> i64 {
        match self {
            MovementDirection::In => 1,
            MovementDirection::Out => -1,
        }
    }
}

impl core::fmt::Display for MovementDirection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the append-only stock movement ledger.
///
/// Entries are immutable once created; they are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: MovementId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
    pub direction: MovementDirection,
    /// Unsigned quantity; the sign is carried by `direction`.
    pub quantity: i64,
    pub actor_id: Option<StaffId>,
    pub actor_name: Option<String>,
    pub action: Option<String>,
}

impl StockMovement {
    /// Signed stock delta of this movement.
    pub fn delta(&self) -> i64 {
        self.direction.signum() * self.quantity
    }

    /// Preformatted quantity for display ("+20" / "-5").
    pub fn quantity_display(&self) -> String {
        match self.direction {
            MovementDirection::In => format!("+{}", self.quantity),
            MovementDirection::Out => format!("-{}", self.quantity),
        }
    }
}

impl Entity for StockMovement {
    type Id = MovementId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Input for appending a movement to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStockMovement {
    pub product_id: ProductId,
    pub direction: MovementDirection,
    pub quantity: i64,
    pub reason: Option<String>,
    pub actor_id: Option<StaffId>,
    pub actor_name: Option<String>,
}

impl NewStockMovement {
    /// Validate and materialize a ledger entry.
    pub fn into_movement(self, occurred_at: DateTime<Utc>) -> Result<StockMovement, DomainError> {
        if self.quantity <= 0 {
            return Err(DomainError::validation("movement quantity must be positive"));
        }

        Ok(StockMovement {
            id: MovementId::new(),
            product_id: self.product_id,
            occurred_at,
            direction: self.direction,
            quantity: self.quantity,
            actor_id: self.actor_id,
            actor_name: self.actor_name,
            action: self.reason,
        })
    }
}
