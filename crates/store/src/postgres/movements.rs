use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use aiventory_core::{MovementId, ProductId};
use aiventory_inventory::{MovementDirection, StockMovement};

use super::map_sqlx_error;
use crate::error::StoreError;
use crate::repository::MovementStore;

/// Postgres stock movement ledger (append-only table).
#[derive(Debug, Clone)]
pub struct PgMovementStore {
    pool: PgPool,
}

impl PgMovementStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MovementRow {
    id: Uuid,
    product_id: Uuid,
    occurred_at: DateTime<Utc>,
    direction: String,
    quantity: i64,
    actor_id: Option<Uuid>,
    actor_name: Option<String>,
    action: Option<String>,
}

impl TryFrom<MovementRow> for StockMovement {
    type Error = StoreError;

    fn try_from(row: MovementRow) -> Result<Self, Self::Error> {
        let direction = MovementDirection::parse(&row.direction)
            .map_err(|e| StoreError::Database(format!("movements row decode: {e}")))?;
        Ok(StockMovement {
            id: MovementId::from_uuid(row.id),
            product_id: ProductId::from_uuid(row.product_id),
            occurred_at: row.occurred_at,
            direction,
            quantity: row.quantity,
            actor_id: row.actor_id.map(Into::into),
            actor_name: row.actor_name,
            action: row.action,
        })
    }
}

#[async_trait]
impl MovementStore for PgMovementStore {
    #[instrument(skip(self, movement), fields(product_id = %movement.product_id), err)]
    async fn append(&self, movement: &StockMovement) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO stock_movements
                (id, product_id, occurred_at, direction, quantity, actor_id, actor_name, action)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(movement.id.as_uuid())
        .bind(movement.product_id.as_uuid())
        .bind(movement.occurred_at)
        .bind(movement.direction.as_str())
        .bind(movement.quantity)
        .bind(movement.actor_id.map(Uuid::from))
        .bind(&movement.actor_name)
        .bind(&movement.action)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("movements.append", e))?;
        Ok(())
    }

    #[instrument(skip(self), fields(product_id = %product_id), err)]
    async fn list_for_product(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<StockMovement>, StoreError> {
        let rows: Vec<MovementRow> = sqlx::query_as(
            r#"
            SELECT id, product_id, occurred_at, direction, quantity, actor_id, actor_name, action
            FROM stock_movements
            WHERE product_id = $1
            ORDER BY occurred_at DESC, id DESC
            "#,
        )
        .bind(product_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("movements.list_for_product", e))?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
