use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use aiventory_auth::Staff;
use aiventory_core::StaffId;

use super::map_sqlx_error;
use crate::error::StoreError;
use crate::repository::StaffStore;

/// Postgres staff account store.
#[derive(Debug, Clone)]
pub struct PgStaffStore {
    pool: PgPool,
}

impl PgStaffStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct StaffRow {
    id: Uuid,
    username: String,
    display_name: String,
    role: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<StaffRow> for Staff {
    fn from(row: StaffRow) -> Self {
        Staff {
            id: StaffId::from_uuid(row.id),
            username: row.username,
            display_name: row.display_name,
            role: row.role,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl StaffStore for PgStaffStore {
    #[instrument(skip(self, staff), fields(staff_id = %staff.id), err)]
    async fn insert(&self, staff: &Staff) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO staff (id, username, display_name, role, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(staff.id.as_uuid())
        .bind(&staff.username)
        .bind(&staff.display_name)
        .bind(&staff.role)
        .bind(&staff.password_hash)
        .bind(staff.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("staff.insert", e))?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn find_by_username(&self, username: &str) -> Result<Option<Staff>, StoreError> {
        let row: Option<StaffRow> = sqlx::query_as(
            r#"
            SELECT id, username, display_name, role, password_hash, created_at
            FROM staff
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("staff.find_by_username", e))?;

        Ok(row.map(Into::into))
    }
}
