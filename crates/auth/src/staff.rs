use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use aiventory_core::{Entity, StaffId};

use crate::password::hash_password;
use crate::token::AuthError;

/// Staff account.
///
/// # Invariants
/// - Username is non-empty and stored lowercased.
/// - Only the bcrypt hash of the password is ever held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub username: String,
    pub display_name: String,
    pub role: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for Staff {
    type Id = StaffId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Input for registering a staff account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStaff {
    pub username: String,
    pub display_name: String,
    #[serde(default = "default_role")]
    pub role: String,
    pub password: String,
}

fn default_role() -> String {
    "staff".to_string()
}

impl NewStaff {
    /// Validate, hash the password, and materialize the account.
    pub fn into_staff(self, now: DateTime<Utc>) -> Result<Staff, AuthError> {
        if self.username.trim().is_empty() {
            return Err(AuthError::Validation("username cannot be empty".to_string()));
        }
        if self.password.len() < 8 {
            return Err(AuthError::Validation(
                "password must be at least 8 characters".to_string(),
            ));
        }

        let password_hash = hash_password(&self.password)?;
        Ok(Staff {
            id: StaffId::new(),
            username: self.username.trim().to_lowercase(),
            display_name: if self.display_name.trim().is_empty() {
                self.username.trim().to_string()
            } else {
                self.display_name.trim().to_string()
            },
            role: self.role,
            password_hash,
            created_at: now,
        })
    }
}
