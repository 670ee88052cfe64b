use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use aiventory_core::{DomainError, Entity, SupplierId};

/// Contact details for a supplier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Supplier directory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    pub contact: ContactInfo,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Supplier {
    type Id = SupplierId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Supplier {
    pub fn apply_update(&mut self, update: SupplierUpdate, now: DateTime<Utc>) -> Result<(), DomainError> {
        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name cannot be empty"));
            }
            self.name = name.trim().to_string();
        }
        if let Some(contact) = update.contact {
            validate_contact(&contact)?;
            self.contact = contact;
        }
        self.updated_at = now;
        Ok(())
    }
}

/// Input for registering a supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSupplier {
    pub name: String,
    #[serde(default)]
    pub contact: ContactInfo,
}

impl NewSupplier {
    pub fn into_supplier(self, now: DateTime<Utc>) -> Result<Supplier, DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        validate_contact(&self.contact)?;

        Ok(Supplier {
            id: SupplierId::new(),
            name: self.name.trim().to_string(),
            contact: self.contact,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial supplier update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplierUpdate {
    pub name: Option<String>,
    pub contact: Option<ContactInfo>,
}

fn validate_contact(contact: &ContactInfo) -> Result<(), DomainError> {
    if let Some(email) = &contact.email {
        if !email.contains('@') {
            return Err(DomainError::validation("invalid email format"));
        }
    }
    Ok(())
}
