use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use aiventory_core::{DomainError, Entity, InvoiceId, ProductId};

/// Invoice lifecycle status.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Issued,
    Paid,
    Void,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Issued => "issued",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Void => "void",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "issued" => Ok(InvoiceStatus::Issued),
            "paid" => Ok(InvoiceStatus::Paid),
            "void" => Ok(InvoiceStatus::Void),
            other => Err(DomainError::validation(format!(
                "unknown invoice status '{other}'"
            ))),
        }
    }
}

/// One invoice line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub line_no: u32,
    pub product_id: ProductId,
    pub description: String,
    pub quantity: i64,
    /// Unit price in minor currency units.
    pub unit_price: u64,
}

impl InvoiceLine {
    pub fn subtotal(&self) -> u64 {
        self.unit_price.saturating_mul(self.quantity.max(0) as u64)
    }
}

/// Customer invoice.
///
/// # Invariants
/// - At least one line; all quantities positive.
/// - A void invoice cannot be marked paid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub number: String,
    pub customer_name: String,
    pub lines: Vec<InvoiceLine>,
    pub status: InvoiceStatus,
    pub issued_at: DateTime<Utc>,
}

impl Entity for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Invoice {
    pub fn total(&self) -> u64 {
        self.lines.iter().map(InvoiceLine::subtotal).sum()
    }

    pub fn mark_paid(&mut self) -> Result<(), DomainError> {
        match self.status {
            InvoiceStatus::Void => Err(DomainError::invariant("cannot pay a void invoice")),
            InvoiceStatus::Paid => Err(DomainError::conflict("invoice already paid")),
            InvoiceStatus::Issued => {
                self.status = InvoiceStatus::Paid;
                Ok(())
            }
        }
    }

    pub fn void(&mut self) -> Result<(), DomainError> {
        if self.status == InvoiceStatus::Paid {
            return Err(DomainError::invariant("cannot void a paid invoice"));
        }
        self.status = InvoiceStatus::Void;
        Ok(())
    }
}

/// Input for one line of a new invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInvoiceLine {
    pub product_id: ProductId,
    pub description: String,
    pub quantity: i64,
    pub unit_price: u64,
}

/// Input for issuing an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInvoice {
    pub number: String,
    pub customer_name: String,
    pub lines: Vec<NewInvoiceLine>,
}

impl NewInvoice {
    pub fn into_invoice(self, now: DateTime<Utc>) -> Result<Invoice, DomainError> {
        if self.number.trim().is_empty() {
            return Err(DomainError::validation("invoice number cannot be empty"));
        }
        if self.customer_name.trim().is_empty() {
            return Err(DomainError::validation("customer name cannot be empty"));
        }
        if self.lines.is_empty() {
            return Err(DomainError::validation("invoice must have at least one line"));
        }

        let mut lines = Vec::with_capacity(self.lines.len());
        for (i, line) in self.lines.into_iter().enumerate() {
            if line.quantity <= 0 {
                return Err(DomainError::validation(format!(
                    "line {} quantity must be positive",
                    i + 1
                )));
            }
            lines.push(InvoiceLine {
                line_no: (i + 1) as u32,
                product_id: line.product_id,
                description: line.description,
                quantity: line.quantity,
                unit_price: line.unit_price,
            });
        }

        Ok(Invoice {
            id: InvoiceId::new(),
            number: self.number.trim().to_string(),
            customer_name: self.customer_name.trim().to_string(),
            lines,
            status: InvoiceStatus::Issued,
            issued_at: now,
        })
    }
}
