//! Invoicing domain module.

pub mod invoice;

pub use invoice::{Invoice, InvoiceLine, InvoiceStatus, NewInvoice, NewInvoiceLine};
