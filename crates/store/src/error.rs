use thiserror::Error;

/// Persistence-layer error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed row does not exist.
    #[error("not found")]
    NotFound,

    /// A uniqueness guarantee was violated (barcode, invoice number,
    /// username).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Driver/connection/decoding failure.
    #[error("database error: {0}")]
    Database(String),
}
