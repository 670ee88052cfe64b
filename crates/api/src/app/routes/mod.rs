use axum::{routing::get, Router};

pub mod auth;
pub mod invoices;
pub mod predictions;
pub mod products;
pub mod suppliers;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/products", products::router())
        .nest("/suppliers", suppliers::router())
        .nest("/invoices", invoices::router())
        .nest("/predictions", predictions::router())
}
