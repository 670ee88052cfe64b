//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store/client wiring behind `AppServices`
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, routing::post, Extension, Router};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Store selection and the prediction client are environment-driven; with
/// nothing configured this wires the in-memory stores and a disabled
/// prediction client, which is also what the black-box tests run against.
pub async fn build_app(jwt_secret: String) -> Router {
    let services = Arc::new(services::build_services(jwt_secret).await);
    build_app_with(services)
}

/// Build the router on top of pre-wired services (tests use this to inject
/// specific stores or prediction clients).
pub fn build_app_with(services: Arc<services::AppServices>) -> Router {
    let auth_state = middleware::AuthState {
        tokens: services.tokens.clone(),
    };

    // Protected routes: require a valid bearer token.
    let protected = routes::router()
        .layer(Extension(services.clone()))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .layer(Extension(services))
        .merge(protected)
}
