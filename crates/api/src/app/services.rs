use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use aiventory_auth::Hs256TokenCodec;
use aiventory_store::{
    InMemoryInvoiceStore, InMemoryMovementStore, InMemoryProductStore, InMemoryStaffStore,
    InMemorySupplierStore, InvoiceStore, MovementStore, PgInvoiceStore, PgMovementStore,
    PgProductStore, PgStaffStore, PgSupplierStore, ProductStore, StaffStore, SupplierStore,
};

use crate::prediction::{DisabledPredictionClient, HttpPredictionClient, PredictionClient};

/// Issued bearer tokens are valid for this long.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Shared application services, injected into handlers via `Extension`.
pub struct AppServices {
    pub products: Arc<dyn ProductStore>,
    pub movements: Arc<dyn MovementStore>,
    pub suppliers: Arc<dyn SupplierStore>,
    pub invoices: Arc<dyn InvoiceStore>,
    pub staff: Arc<dyn StaffStore>,
    pub predictions: Arc<dyn PredictionClient>,
    pub tokens: Arc<Hs256TokenCodec>,
}

/// Wire stores and clients from the environment.
///
/// `DATABASE_URL` set ⇒ Postgres stores (the pool is shared); otherwise
/// in-memory stores. `PREDICTION_SERVICE_URL` set ⇒ HTTP prediction
/// client; otherwise every prediction resolves to the heuristic fallback.
pub async fn build_services(jwt_secret: String) -> AppServices {
    let tokens = Arc::new(Hs256TokenCodec::new(jwt_secret.as_bytes()));

    let predictions: Arc<dyn PredictionClient> = match std::env::var("PREDICTION_SERVICE_URL") {
        Ok(url) if !url.trim().is_empty() => {
            tracing::info!(url = %url, "using external prediction service");
            Arc::new(HttpPredictionClient::new(url))
        }
        _ => {
            tracing::info!("no prediction service configured; heuristic fallback only");
            Arc::new(DisabledPredictionClient)
        }
    };

    match std::env::var("DATABASE_URL") {
        Ok(database_url) if !database_url.trim().is_empty() => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(&database_url)
                .await
                .unwrap_or_else(|e| panic!("failed to connect to DATABASE_URL: {e}"));
            tracing::info!("using postgres stores");

            AppServices {
                products: Arc::new(PgProductStore::new(pool.clone())),
                movements: Arc::new(PgMovementStore::new(pool.clone())),
                suppliers: Arc::new(PgSupplierStore::new(pool.clone())),
                invoices: Arc::new(PgInvoiceStore::new(pool.clone())),
                staff: Arc::new(PgStaffStore::new(pool)),
                predictions,
                tokens,
            }
        }
        _ => {
            tracing::warn!("DATABASE_URL not set; using volatile in-memory stores");

            AppServices {
                products: Arc::new(InMemoryProductStore::new()),
                movements: Arc::new(InMemoryMovementStore::new()),
                suppliers: Arc::new(InMemorySupplierStore::new()),
                invoices: Arc::new(InMemoryInvoiceStore::new()),
                staff: Arc::new(InMemoryStaffStore::new()),
                predictions,
                tokens,
            }
        }
    }
}
