//! Client for the external depletion-prediction microservice.
//!
//! The service is an opaque HTTP dependency returning a JSON envelope.
//! Every failure mode (transport, non-2xx, undecodable body) collapses to
//! `None`; callers substitute heuristic defaults. Exactly one attempt per
//! request, no retries.

use async_trait::async_trait;

use aiventory_core::ProductId;
use aiventory_forecast::PredictionEnvelope;

#[async_trait]
pub trait PredictionClient: Send + Sync {
    /// Fetch the prediction envelope for a product, or `None` if the call
    /// failed in any way.
    async fn fetch(&self, product_id: &ProductId) -> Option<PredictionEnvelope>;
}

/// Reqwest-backed client talking to `PREDICTION_SERVICE_URL`.
pub struct HttpPredictionClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPredictionClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PredictionClient for HttpPredictionClient {
    async fn fetch(&self, product_id: &ProductId) -> Option<PredictionEnvelope> {
        let url = format!("{}/predict/{}", self.base_url, product_id);

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(%product_id, error = %e, "prediction service unreachable");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(%product_id, status = %response.status(), "prediction service returned an error");
            return None;
        }

        match response.json::<PredictionEnvelope>().await {
            Ok(envelope) => Some(envelope),
            Err(e) => {
                tracing::warn!(%product_id, error = %e, "prediction payload undecodable");
                None
            }
        }
    }
}

/// No-op client used when no service URL is configured (dev/test).
pub struct DisabledPredictionClient;

#[async_trait]
impl PredictionClient for DisabledPredictionClient {
    async fn fetch(&self, _product_id: &ProductId) -> Option<PredictionEnvelope> {
        None
    }
}
