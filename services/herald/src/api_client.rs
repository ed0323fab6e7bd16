//! Review status API client

use std::sync::Arc;

use serde_json::Value;

use crate::config::ApiConfig;
use crate::io::HttpClient;

/// Client for the review status endpoint
pub struct ReviewApiClient {
    endpoint: String,
    token: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for ReviewApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewApiClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl ReviewApiClient {
    pub fn new(config: &ApiConfig, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created ReviewApiClient for {}", config.endpoint);

        Self {
            endpoint: config.endpoint.clone(),
            token: config.token.clone(),
            http,
        }
    }

    /// Fetch the status updates recorded after the given watermark
    pub async fn fetch(&self, since: u64) -> crate::Result<Value> {
        let url = format!("{}?from_date={}", self.endpoint, since);
        let auth = format!("OAuth {}", self.token);
        tracing::debug!("Polling {}", url);

        let response = self.http.get(&url, &[("Authorization", &auth)]).await?;

        if response.status != 200 {
            return Err(crate::HeraldError::Http(format!(
                "Status endpoint returned status {}: {}",
                response.status, response.body
            )));
        }

        let payload: Value = serde_json::from_str(&response.body)?;
        Ok(payload)
    }

    /// Probe the endpoint once with a zero watermark, discarding the payload.
    /// Part of the startup precondition check.
    pub async fn verify(&self) -> crate::Result<()> {
        self.fetch(0).await.map_err(|e| {
            crate::HeraldError::Config(format!("Status endpoint rejected the API token: {}", e))
        })?;
        Ok(())
    }
}
