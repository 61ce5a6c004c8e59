use crate::config::UpstreamConfig;
use crate::error::{AppError, AppResult};
use crate::upstream::cache_buster::CacheBuster;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

/// Path of the generation endpoint on the upstream service
pub const WALLET_GEN_PATH: &str = "/api/walletGen";

/// Client for the upstream wallet-generation service.
///
/// The response body is relayed as-is: it is parsed as JSON only to reject
/// malformed payloads, never checked against the wallet schema.
pub struct UpstreamClient {
    http: Client,
    endpoint: String,
    cache_buster: CacheBuster,
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl UpstreamClient {
    /// Create a new upstream client from config
    pub fn new(config: &UpstreamConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint(WALLET_GEN_PATH),
            cache_buster: CacheBuster::new(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Request a freshly generated wallet, busting any cache on the way
    pub async fn generate_wallet(&self) -> AppResult<Value> {
        let token = self.cache_buster.next();
        self.generate_wallet_with_token(token).await
    }

    /// Request a wallet using an explicit cache-busting token
    pub async fn generate_wallet_with_token(&self, token: u64) -> AppResult<Value> {
        debug!("Requesting wallet from upstream (token={})", token);

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("_", token)])
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| {
                error!("Upstream wallet request failed: {}", e);
                if e.is_timeout() {
                    AppError::UpstreamTimeout
                } else {
                    AppError::UpstreamUnavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Upstream wallet service returned status {}", status);
            return Err(AppError::UpstreamStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| {
            error!("Failed to read upstream response body: {}", e);
            if e.is_timeout() {
                AppError::UpstreamTimeout
            } else {
                AppError::UpstreamUnavailable(e.to_string())
            }
        })?;

        serde_json::from_slice(&body).map_err(|e| {
            error!("Upstream response is not valid JSON: {}", e);
            AppError::UpstreamPayload(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_built_from_config() {
        let client = UpstreamClient::new(&UpstreamConfig {
            url: "http://localhost:8000/".to_string(),
            timeout_secs: 1,
        })
        .unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8000/api/walletGen");
    }
}
