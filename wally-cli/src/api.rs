use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use wally_types::{ErrorBody, WalletRecord};

/// Path of the generation endpoint on the wally server
pub const WALLET_GEN_PATH: &str = "/api/walletGen";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to wally server failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("wally server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed wallet payload: {0}")]
    Decode(String),
}

/// Anything that can hand out a freshly generated wallet
#[async_trait]
pub trait WalletSource: Send + Sync {
    /// Fetch one wallet; `cache_buster` is sent along to defeat HTTP caches
    async fn fetch_wallet(&self, cache_buster: u64) -> Result<WalletRecord, FetchError>;
}

/// HTTP client for the wally proxy endpoint
pub struct ProxyClient {
    http: Client,
    endpoint: String,
}

impl std::fmt::Debug for ProxyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl ProxyClient {
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build()?;
        let base = server_url.trim_end_matches('/');
        Ok(Self {
            http,
            endpoint: format!("{}{}", base, WALLET_GEN_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl WalletSource for ProxyClient {
    async fn fetch_wallet(&self, cache_buster: u64) -> Result<WalletRecord, FetchError> {
        debug!("GET {}?_={}", self.endpoint, cache_buster);

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("_", cache_buster)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}
