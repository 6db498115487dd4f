//! HTTP client for the game backend.

use std::env;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::{Result, ServiceError};
use super::wire::{CasesResponse, HealthResponse, OfferResponse, SearchResponse};
use super::{OfferGenerator, PlayerSearch, PoolGenerator};
use crate::core::{Prize, Slot, DEFAULT_POOL_SIZE};
use crate::game::{BankerOffer, OfferRequest};
use crate::pool::CasePool;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the backend lives and how long to wait for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Cases a pool response must contain.
    pub pool_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Read `DEAL_BACKEND_URL` and `DEAL_TIMEOUT_MS`, falling back to the
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var("DEAL_BACKEND_URL") {
            config.base_url = url;
        }
        if let Ok(raw) = env::var("DEAL_TIMEOUT_MS") {
            match raw.parse::<u64>() {
                Ok(ms) => config.timeout = Duration::from_millis(ms),
                Err(_) => warn!(value = %raw, "ignoring invalid DEAL_TIMEOUT_MS"),
            }
        }
        config
    }
}

/// Backend reached over HTTP.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    base_url: String,
    pool_size: usize,
    http: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            base_url,
            pool_size: config.pool_size,
            http,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<bool> {
        let health: HealthResponse = self.get_json("/health", &[]).await?;
        Ok(health.is_ok())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "backend request");
        let res = self.http.get(&url).query(query).send().await?;
        let status = res.status();
        let bytes = res.bytes().await?;
        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait::async_trait]
impl PoolGenerator for HttpBackend {
    async fn generate(&self, seed: u64, slot: Slot) -> Result<CasePool> {
        let query = [("seed", seed.to_string()), ("slot", slot.code().to_string())];
        let response: CasesResponse = self.get_json("/game/cases_by_slot", &query).await?;
        response.into_pool(slot, self.pool_size)
    }
}

#[async_trait::async_trait]
impl OfferGenerator for HttpBackend {
    async fn offer(&self, request: &OfferRequest) -> Result<BankerOffer> {
        let exclude = request
            .excluded_sorted()
            .iter()
            .map(|id| id.raw().to_string())
            .collect::<Vec<_>>()
            .join(",");
        let query = [
            ("slot", request.slot.code().to_string()),
            ("target_tier", request.target_tier.raw().to_string()),
            ("seed", request.seed.to_string()),
            ("exclude", exclude),
        ];
        let response: OfferResponse = self.get_json("/game/banker_offer", &query).await?;
        response.into_offer(request)
    }
}

#[async_trait::async_trait]
impl PlayerSearch for HttpBackend {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Prize>> {
        let params = [("q", query.to_string()), ("limit", limit.to_string())];
        let response: SearchResponse = self.get_json("/players/search", &params).await?;
        Ok(response.into_prizes())
    }
}
