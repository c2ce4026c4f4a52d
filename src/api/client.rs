use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use reqwest::Client as HttpClient;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::time::Instant;
use url::Url;

use crate::config::ApiConfig;
use crate::record::ResourceType;

use super::{ApiError, RawResponse, SearchApi};

/// reqwest-backed search client. Requests are serialized and spaced by `rate_limit_delay`.
pub struct TeamcraftClient {
    http: HttpClient,
    cfg: ApiConfig,
    search_url: Url,
    last_request: Mutex<Option<Instant>>,
}

impl TeamcraftClient {
    /// Fails up front when the configured base URL is unusable.
    pub fn new(cfg: ApiConfig) -> Result<Self, ApiError> {
        let raw = cfg.search_url();
        let search_url = Url::parse(&raw).map_err(|source| ApiError::InvalidBaseUrl { url: raw, source })?;
        let http = HttpClient::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(ApiError::from_reqwest)?;
        Ok(Self { http, cfg, search_url, last_request: Mutex::new(None) })
    }

    pub fn request_url(&self, query: &str, kind: ResourceType) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("type", kind.as_api_str());
        url
    }

    async fn fetch_body(&self, url: Url) -> Result<Bytes, ApiError> {
        let response = self.http.get(url).send().await.map_err(ApiError::from_reqwest)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        response.bytes().await.map_err(ApiError::from_reqwest)
    }
}

#[async_trait]
impl SearchApi for TeamcraftClient {
    async fn search(&self, query: &str, kind: ResourceType) -> Result<RawResponse, ApiError> {
        let url = self.request_url(query, kind);

        // holding the guard keeps at most one request in flight
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            tokio::time::sleep_until(prev + self.cfg.rate_limit_delay).await;
        }

        tracing::debug!(url = %url, "Fetching data");
        let request_url = url.to_string();
        let result = self.fetch_body(url).await;
        *last = Some(Instant::now());
        drop(last);

        let bytes = result?;
        let body: Value = serde_json::from_slice(&bytes).map_err(|e| ApiError::decode(e, &bytes))?;
        Ok(RawResponse { request_url, fetched_at: Utc::now(), body })
    }
}
