use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use crate::record::ResourceType;

use super::{ApiError, RawResponse, SearchApi};

/// Replays queued bodies in order and records every call.
#[derive(Debug, Default)]
pub struct MockApi {
    responses: Mutex<VecDeque<Result<Value, ApiError>>>,
    calls: Mutex<Vec<(String, ResourceType)>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, resp: Result<Value, ApiError>) {
        self.responses.lock().unwrap().push_back(resp);
    }

    pub fn calls(&self) -> Vec<(String, ResourceType)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchApi for MockApi {
    async fn search(&self, query: &str, kind: ResourceType) -> Result<RawResponse, ApiError> {
        self.calls.lock().unwrap().push((query.to_string(), kind));
        let body = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ApiError::MockQueueEmpty))?;
        Ok(RawResponse {
            request_url: format!("mock://search?query={query}&type={kind}"),
            fetched_at: Utc::now(),
            body,
        })
    }
}
