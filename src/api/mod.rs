use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::record::ResourceType;

mod client;
mod error;
#[cfg(test)]
pub mod mock;

pub use client::TeamcraftClient;
pub use error::ApiError;

/// One successful search call: the decoded body plus where and when it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    pub request_url: String,
    pub fetched_at: DateTime<Utc>,
    pub body: Value,
}

impl RawResponse {
    /// First-ranked candidate, if the body is a non-empty array.
    pub fn first_candidate(&self) -> Option<&Value> {
        self.body.as_array().and_then(|items| items.first())
    }

    pub fn is_array(&self) -> bool {
        self.body.is_array()
    }
}

#[async_trait]
pub trait SearchApi: Send + Sync {
    async fn search(&self, query: &str, kind: ResourceType) -> Result<RawResponse, ApiError>;
}
