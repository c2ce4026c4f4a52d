use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::Instrument;

use crate::api::{ApiError, RawResponse, SearchApi};
use crate::record::{normalize, Record, ResourceType, RESOLUTION_ORDER};
use crate::store::{settle, ArtifactSink, ErrorArtifact, RawArtifact};
use crate::telemetry::{self, ctx::LogCtx};
use crate::telemetry::ops::lookup::{Lookup, Phase as LookupPhase};

const NO_RESPONSE: &str = "No response from API";
const UNEXPECTED_FORMAT: &str = "Unexpected response format";

#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult {
    Found { kind: ResourceType, record: Record },
    NotFound,
}

impl LookupResult {
    pub fn record(&self) -> Option<&Record> {
        match self {
            LookupResult::Found { record, .. } => Some(record),
            LookupResult::NotFound => None,
        }
    }

    pub fn kind(&self) -> Option<ResourceType> {
        match self {
            LookupResult::Found { kind, .. } => Some(*kind),
            LookupResult::NotFound => None,
        }
    }
}

// {"type": "status", "data": {...}} or null
impl Serialize for LookupResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LookupResult::Found { kind, record } => {
                let mut st = serializer.serialize_struct("LookupResult", 2)?;
                st.serialize_field("type", kind)?;
                st.serialize_field("data", record)?;
                st.end()
            }
            LookupResult::NotFound => serializer.serialize_none(),
        }
    }
}

/// Tries each resource type in order for one name, persisting every attempt.
pub struct Resolver<'a> {
    api: &'a dyn SearchApi,
    sink: &'a dyn ArtifactSink,
    order: &'a [ResourceType],
    log: LogCtx<Lookup>,
}

impl<'a> Resolver<'a> {
    pub fn new(api: &'a dyn SearchApi, sink: &'a dyn ArtifactSink) -> Self {
        Self { api, sink, order: &RESOLUTION_ORDER, log: telemetry::lookup() }
    }

    #[cfg(test)]
    pub fn with_order(mut self, order: &'a [ResourceType]) -> Self {
        self.order = order;
        self
    }

    pub async fn resolve(&self, name: &str) -> LookupResult {
        let span = self.log.root_span_kv([("query", name.to_string())]);
        async {
            for &kind in self.order {
                if let Some(record) = self.attempt(name, kind).await {
                    self.log.found(name, kind);
                    return LookupResult::Found { kind, record };
                }
                self.log.no_match(name, kind);
            }
            self.log.not_found(name);
            LookupResult::NotFound
        }
        .instrument(span)
        .await
    }

    async fn attempt(&self, name: &str, kind: ResourceType) -> Option<Record> {
        let fetch_span = self.log.span_kv(&LookupPhase::Fetch, [("type", kind.to_string())]);
        let fetched = self.api.search(name, kind).instrument(fetch_span).await;

        match fetched {
            Ok(raw) => self.accept(name, kind, &raw),
            Err(err) => {
                self.reject(name, kind, &err);
                None
            }
        }
    }

    fn accept(&self, name: &str, kind: ResourceType, raw: &RawResponse) -> Option<Record> {
        let _p = self.log.span(&LookupPhase::Persist).entered();
        settle("raw", self.sink.save_raw(&RawArtifact {
            user_input: name,
            resource_type: kind.as_api_str(),
            request_url: &raw.request_url,
            timestamp: raw.fetched_at,
            raw_response: &raw.body,
        }));

        if !raw.is_array() {
            self.log.warn("Empty or unexpected response format.");
            self.save_error(name, kind, UNEXPECTED_FORMAT, None, None);
            return None;
        }

        let Some(candidate) = raw.first_candidate() else {
            self.save_error(name, kind, kind.empty_reason(), None, None);
            return None;
        };

        let record = {
            let _n = self.log.span(&LookupPhase::Normalize).entered();
            normalize(candidate, kind, name)
        };
        settle("processed", self.sink.save_processed(&record));
        Some(record)
    }

    fn reject(&self, name: &str, kind: ResourceType, err: &ApiError) {
        let _p = self.log.span(&LookupPhase::Persist).entered();
        let reason = if err.is_network() { NO_RESPONSE } else { UNEXPECTED_FORMAT };
        self.log.warn_kv(&format!("{reason}: {err}"), [("query", name.to_string()), ("type", kind.to_string())]);
        self.save_error(name, kind, reason, Some(err.to_string()), err.body());
    }

    fn save_error(&self, name: &str, kind: ResourceType, reason: &str, detail: Option<String>, raw_response: Option<&str>) {
        settle("error", self.sink.save_error(&ErrorArtifact {
            error: reason,
            query: name,
            resource_type: kind.as_api_str(),
            detail,
            raw_response,
        }));
    }
}
