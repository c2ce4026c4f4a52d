use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lookup::LookupResult;
use crate::record::{Record, ResourceType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    #[serde(rename = "total_effects")]
    pub count: usize,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "source_file")]
    pub source: String,
    #[serde(default)]
    pub cancelled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub name: String,
    pub data: Record,
}

/// Aggregate outcome of one batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub metadata: ReportMetadata,
    #[serde(rename = "status_effects")]
    pub statuses: Vec<ReportEntry>,
    pub actions: Vec<ReportEntry>,
    #[serde(rename = "failed_lookups")]
    pub failures: Vec<String>,
}

impl BatchReport {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            metadata: ReportMetadata { count: 0, timestamp: Utc::now(), source: source.into(), cancelled: false },
            statuses: Vec::new(),
            actions: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn add(&mut self, query: &str, result: LookupResult) {
        match result {
            LookupResult::Found { kind: ResourceType::Status, record } => {
                self.statuses.push(ReportEntry { name: query.to_string(), data: record })
            }
            LookupResult::Found { kind: ResourceType::Action, record } => {
                self.actions.push(ReportEntry { name: query.to_string(), data: record })
            }
            LookupResult::NotFound => self.failures.push(query.to_string()),
        }
    }

    pub fn bucket_total(&self) -> usize {
        self.statuses.len() + self.actions.len() + self.failures.len()
    }

    /// Stamp metadata once every processed query has been added.
    pub fn seal(mut self, cancelled: bool) -> Self {
        self.metadata.count = self.bucket_total();
        self.metadata.timestamp = Utc::now();
        self.metadata.cancelled = cancelled;
        self
    }
}

/// `batch --dry-run` output.
#[derive(Debug, Serialize)]
pub struct BatchPlan {
    pub source_file: String,
    pub count: usize,
    pub sample: Vec<String>,
}
