use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{bail, Result};

use crate::batch::types::BatchReport;
use crate::record::Record;

use super::{ArtifactSink, ErrorArtifact, RawArtifact};

#[derive(Clone, Debug, PartialEq)]
pub enum Saved {
    Raw { query: String, resource_type: &'static str },
    Processed(Record),
    Error { query: String, resource_type: &'static str, reason: String, raw_response: Option<String> },
    Report(BatchReport),
}

/// Keeps artifacts in memory. With `failing` set every write errors after being recorded.
#[derive(Debug, Default)]
pub struct RecordingSink {
    saved: Mutex<Vec<Saved>>,
    failing: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { failing: true, ..Self::default() }
    }

    pub fn saved(&self) -> Vec<Saved> {
        self.saved.lock().unwrap().clone()
    }

    pub fn reports(&self) -> Vec<BatchReport> {
        self.saved()
            .into_iter()
            .filter_map(|s| match s {
                Saved::Report(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    fn push(&self, item: Saved) -> Result<PathBuf> {
        self.saved.lock().unwrap().push(item);
        if self.failing {
            bail!("disk full");
        }
        Ok(PathBuf::from("memory"))
    }
}

impl ArtifactSink for RecordingSink {
    fn save_raw(&self, artifact: &RawArtifact<'_>) -> Result<PathBuf> {
        self.push(Saved::Raw { query: artifact.user_input.to_string(), resource_type: artifact.resource_type })
    }

    fn save_processed(&self, record: &Record) -> Result<PathBuf> {
        self.push(Saved::Processed(record.clone()))
    }

    fn save_error(&self, artifact: &ErrorArtifact<'_>) -> Result<PathBuf> {
        self.push(Saved::Error {
            query: artifact.query.to_string(),
            resource_type: artifact.resource_type,
            reason: artifact.error.to_string(),
            raw_response: artifact.raw_response.map(str::to_string),
        })
    }

    fn save_report(&self, report: &BatchReport) -> Result<PathBuf> {
        self.push(Saved::Report(report.clone()))
    }
}
