use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::batch::types::BatchReport;
use crate::record::Record;
use crate::util::time;

pub mod layout;
#[cfg(test)]
pub mod memory;

use layout::Layout;

// Artifact documents

#[derive(Serialize)]
pub struct RawArtifact<'a> {
    pub user_input: &'a str,
    pub resource_type: &'static str,
    pub request_url: &'a str,
    pub timestamp: DateTime<Utc>,
    pub raw_response: &'a Value,
}

#[derive(Serialize)]
pub struct ErrorArtifact<'a> {
    pub error: &'a str,
    pub query: &'a str,
    pub resource_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Response text that could not be decoded as JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<&'a str>,
}

#[derive(Serialize)]
pub struct ProcessedArtifact {
    pub processed_data: Record,
}

/// Where lookup and batch artifacts go. Callers treat every write as best effort.
pub trait ArtifactSink: Send + Sync {
    fn save_raw(&self, artifact: &RawArtifact<'_>) -> Result<PathBuf>;
    fn save_processed(&self, record: &Record) -> Result<PathBuf>;
    fn save_error(&self, artifact: &ErrorArtifact<'_>) -> Result<PathBuf>;
    fn save_report(&self, report: &BatchReport) -> Result<PathBuf>;
}

/// Log a failed write and keep going.
pub fn settle(kind: &str, res: Result<PathBuf>) -> Option<PathBuf> {
    match res {
        Ok(path) => Some(path),
        Err(e) => {
            let detail = format!("{e:#}");
            error!(artifact = kind, error = %detail, "Error saving artifact");
            None
        }
    }
}

/// Pretty JSON files under `<root>/{raw,processed,errors,batch}`.
pub struct FsSink {
    layout: Layout,
}

impl FsSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { layout: Layout::new(root) }
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in self.layout.all_dirs() {
            fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
            tracing::debug!(dir = %dir.display(), "Ensured directory exists");
        }
        Ok(())
    }

    fn write(&self, kind: &str, dir: PathBuf, file_name: String, doc: &impl Serialize) -> Result<PathBuf> {
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        let path = dir.join(file_name);
        let bytes = serde_json::to_vec_pretty(doc).context("serialize artifact")?;
        fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
        info!("Saved {} response to: {}", kind, path.display());
        Ok(path)
    }
}

impl ArtifactSink for FsSink {
    fn save_raw(&self, artifact: &RawArtifact<'_>) -> Result<PathBuf> {
        let name = layout::stamped_file_name(artifact.user_input, &time::now_stamp());
        self.write("raw", self.layout.raw_dir(), name, artifact)
    }

    fn save_processed(&self, record: &Record) -> Result<PathBuf> {
        let doc = ProcessedArtifact { processed_data: record.clone() };
        self.write("processed", self.layout.processed_dir(), layout::processed_file_name(record), &doc)
    }

    fn save_error(&self, artifact: &ErrorArtifact<'_>) -> Result<PathBuf> {
        let name = layout::stamped_file_name(artifact.query, &time::now_stamp());
        self.write("error", self.layout.error_dir(), name, artifact)
    }

    fn save_report(&self, report: &BatchReport) -> Result<PathBuf> {
        let name = layout::report_file_name(&time::now_stamp());
        self.write("batch", self.layout.batch_dir(), name, report)
    }
}
