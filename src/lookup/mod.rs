use anyhow::Result;
use clap::Args;
use std::time::Instant;
use uuid::Uuid;

use crate::api::TeamcraftClient;
use crate::config::AppConfig;
use crate::output::types::Meta;
use crate::store::FsSink;
use crate::telemetry;

pub mod resolver;

pub use resolver::{LookupResult, Resolver};

/// Look up one status (falling back to action) by name
#[derive(Args)]
pub struct LookupCmd {
    /// Status or action name, e.g. "Bloodbath"
    pub name: String,
}

pub async fn run(cfg: &AppConfig, args: LookupCmd) -> Result<()> {
    let t0 = Instant::now();
    let run_id = Uuid::new_v4();
    let log = telemetry::lookup();

    let client = TeamcraftClient::new(cfg.api.clone())?;
    let sink = FsSink::new(&cfg.output_root);
    if let Err(e) = sink.ensure_dirs() {
        log.error(format!("Could not prepare {}: {e:#}", cfg.output_root.display()));
    }

    let result = Resolver::new(&client, &sink).resolve(&args.name).await;

    if let Some(record) = result.record() {
        log.info(serde_json::to_string_pretty(record)?);
    }
    if telemetry::config::json_mode() {
        log.result(&result, Some(Meta::for_run(run_id, t0)))?;
    }
    Ok(())
}
