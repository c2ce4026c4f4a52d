use anyhow::Result;
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::TeamcraftClient;
use crate::config::AppConfig;
use crate::output::types::Meta;
use crate::store::FsSink;
use crate::telemetry;
use crate::telemetry::ops::batch::Phase as BatchPhase;

pub mod list;
pub mod pipeline;
pub mod progress;
pub mod types;

use pipeline::Pipeline;
use progress::ConsoleProgress;

/// Look up every name listed in a file
#[derive(Args)]
pub struct BatchCmd {
    /// File with one name per line; blank lines and `//` comments are skipped
    pub file: PathBuf,
    /// Only read and deduplicate the list, no API calls
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
    #[arg(long, default_value_t = 10)]
    pub plan_limit: usize,
}

pub async fn run(cfg: &AppConfig, args: BatchCmd, cancel: CancellationToken) -> Result<()> {
    let log = telemetry::batch();
    let run_id = Uuid::new_v4();
    let span = log.root_span_kv([
        ("run_id", run_id.to_string()),
        ("file", args.file.display().to_string()),
        ("dry_run", args.dry_run.to_string()),
        ("output", cfg.output_root.display().to_string()),
    ]);
    run_inner(cfg, args, cancel, run_id).instrument(span).await
}

async fn run_inner(cfg: &AppConfig, args: BatchCmd, cancel: CancellationToken, run_id: Uuid) -> Result<()> {
    let t0 = Instant::now();
    let log = telemetry::batch();
    let source = args.file.display().to_string();

    let queries = {
        let _s = log.span(&BatchPhase::ReadList).entered();
        list::read_list(&args.file)?
    };

    if args.dry_run {
        if telemetry::config::json_mode() {
            let plan = types::BatchPlan {
                source_file: source,
                count: queries.len(),
                sample: queries.iter().take(args.plan_limit).cloned().collect(),
            };
            log.plan(&plan)?;
        } else {
            log.info(format!("📝 Batch plan — {} unique name(s) from {}", queries.len(), source));
            for q in queries.iter().take(args.plan_limit) { log.info(format!("  {}", q)); }
            if queries.len() > args.plan_limit { log.info(format!("  ... ({} more)", queries.len() - args.plan_limit)); }
            log.info("   Run without --dry-run to execute.");
        }
        return Ok(());
    }

    let client = TeamcraftClient::new(cfg.api.clone())?;
    let sink = FsSink::new(&cfg.output_root);
    if let Err(e) = sink.ensure_dirs() {
        log.error(format!("Could not prepare {}: {e:#}", cfg.output_root.display()));
    }

    // progress moves to stderr when stdout carries the JSON envelope
    let out: Box<dyn Write> = if telemetry::config::json_mode() { Box::new(io::stderr()) } else { Box::new(io::stdout()) };
    let mut progress = ConsoleProgress::new(out, cfg.quiet);

    let report = Pipeline::new(&client, &sink, source)
        .with_cancel(cancel)
        .run(&queries, &mut progress)
        .await;

    if telemetry::config::json_mode() {
        log.result(&report, Some(Meta::for_run(run_id, t0)))?;
    }
    Ok(())
}
