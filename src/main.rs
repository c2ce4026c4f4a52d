use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

mod api;
mod batch;
mod config;
mod lookup;
mod output;
mod record;
mod store;
mod telemetry;
mod util;

use config::AppConfig;

#[derive(Parser)]
#[command(
    name = "teamcraft",
    about = "Teamcraft status/action lookup CLI",
    after_help = "Examples:\n  teamcraft lookup \"Bloodbath\"\n  teamcraft batch ./data/status_list.txt --quiet\n  teamcraft lookup \"Damage Up\" --output ./custom_folder"
)]
struct Cli {
    /// Suppress informational logs
    #[arg(global = true, short, long, default_value_t = false)]
    quiet: bool,
    /// Output root for raw/processed/error/batch artifacts
    #[arg(global = true, short, long)]
    output: Option<PathBuf>,
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(alias = "status")]
    Lookup(lookup::LookupCmd),
    Batch(batch::BatchCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);

    // initialize logging/tracing (stderr). Respect RUST_LOG and TEAMCRAFT_LOG_FORMAT
    telemetry::config::init_tracing(cli.quiet);
    let cfg = AppConfig::load(cli.output, cli.quiet);

    match cli.command {
        Commands::Lookup(args) => lookup::run(&cfg, args).await?,
        Commands::Batch(args) => {
            let cancel = CancellationToken::new();
            let on_ctrl_c = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    on_ctrl_c.cancel();
                }
            });
            batch::run(&cfg, args, cancel).await?
        }
    }

    Ok(())
}
