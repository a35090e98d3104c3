//! Blue/green deployment log watcher.
//!
//! # Architecture Overview
//!
//! ```text
//!   nginx access log                                             Slack-style
//!   (file / stdin / docker logs)                                  webhook
//!          │                                                         ▲
//!          ▼                                                         │
//!   ┌─────────────┐  mpsc   ┌──────────────────────────────┐  mpsc  ┌──────────┐
//!   │   ingest    │────────▶│           pipeline           │───────▶│  alert   │
//!   │ tail/child  │  lines  │ parser → window → failover   │ alerts │dispatcher│
//!   └─────────────┘         │        → error rate → gate   │        └──────────┘
//!                           └──────────────────────────────┘
//!
//!   Cross-cutting: config (TOML + env), observability (tracing, metrics,
//!   audit), resilience (timeout/retry/backoff), lifecycle (signals)
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use bluegreen_watcher::config::loader::load_config;
use bluegreen_watcher::config::{LogFormat, SourceKind};
use bluegreen_watcher::lifecycle::{self, signals, Shutdown};
use bluegreen_watcher::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "bluegreen-watcher")]
#[command(about = "Alerts on blue/green pool failover and upstream error spikes", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults plus environment when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Line source: file, stdin or command.
    #[arg(long)]
    source: Option<SourceKind>,

    /// Log file to tail (implies --source file).
    #[arg(long)]
    path: Option<String>,

    /// Suppress every alert.
    #[arg(long)]
    maintenance: bool,

    /// Log output: pretty or json.
    #[arg(long)]
    log_format: Option<LogFormat>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref(), |config| {
        if let Some(path) = cli.path {
            config.source.kind = SourceKind::File;
            config.source.path = Some(path);
        }
        if let Some(kind) = cli.source {
            config.source.kind = kind;
        }
        if cli.maintenance {
            config.detection.maintenance_mode = true;
        }
        if let Some(format) = cli.log_format {
            config.observability.log_format = format;
        }
    })?;

    logging::init_logging(&config.observability);
    tracing::info!("bluegreen-watcher v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    match lifecycle::run(config, shutdown).await {
        Ok(summary) => {
            tracing::info!(
                lines = summary.pipeline.lines,
                records = summary.pipeline.records,
                alerts = summary.pipeline.alerts_emitted,
                delivered = summary.dispatch.delivered,
                "Watcher stopped"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Fatal error, exiting");
            Err(e.into())
        }
    }
}
