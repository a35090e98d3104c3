//! Startup orchestration.
//!
//! # Responsibilities
//! - Choose the notifier (webhook or console)
//! - Start the dispatcher and the line source as background tasks
//! - Drive the pipeline on the current task until input ends or shutdown
//! - Wind down in order: pipeline, alert queue, dispatcher, source
//!
//! # Design Decisions
//! - Fail fast: a source that dies is fatal
//! - Queued alerts are still delivered after the pipeline stops

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::alert::{dispatch_queue, ConsoleNotifier, DispatchSummary, Dispatcher, Notifier, WebhookNotifier};
use crate::clock::SystemClock;
use crate::config::WatcherConfig;
use crate::error::WatcherResult;
use crate::ingest::LineSource;
use crate::lifecycle::shutdown::Shutdown;
use crate::pipeline::{run_pipeline, Watcher, WatcherStats};
use crate::resilience::RetryPolicy;

/// Lines buffered between the source and the pipeline.
const LINE_QUEUE_CAPACITY: usize = 1024;

/// Totals reported when the watcher stops.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub pipeline: WatcherStats,
    pub dispatch: DispatchSummary,
}

fn build_notifier(config: &WatcherConfig) -> Arc<dyn Notifier> {
    match config.notifier.effective_webhook() {
        Some(url) => match WebhookNotifier::new(url, &config.notifier) {
            Ok(notifier) => Arc::new(notifier),
            Err(e) => {
                tracing::error!(error = %e, "Cannot build webhook client, alerts will be logged only");
                Arc::new(ConsoleNotifier)
            }
        },
        None => {
            tracing::warn!("Webhook URL not configured, alerts will be logged only");
            Arc::new(ConsoleNotifier)
        }
    }
}

/// Run the watcher until the source ends or `shutdown` fires.
pub async fn run(config: WatcherConfig, shutdown: Shutdown) -> WatcherResult<RunSummary> {
    let source = LineSource::from_config(&config.source);
    let detection = &config.detection;

    tracing::info!(
        error_threshold_percent = detection.error_rate_threshold_percent,
        window_size = detection.window_size,
        cooldown_secs = detection.cooldown_secs,
        maintenance_mode = detection.maintenance_mode,
        source = %source.describe(),
        "Log watcher starting"
    );

    let notifier = build_notifier(&config);
    let (queue, alert_rx) = dispatch_queue(config.notifier.queue_capacity);
    let dispatcher = Dispatcher::new(
        notifier,
        alert_rx,
        RetryPolicy::from(&config.notifier),
        Duration::from_secs(config.notifier.timeout_secs),
    );
    let dispatcher_task = tokio::spawn(dispatcher.run(shutdown.subscribe()));

    let (line_tx, line_rx) = mpsc::channel(LINE_QUEUE_CAPACITY);
    let source_task = tokio::spawn(source.run(line_tx, shutdown.subscribe()));

    let watcher = Watcher::new(detection, Arc::new(SystemClock), queue);
    let watcher = run_pipeline(watcher, line_rx, shutdown.subscribe()).await;
    let pipeline = watcher.stats();

    // Dropping the watcher closes the alert queue; the dispatcher exits
    // once everything already queued has been handled.
    drop(watcher);
    let dispatch = dispatcher_task.await?;

    shutdown.trigger();
    source_task.await??;

    Ok(RunSummary { pipeline, dispatch })
}
