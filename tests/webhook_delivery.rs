//! Alert delivery against a mock webhook, and a full run over a log file.

mod common;

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use bluegreen_watcher::alert::{dispatch_queue, AlertIntent, AlertSink, Dispatcher, WebhookNotifier};
use bluegreen_watcher::config::{NotifierConfig, SourceKind, WatcherConfig};
use bluegreen_watcher::lifecycle;
use bluegreen_watcher::resilience::RetryPolicy;
use bluegreen_watcher::Shutdown;
use common::{access_line, start_mock_webhook, start_programmable_webhook, t0};
use serde_json::Value;

fn fast_retries(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        base_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
    }
}

fn failover() -> AlertIntent {
    AlertIntent::Failover {
        from_pool: "blue".to_string(),
        to_pool: "green".to_string(),
        timestamp: t0(),
    }
}

#[tokio::test]
async fn test_webhook_receives_slack_attachment() {
    let webhook = start_mock_webhook().await;
    let notifier = WebhookNotifier::new(webhook.url(), &NotifierConfig::default()).unwrap();

    let (mut queue, rx) = dispatch_queue(8);
    let dispatcher = Dispatcher::new(Arc::new(notifier), rx, fast_retries(1), Duration::from_secs(5));
    let shutdown = Shutdown::new();
    let handle = tokio::spawn(dispatcher.run(shutdown.subscribe()));

    queue.deliver(failover());
    drop(queue);
    let summary = handle.await.unwrap();

    assert_eq!(summary.delivered, 1);
    assert_eq!(summary.failed, 0);

    let bodies = webhook.received();
    assert_eq!(bodies.len(), 1);
    let body: Value = serde_json::from_str(&bodies[0]).unwrap();
    let attachment = &body["attachments"][0];
    assert_eq!(attachment["color"], "danger");
    assert_eq!(attachment["ts"], t0().timestamp());
    let text = attachment["text"].as_str().unwrap();
    assert!(text.contains("*Failover Detected*"));
    assert!(text.contains("*blue* → *green*"));
    assert!(text.contains("docker logs app_blue"));
}

#[tokio::test]
async fn test_transient_webhook_failures_are_retried() {
    let webhook = start_programmable_webhook(|call| async move {
        if call < 2 { 503 } else { 200 }
    })
    .await;
    let notifier = WebhookNotifier::new(webhook.url(), &NotifierConfig::default()).unwrap();

    let (mut queue, rx) = dispatch_queue(8);
    let dispatcher = Dispatcher::new(Arc::new(notifier), rx, fast_retries(3), Duration::from_secs(5));
    let handle = tokio::spawn(dispatcher.run(Shutdown::new().subscribe()));

    queue.deliver(failover());
    drop(queue);
    let summary = handle.await.unwrap();

    assert_eq!(summary.delivered, 1);
    assert_eq!(webhook.received().len(), 1);
}

#[tokio::test]
async fn test_exhausted_retries_count_as_failed() {
    let webhook = start_programmable_webhook(|_| async { 500 }).await;
    let notifier = WebhookNotifier::new(webhook.url(), &NotifierConfig::default()).unwrap();

    let (mut queue, rx) = dispatch_queue(8);
    let dispatcher = Dispatcher::new(Arc::new(notifier), rx, fast_retries(2), Duration::from_secs(5));
    let handle = tokio::spawn(dispatcher.run(Shutdown::new().subscribe()));

    queue.deliver(failover());
    drop(queue);
    let summary = handle.await.unwrap();

    assert_eq!(summary.delivered, 0);
    assert_eq!(summary.failed, 1);
    assert!(webhook.received().is_empty());
}

#[tokio::test]
async fn test_full_run_over_log_file() {
    let webhook = start_mock_webhook().await;

    let mut log = tempfile::NamedTempFile::new().unwrap();
    for _ in 0..20 {
        writeln!(log, "{}", access_line("blue", 200)).unwrap();
    }
    writeln!(log, "2025/10/30 12:00:01 [warn] upstream timed out").unwrap();
    for _ in 0..20 {
        writeln!(log, "{}", access_line("green", 200)).unwrap();
    }
    log.flush().unwrap();

    let mut config = WatcherConfig::default();
    config.source.kind = SourceKind::File;
    config.source.path = Some(log.path().display().to_string());
    config.source.from_start = true;
    config.source.poll_interval_ms = 20;
    config.notifier.webhook_url = Some(webhook.url());

    let shutdown = Shutdown::new();
    let run = tokio::spawn(lifecycle::run(config, shutdown.clone()));

    assert!(webhook.wait_for(1, Duration::from_secs(5)).await, "no alert delivered");
    shutdown.trigger();
    let summary = run.await.unwrap().unwrap();

    // shutdown may land before the tail of the file is consumed
    assert!(summary.pipeline.records >= 21);
    assert!(summary.pipeline.lines > summary.pipeline.records);
    assert_eq!(summary.pipeline.alerts_admitted, 1);
    assert_eq!(summary.dispatch.delivered, 1);

    let body: Value = serde_json::from_str(&webhook.received()[0]).unwrap();
    let text = body["attachments"][0]["text"].as_str().unwrap();
    assert!(text.contains("Pool switched from *blue* → *green*"));
}
