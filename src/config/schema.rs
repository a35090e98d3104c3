//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the watcher.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Placeholder fragment shipped in sample `.env` files.
pub const WEBHOOK_PLACEHOLDER: &str = "YOUR/WEBHOOK/URL";

/// Root configuration for the log watcher.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WatcherConfig {
    /// Detector thresholds and alert policy.
    pub detection: DetectionConfig,

    /// Where access-log lines come from.
    pub source: SourceConfig,

    /// Alert delivery settings.
    pub notifier: NotifierConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// Detector configuration. Read once at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// 5xx percentage above which an error-rate alert fires.
    pub error_rate_threshold_percent: f64,

    /// Number of most recent requests kept for rate computation.
    pub window_size: usize,

    /// Minimum seconds between two alerts of the same category.
    pub cooldown_secs: u64,

    /// Suppress every alert while true.
    pub maintenance_mode: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            error_rate_threshold_percent: 2.0,
            window_size: 200,
            cooldown_secs: 300,
            maintenance_mode: false,
        }
    }
}

/// Kind of line source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Tail a growing file.
    File,
    /// Read standard input until EOF.
    Stdin,
    /// Follow the output of a child process.
    #[default]
    Command,
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(SourceKind::File),
            "stdin" => Ok(SourceKind::Stdin),
            "command" => Ok(SourceKind::Command),
            other => Err(format!("unknown source kind: {}", other)),
        }
    }
}

/// Line source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,

    /// Log file to tail (file source).
    pub path: Option<String>,

    /// Program to follow (command source).
    pub program: Option<String>,

    /// Arguments for `program`.
    pub args: Vec<String>,

    /// How often a tailed file is checked for growth.
    pub poll_interval_ms: u64,

    /// Delay between attempts to open a missing file.
    pub missing_file_retry_ms: u64,

    /// Read a tailed file from the beginning instead of the end.
    pub from_start: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Command,
            path: None,
            program: Some("docker".to_string()),
            args: vec![
                "logs".to_string(),
                "-f".to_string(),
                "--tail".to_string(),
                "0".to_string(),
                "nginx_proxy".to_string(),
            ],
            poll_interval_ms: 250,
            missing_file_retry_ms: 1000,
            from_start: false,
        }
    }
}

/// Alert delivery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Slack-compatible incoming webhook. Console only when unset.
    pub webhook_url: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Delivery attempts per alert, including the first.
    pub max_attempts: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,

    /// Alerts waiting for delivery before new ones are dropped.
    pub queue_capacity: usize,

    /// Attachment title.
    pub title: String,

    /// Attachment footer.
    pub footer: String,
}

impl NotifierConfig {
    /// The webhook URL, unless it is blank or still the sample placeholder.
    pub fn effective_webhook(&self) -> Option<&str> {
        self.webhook_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty() && !url.contains(WEBHOOK_PLACEHOLDER))
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            timeout_secs: 10,
            max_attempts: 3,
            base_delay_ms: 500,
            max_delay_ms: 5000,
            queue_capacity: 64,
            title: "🚨 Blue/Green Deployment Alert".to_string(),
            footer: "Nginx Log Watcher".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9100".to_string(),
        }
    }
}
