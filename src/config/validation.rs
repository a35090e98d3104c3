//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (threshold >= 0, bounded window and cooldown,
//!   attempts >= 1)
//! - Check that the selected source has what it needs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: WatcherConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::{SourceKind, WatcherConfig};

/// Largest accepted window. Each slot holds one parsed request.
pub const MAX_WINDOW_SIZE: usize = 100_000;

/// Largest accepted cooldown: ten years.
pub const MAX_COOLDOWN_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a fully-assembled configuration.
pub fn validate_config(config: &WatcherConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let detection = &config.detection;
    let threshold = detection.error_rate_threshold_percent;
    if !threshold.is_finite() || threshold < 0.0 {
        errors.push(ValidationError::new(
            "detection.error_rate_threshold_percent",
            format!("must be a non-negative number, got {}", threshold),
        ));
    }
    if detection.window_size == 0 || detection.window_size > MAX_WINDOW_SIZE {
        errors.push(ValidationError::new(
            "detection.window_size",
            format!("must be between 1 and {}, got {}", MAX_WINDOW_SIZE, detection.window_size),
        ));
    }
    if detection.cooldown_secs > MAX_COOLDOWN_SECS {
        errors.push(ValidationError::new(
            "detection.cooldown_secs",
            format!("must be at most {}, got {}", MAX_COOLDOWN_SECS, detection.cooldown_secs),
        ));
    }

    let source = &config.source;
    match source.kind {
        SourceKind::File if source.path.as_deref().map_or(true, str::is_empty) => {
            errors.push(ValidationError::new(
                "source.path",
                "required when source.kind = \"file\"",
            ));
        }
        SourceKind::Command if source.program.as_deref().map_or(true, str::is_empty) => {
            errors.push(ValidationError::new(
                "source.program",
                "required when source.kind = \"command\"",
            ));
        }
        _ => {}
    }
    if source.poll_interval_ms == 0 {
        errors.push(ValidationError::new(
            "source.poll_interval_ms",
            "must be at least 1",
        ));
    }

    let notifier = &config.notifier;
    if notifier.max_attempts == 0 {
        errors.push(ValidationError::new(
            "notifier.max_attempts",
            "must be at least 1",
        ));
    }
    if notifier.timeout_secs == 0 {
        errors.push(ValidationError::new(
            "notifier.timeout_secs",
            "must be at least 1",
        ));
    }
    if notifier.queue_capacity == 0 {
        errors.push(ValidationError::new(
            "notifier.queue_capacity",
            "must be at least 1",
        ));
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("not a socket address: {}", observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
