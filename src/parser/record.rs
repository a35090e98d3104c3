//! Structured request record.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One proxied request, as far as the access log tells us.
///
/// Only built when a pool identifier could be extracted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestRecord {
    /// Pool that served the request (e.g. `blue`, `green`).
    pub pool: String,
    /// Status of the first upstream attempt.
    pub upstream_status: Option<u16>,
    /// Raw upstream address list, e.g. `172.18.0.2:3000, 172.18.0.3:3000`.
    pub upstream_addr: Option<String>,
    /// Total request time in seconds.
    pub request_time: Option<f64>,
    /// When the watcher processed the line.
    pub observed_at: DateTime<Utc>,
    /// The original line.
    #[serde(skip)]
    pub raw: String,
}

impl RequestRecord {
    /// True when the first upstream attempt answered 5xx.
    pub fn is_upstream_error(&self) -> bool {
        matches!(self.upstream_status, Some(status) if status >= 500)
    }
}
