//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges)
//!     → audit.rs (one record per emitted alert)
//!
//! Consumers:
//!     → Log aggregation (stdout, docker logs)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Audit records are independent of delivery success
//! - Metrics are cheap (atomic increments)

pub mod audit;
pub mod logging;
pub mod metrics;
