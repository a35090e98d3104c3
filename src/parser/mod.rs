//! Access-log line parsing.
//!
//! # Data Flow
//! ```text
//! raw line ("... pool=blue upstream_status=502, 200 ...")
//!     → line.rs (scan key=value fields)
//!     → RequestRecord (pool + optional status/addr/time)
//!     or None (no pool marker: not a proxied request)
//! ```
//!
//! # Design Decisions
//! - Never fails: anything unusable is `None`
//! - No partial records: without a pool there is no record at all
//! - Retried requests keep only the first upstream status

pub mod line;
pub mod record;

pub use line::parse_line;
pub use record::RequestRecord;
