//! Alerting subsystem.
//!
//! # Data Flow
//! ```text
//! Detectors emit AlertIntent
//!     → audit record (always)
//!     → gate.rs (maintenance mode: Send | Suppressed)
//!     → sink.rs (non-blocking hand-off, bounded queue)
//!     → dispatcher.rs (async task: timeout + retry)
//!     → notifier.rs (webhook POST or console)
//! ```
//!
//! # Design Decisions
//! - Intents are fire-and-forget; delivery outcome never feeds back
//! - Cooldowns live in the detectors, not here
//! - Queue overflow drops notifications, never lines

pub mod dispatcher;
pub mod gate;
pub mod message;
pub mod notifier;
pub mod sink;
pub mod types;

pub use dispatcher::{DispatchSummary, Dispatcher};
pub use gate::{Admission, AlertGate};
pub use notifier::{ConsoleNotifier, Notifier, WebhookNotifier};
pub use sink::{dispatch_queue, AlertSink, DispatchQueue};
pub use types::{AlertIntent, AlertKind, Severity};
