//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (SLACK_WEBHOOK_URL, WINDOW_SIZE, ...)
//!     → command-line overrides
//!     → validation.rs (semantic checks)
//!     → WatcherConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no runtime reconfiguration
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::WatcherConfig;
pub use schema::DetectionConfig;
pub use schema::SourceConfig;
pub use schema::SourceKind;
pub use schema::NotifierConfig;
pub use schema::ObservabilityConfig;
pub use schema::LogFormat;
