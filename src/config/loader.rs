//! Configuration loading from disk and environment.

use std::path::Path;
use std::fs;
use crate::config::schema::WatcherConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, value } => {
                write!(f, "Invalid value for {}: {:?}", var, value)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Environment variables understood by the watcher, as deployed next to
/// the nginx container.
pub mod env {
    pub const WEBHOOK_URL: &str = "SLACK_WEBHOOK_URL";
    pub const ERROR_RATE_THRESHOLD: &str = "ERROR_RATE_THRESHOLD";
    pub const WINDOW_SIZE: &str = "WINDOW_SIZE";
    pub const COOLDOWN_SEC: &str = "ALERT_COOLDOWN_SEC";
    pub const MAINTENANCE_MODE: &str = "MAINTENANCE_MODE";
}

/// Parse a TOML configuration file without validating it.
pub fn read_config(path: &Path) -> Result<WatcherConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Overlay environment variables on top of file values.
///
/// `lookup` abstracts `std::env::var` so tests can supply their own table.
pub fn apply_env_overrides<F>(config: &mut WatcherConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(env::WEBHOOK_URL) {
        config.notifier.webhook_url = Some(url);
    }

    if let Some(raw) = lookup(env::ERROR_RATE_THRESHOLD) {
        config.detection.error_rate_threshold_percent = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Env { var: env::ERROR_RATE_THRESHOLD, value: raw.clone() })?;
    }

    if let Some(raw) = lookup(env::WINDOW_SIZE) {
        config.detection.window_size = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Env { var: env::WINDOW_SIZE, value: raw.clone() })?;
    }

    if let Some(raw) = lookup(env::COOLDOWN_SEC) {
        config.detection.cooldown_secs = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Env { var: env::COOLDOWN_SEC, value: raw.clone() })?;
    }

    // Anything other than a case-insensitive "true" means off.
    if let Some(raw) = lookup(env::MAINTENANCE_MODE) {
        config.detection.maintenance_mode = raw.trim().eq_ignore_ascii_case("true");
    }

    Ok(())
}

/// Load configuration: file (or defaults), then environment, then
/// `overrides` (command-line flags), then validation.
pub fn load_config<F>(path: Option<&Path>, overrides: F) -> Result<WatcherConfig, ConfigError>
where
    F: FnOnce(&mut WatcherConfig),
{
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => WatcherConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    overrides(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
