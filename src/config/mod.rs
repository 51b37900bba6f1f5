//! Runtime settings for the `titer` binary.
//!
//! Values come from the environment (a `.env` file is honored):
//!
//! | Variable           | Values              | Default   |
//! |--------------------|---------------------|-----------|
//! | `TITER_OUTPUT`     | `text`, `json`      | `text`    |
//! | `TITER_LOG_FORMAT` | `compact`, `json`   | `compact` |
//! | `TITER_LOG`        | `EnvFilter` syntax  | unset     |
//!
//! The engine itself takes no configuration.

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub output: OutputFormat,
    pub log_format: LogFormat,
    /// Explicit tracing filter; falls back to `RUST_LOG`, then the built-in default.
    pub log_filter: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: OutputFormat::Text,
            log_format: LogFormat::Compact,
            log_filter: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        if let Some(raw) = lookup("TITER_OUTPUT") {
            settings.output = parse_choice("TITER_OUTPUT", &raw)?;
        }
        if let Some(raw) = lookup("TITER_LOG_FORMAT") {
            settings.log_format = parse_choice("TITER_LOG_FORMAT", &raw)?;
        }
        if let Some(raw) = lookup("TITER_LOG").filter(|s| !s.trim().is_empty()) {
            EnvFilter::try_new(&raw).map_err(|e| AppError::new(2, format!("Invalid TITER_LOG='{raw}': {e}.")))?;
            settings.log_filter = Some(raw);
        }
        Ok(settings)
    }
}

fn parse_choice<T: ValueEnum>(key: &str, raw: &str) -> Result<T, AppError> {
    T::from_str(raw.trim(), true).map_err(|_| {
        let allowed: Vec<String> = T::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect();
        AppError::new(
            2,
            format!("Invalid {key}='{raw}' (expected one of: {}).", allowed.join(", ")),
        )
    })
}
