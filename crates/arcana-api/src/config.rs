//! Server configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use arcana_session::domain::draw::REVERSAL_PROBABILITY;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_INTERPRETATION_TIMEOUT_SECS: u64 = 120;

/// Everything the binary needs to start.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// YAML spread catalog.
    pub spreads_path: PathBuf,
    /// Directory of `<locale>.json` decks.
    pub decks_dir: PathBuf,
    /// Optional YAML persona table; every persona is accepted without one.
    pub personas_path: Option<PathBuf>,
    /// Interpretation service endpoint.
    pub interpretation_url: String,
    pub interpretation_timeout: Duration,
    /// Chance that a drawn card lands reversed when the spread allows it.
    pub reversal_probability: f64,
}

impl ServerConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// As [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AppError::Config(format!("{key} environment variable must be set")))
        };

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };
        let timeout_secs = match lookup("INTERPRETATION_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|e| {
                AppError::Config(format!("INTERPRETATION_TIMEOUT_SECS must be whole seconds: {e}"))
            })?,
            None => DEFAULT_INTERPRETATION_TIMEOUT_SECS,
        };
        let reversal_probability = match lookup("REVERSAL_PROBABILITY") {
            Some(raw) => raw
                .parse::<f64>()
                .ok()
                .filter(|p| (0.0..=1.0).contains(p))
                .ok_or_else(|| {
                    AppError::Config(format!(
                        "REVERSAL_PROBABILITY must be between 0 and 1, got {raw}"
                    ))
                })?,
            None => REVERSAL_PROBABILITY,
        };

        Ok(Self {
            host,
            port,
            spreads_path: PathBuf::from(required("SPREADS_PATH")?),
            decks_dir: PathBuf::from(required("DECKS_DIR")?),
            personas_path: lookup("PERSONAS_PATH")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            interpretation_url: required("INTERPRETATION_URL")?,
            interpretation_timeout: Duration::from_secs(timeout_secs),
            reversal_probability,
        })
    }

    /// `host:port` for binding.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
