//! Configuration loaded from `fishy-config.toml`.
//!
//! Everything has a sensible default, and any problem reading or parsing
//! the file falls back to those defaults with a note on stderr. The tool
//! should never refuse to start over configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration loaded from fishy-config.toml
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Default location used when no location flag is given
    pub location: LocationConfig,
    /// External API behavior (timeouts, cache, retries)
    pub api: ApiConfig,
    /// Report formatting
    pub display: DisplayConfig,
}

/// Default location for the `times` report.
///
/// A place name takes effect only when present and no explicit
/// coordinates are configured; explicit coordinates win over the place.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Free-text place name to geocode (e.g., "Fernan Lake")
    pub place: Option<String>,
    /// Explicit latitude in decimal degrees
    pub latitude: Option<f64>,
    /// Explicit longitude in decimal degrees
    pub longitude: Option<f64>,
}

/// Knobs for the external HTTP calls
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Forecast cache TTL in minutes
    pub cache_ttl_minutes: u64,
    /// Extra attempts after a failed forecast fetch
    pub retries: u32,
    /// Fixed delay between forecast attempts in milliseconds
    pub retry_delay_ms: u64,
}

/// Report formatting options
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Hour keys shown in the wind table, "HH:00" format
    pub wind_hours: Vec<String>,
    /// Use 24-hour times in the report instead of 12-hour
    pub clock_24h: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            timeout_secs: 12,
            cache_ttl_minutes: 30,
            retries: 1,
            retry_delay_ms: 500,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            wind_hours: ["00:00", "04:00", "08:00", "12:00", "16:00", "20:00"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            clock_24h: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            location: LocationConfig::default(),
            api: ApiConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from fishy-config.toml in the working directory.
    /// Falls back to default configuration if the file is missing or invalid.
    pub fn load() -> Self {
        Self::load_from_path("fishy-config.toml")
    }

    /// Load configuration from the given path.
    /// Falls back to default configuration if the file is missing or invalid.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: invalid config file format: {e}");
                    eprintln!("Using default configuration");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save the current configuration to fishy-config.toml.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write("fishy-config.toml", contents)?;
        Ok(())
    }
}
