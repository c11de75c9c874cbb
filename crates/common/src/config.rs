//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default motion parameters.
    pub motion: MotionDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default motion parameters, used wherever a widget config leaves the
/// spring unspecified and by the CLI replay loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionDefaults {
    /// Spring restoring-force coefficient.
    pub stiffness: f64,

    /// Spring energy-dissipation coefficient.
    pub damping: f64,

    /// Virtual mass of the smoothed value.
    pub mass: f64,

    /// Position/velocity threshold below which an axis counts as settled.
    pub settle_epsilon: f64,

    /// Animation tick rate (Hz) for replay and simulation.
    pub tick_rate_hz: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "visage=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            motion: MotionDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for MotionDefaults {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 20.0,
            mass: 1.0,
            settle_epsilon: 0.01,
            tick_rate_hz: 60,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("visage").join("config.json")
}
