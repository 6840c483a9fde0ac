//! Configuration loading and management.
//!
//! Configuration is loaded with the following precedence:
//! 1. Environment variables (`EXPRPAD_*`)
//! 2. Config file (`~/.exprpad/config.toml`)
//! 3. Defaults

use crate::error::{Error, Result};
use crate::eval::OrchestratorOptions;
use chrono::Duration;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,

    /// Evaluator endpoint configuration.
    pub evaluator: EvaluatorConfig,

    /// Playground behavior configuration.
    pub playground: PlaygroundConfig,

    /// Cleanup configuration.
    pub cleanup: CleanupConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the exprpad home directory.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_exprpad_home(),
        }
    }
}

/// Evaluator endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Base URL of the evaluate service (without the `/evaluate` suffix).
    pub endpoint: String,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8000".to_string(),
        }
    }
}

/// Playground behavior configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Trailing-edge debounce delay in milliseconds.
    pub debounce_ms: u64,

    /// Whether a manual evaluation also writes the auto-save slot.
    pub auto_save_on_manual_evaluate: bool,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            auto_save_on_manual_evaluate: false,
        }
    }
}

impl PlaygroundConfig {
    /// Orchestrator options for this configuration.
    #[must_use]
    pub fn orchestrator_options(&self) -> OrchestratorOptions {
        OrchestratorOptions {
            debounce_delay: Duration::milliseconds(i64::try_from(self.debounce_ms).unwrap_or(500)),
            auto_save_on_manual_evaluate: self.auto_save_on_manual_evaluate,
        }
    }
}

/// Cleanup configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// `clean` removes sessions untouched for this many days by default.
    pub retention_days: u32,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self { retention_days: 7 }
    }
}

/// Get the default exprpad home directory.
fn default_exprpad_home() -> PathBuf {
    dirs::home_dir().map_or_else(|| PathBuf::from(".exprpad"), |h| h.join(".exprpad"))
}

/// Load configuration with precedence: env vars → file → defaults.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed.
pub fn load_config() -> Result<Config> {
    let mut config = Config::default();

    // Try to load config file
    let config_path = get_config_path();
    if config_path.exists() {
        let contents = fs::read_to_string(&config_path).map_err(Error::Storage)?;
        config = toml::from_str(&contents).map_err(|e| Error::Config(e.to_string()))?;
    }

    // Override with environment variables
    apply_env_overrides(&mut config);

    Ok(config)
}

/// Get the path to the config file.
fn get_config_path() -> PathBuf {
    if let Ok(path) = env::var("EXPRPAD_CONFIG") {
        return PathBuf::from(path);
    }

    if let Ok(home) = env::var("EXPRPAD_HOME") {
        return PathBuf::from(home).join("config.toml");
    }

    default_exprpad_home().join("config.toml")
}

/// Apply environment variable overrides to config.
fn apply_env_overrides(config: &mut Config) {
    // Storage path
    if let Ok(path) = env::var("EXPRPAD_STORAGE_PATH") {
        config.storage.path = PathBuf::from(path);
    } else if let Ok(home) = env::var("EXPRPAD_HOME") {
        config.storage.path = PathBuf::from(home);
    }

    // Evaluator endpoint
    if let Ok(endpoint) = env::var("EXPRPAD_ENDPOINT") {
        config.evaluator.endpoint = endpoint;
    }

    // Playground tuning
    if let Ok(val) = env::var("EXPRPAD_DEBOUNCE_MS") {
        if let Ok(ms) = val.parse() {
            config.playground.debounce_ms = ms;
        }
    }

    if let Ok(val) = env::var("EXPRPAD_AUTO_SAVE_ON_MANUAL") {
        config.playground.auto_save_on_manual_evaluate = matches!(val.as_str(), "1" | "true");
    }

    // Cleanup
    if let Ok(val) = env::var("EXPRPAD_RETENTION_DAYS") {
        if let Ok(days) = val.parse() {
            config.cleanup.retention_days = days;
        }
    }
}
