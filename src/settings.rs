//! # Settings Module
//!
//! ## Purpose
//! Keeps the user-adjustable parameters of ChemPrac in one JSON file
//! (`chemprac_config.json` in the working directory) and gives the rest of the crate
//! a global, thread-safe way to read and change them.
//!
//! ## Architecture
//! - **LabConfig**: serializable configuration structure
//! - **SettingsManager**: loads, validates and saves a `LabConfig`
//! - **Global Access**: `OnceLock<Mutex<..>>` singleton with a test override
//!
//! ## Configuration Format
//! ```json
//! {
//!   "flask_sizes": [10, 25, 50, 100, 250, 500, 1000, 2000],
//!   "balancing_method": "Exact",
//!   "coefficient_epsilon": 0.001,
//!   "default_extra_volume_percent": 10.0,
//!   "log_level": "info",
//!   "log_file": "chemprac.log"
//! }
//! ```
//!
//! ## Usage Patterns
//! ```rust
//! use ChemPrac::settings::with_settings;
//!
//! let flasks = with_settings(|manager| manager.flask_sizes().to_vec());
//! assert!(!flasks.is_empty());
//! ```

use crate::Stoichiometry::balancer::{BalancingMethod, EquationBalancer};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "chemprac_config.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid setting: {0}")]
    InvalidValue(String),
}

/// Configuration structure stored in `chemprac_config.json`.
///
/// # Fields
/// * `flask_sizes` - volumetric flasks available in the laboratory, mL
/// * `balancing_method` - solver used by the equation balancer
/// * `coefficient_epsilon` - least squares solver: smallest coefficient still taken as positive
/// * `default_extra_volume_percent` - bulk preparation allowance for waste and spares
/// * `log_level` - level of messages written to the log file
/// * `log_file` - path of the log file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub flask_sizes: Vec<u32>,
    pub balancing_method: BalancingMethod,
    pub coefficient_epsilon: f64,
    pub default_extra_volume_percent: f64,
    pub log_level: String,
    pub log_file: String,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            flask_sizes: vec![10, 25, 50, 100, 250, 500, 1000, 2000],
            balancing_method: BalancingMethod::Exact,
            coefficient_epsilon: 0.001,
            default_extra_volume_percent: 10.0,
            log_level: "info".to_string(),
            log_file: "chemprac.log".to_string(),
        }
    }
}

/// Loads, validates and persists the laboratory configuration.
///
/// # Fields
/// * `config` - current configuration
/// * `config_file` - path the configuration is saved to
#[derive(Debug, Clone)]
pub struct SettingsManager {
    config: LabConfig,
    config_file: String,
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsManager {
    /// Loads `chemprac_config.json` from the current directory, or the defaults if the
    /// file is missing or broken.
    pub fn new() -> Self {
        Self::with_config_file(DEFAULT_CONFIG_FILE)
    }

    /// Same as [`SettingsManager::new`] with a custom configuration file path.
    pub fn with_config_file(config_file: &str) -> Self {
        let config = match Self::load_config(config_file) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "could not read settings from {}: {}, using defaults",
                    config_file, e
                );
                LabConfig::default()
            }
        };
        Self {
            config,
            config_file: config_file.to_string(),
        }
    }

    /// Reads the configuration file; a missing file gives the default configuration.
    fn load_config(config_file: &str) -> Result<LabConfig, SettingsError> {
        if Path::new(config_file).exists() {
            let content = fs::read_to_string(config_file)?;
            let config: LabConfig = serde_json::from_str(&content)?;
            validate(&config)?;
            Ok(config)
        } else {
            Ok(LabConfig::default())
        }
    }

    /// Writes the current configuration as pretty JSON to `path`.
    pub fn write_config_to(&self, path: &str) -> Result<(), SettingsError> {
        let content = serde_json::to_string_pretty(&self.config)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Saves the configuration to the config file. Does nothing under test.
    pub fn save_config(&self) -> Result<(), SettingsError> {
        #[cfg(test)]
        {
            return Ok(());
        }

        #[cfg(not(test))]
        {
            self.write_config_to(&self.config_file)
        }
    }

    pub fn get_config(&self) -> &LabConfig {
        &self.config
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    pub fn flask_sizes(&self) -> &[u32] {
        &self.config.flask_sizes
    }

    pub fn balancing_method(&self) -> BalancingMethod {
        self.config.balancing_method
    }

    /// balancer configured with the current method and epsilon
    pub fn equation_balancer(&self) -> EquationBalancer {
        EquationBalancer::new(self.config.balancing_method, self.config.coefficient_epsilon)
    }

    pub fn default_extra_volume_percent(&self) -> f64 {
        self.config.default_extra_volume_percent
    }

    /// Sets the available flasks; sizes are sorted and deduplicated, zero or empty is refused.
    pub fn set_flask_sizes(&mut self, sizes: &[u32]) -> Result<(), SettingsError> {
        let mut sizes = sizes.to_vec();
        sizes.sort_unstable();
        sizes.dedup();
        let mut config = self.config.clone();
        config.flask_sizes = sizes;
        self.replace_config(config)
    }

    pub fn set_balancing_method(&mut self, method: BalancingMethod) -> Result<(), SettingsError> {
        self.config.balancing_method = method;
        self.save_config()
    }

    pub fn set_coefficient_epsilon(&mut self, epsilon: f64) -> Result<(), SettingsError> {
        let mut config = self.config.clone();
        config.coefficient_epsilon = epsilon;
        self.replace_config(config)
    }

    pub fn set_default_extra_volume_percent(&mut self, percent: f64) -> Result<(), SettingsError> {
        let mut config = self.config.clone();
        config.default_extra_volume_percent = percent;
        self.replace_config(config)
    }

    /// Validates the whole configuration before taking it; nothing changes on error.
    pub fn replace_config(&mut self, config: LabConfig) -> Result<(), SettingsError> {
        validate(&config)?;
        self.config = config;
        self.save_config()
    }

    pub fn reset_to_defaults(&mut self) -> Result<(), SettingsError> {
        self.config = LabConfig::default();
        self.save_config()
    }
}

fn validate(config: &LabConfig) -> Result<(), SettingsError> {
    if config.flask_sizes.is_empty() || config.flask_sizes.contains(&0) {
        return Err(SettingsError::InvalidValue(
            "flask sizes must be positive and at least one is needed".to_string(),
        ));
    }
    if !(config.coefficient_epsilon > 0.0 && config.coefficient_epsilon < 1.0) {
        return Err(SettingsError::InvalidValue(format!(
            "coefficient epsilon must be in (0, 1), got {}",
            config.coefficient_epsilon
        )));
    }
    if !(config.default_extra_volume_percent >= 0.0) {
        return Err(SettingsError::InvalidValue(format!(
            "extra volume must not be negative, got {}",
            config.default_extra_volume_percent
        )));
    }
    Ok(())
}

/// Global settings manager
static GLOBAL_SETTINGS: OnceLock<Mutex<SettingsManager>> = OnceLock::new();

/// Test-specific manager instance to isolate tests from the config file in the working directory
#[cfg(test)]
static TEST_MANAGER: std::sync::Mutex<Option<SettingsManager>> = std::sync::Mutex::new(None);

#[cfg(test)]
pub fn set_test_manager(manager: SettingsManager) {
    *TEST_MANAGER.lock().unwrap() = Some(manager);
}

#[cfg(test)]
pub fn clear_test_manager() {
    *TEST_MANAGER.lock().unwrap() = None;
}

/// Mutex guard to the global SettingsManager, loaded on first use.
/// A poisoned lock is recovered, the configuration itself cannot be left half-written.
pub fn get_settings_manager() -> std::sync::MutexGuard<'static, SettingsManager> {
    #[cfg(test)]
    {
        if let Some(ref manager) = *TEST_MANAGER.lock().unwrap() {
            let _ = GLOBAL_SETTINGS.set(Mutex::new(manager.clone()));
        }
    }

    GLOBAL_SETTINGS
        .get_or_init(|| Mutex::new(SettingsManager::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Read-only access to the global settings.
pub fn with_settings<F, R>(f: F) -> R
where
    F: FnOnce(&SettingsManager) -> R,
{
    let manager = get_settings_manager();
    f(&*manager)
}

/// Mutable access to the global settings.
pub fn with_settings_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut SettingsManager) -> R,
{
    let mut manager = get_settings_manager();
    f(&mut *manager)
}
