//! Configuration loading and management
//!
//! Handles parsing of the `autodeck.toml` file in the home directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file inside the home directory
pub const CONFIG_FILE: &str = "autodeck.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Storage locations, relative to the home directory
    #[serde(default)]
    pub paths: PathsConfig,

    /// Activity log configuration
    #[serde(default)]
    pub log: LogConfig,

    /// Web dashboard configuration
    #[serde(default)]
    pub web: WebConfig,

    /// Dashboard figures
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Storage locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding tasks.json, the CSV export and reports/
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Directory holding activity.log and its rotated backups
    #[serde(default = "default_logs_dir")]
    pub logs_dir: String,
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_logs_dir() -> String {
    "logs".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            logs_dir: default_logs_dir(),
        }
    }
}

/// Activity log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Rotate once the log reaches this many bytes
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,

    /// Lines shown by `autodeck logs` and `GET /api/logs`
    #[serde(default = "default_tail_lines")]
    pub tail_lines: usize,
}

fn default_max_bytes() -> u64 {
    512_000
}

fn default_tail_lines() -> usize {
    12
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            tail_lines: default_tail_lines(),
        }
    }
}

/// Web dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Log lines rendered on the dashboard page
    #[serde(default = "default_dashboard_log_lines")]
    pub dashboard_log_lines: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_dashboard_log_lines() -> usize {
    8
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            dashboard_log_lines: default_dashboard_log_lines(),
        }
    }
}

/// Dashboard figures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Baseline monthly revenue shown on the dashboard
    #[serde(default = "default_revenue_base")]
    pub revenue_base: u64,

    /// Added to the baseline for every active task
    #[serde(default = "default_revenue_per_active_task")]
    pub revenue_per_active_task: u64,
}

fn default_revenue_base() -> u64 {
    1450
}

fn default_revenue_per_active_task() -> u64 {
    75
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            revenue_base: default_revenue_base(),
            revenue_per_active_task: default_revenue_per_active_task(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the home directory, or return defaults
    pub fn load_from_home(home: &Path) -> Self {
        let config_path = home.join(CONFIG_FILE);
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load(&config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %err,
                    "ignoring invalid config"
                );
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Absolute data directory for a home
    pub fn data_dir(&self, home: &Path) -> PathBuf {
        home.join(&self.paths.data_dir)
    }

    /// Absolute logs directory for a home
    pub fn logs_dir(&self, home: &Path) -> PathBuf {
        home.join(&self.paths.logs_dir)
    }

    fn validate(&self) -> crate::error::Result<()> {
        if self.paths.data_dir.trim().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "paths.data_dir cannot be empty".to_string(),
            ));
        }
        if self.paths.logs_dir.trim().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "paths.logs_dir cannot be empty".to_string(),
            ));
        }
        if self.log.max_bytes == 0 {
            return Err(crate::error::Error::InvalidConfig(
                "log.max_bytes must be > 0".to_string(),
            ));
        }
        if self.log.tail_lines == 0 {
            return Err(crate::error::Error::InvalidConfig(
                "log.tail_lines must be > 0".to_string(),
            ));
        }
        if self.web.host.trim().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "web.host cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
