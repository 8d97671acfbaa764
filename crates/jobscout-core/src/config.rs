//! Configuration management for JobScout.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use chrono::NaiveTime;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Desktop Chrome user agent presented to career sites.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Format accepted by `schedule.daily_at`.
pub const DAILY_AT_FORMAT: &str = "%H:%M";

/// Main application configuration.
///
/// This is loaded from `~/.config/jobscout/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Extraction timing and client identity
    pub scanning: ScanningConfig,
    /// Browser launch settings
    pub browser: BrowserConfig,
    /// Daily trigger settings
    pub schedule: ScheduleConfig,
    /// Digest email settings
    pub notifications: NotificationConfig,
    /// SQLite location
    pub database: DatabaseConfig,
    /// Trigger HTTP surface
    pub server: ServerConfig,
    /// Companies and roles inserted on startup when missing
    pub seed: SeedConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &std::path::Path) -> ConfigResult<Self> {
        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `JOBSCOUT_HEADLESS`: Override browser headless mode (true/false)
    /// - `JOBSCOUT_EMAIL_USER`: Digest recipient and SMTP username
    /// - `JOBSCOUT_EMAIL_PASS`: SMTP password (never read from the file)
    /// - `JOBSCOUT_BIND`: Trigger server bind address
    /// - `PORT`: Trigger server port on all interfaces
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("JOBSCOUT_HEADLESS") {
            if let Ok(headless) = val.parse() {
                self.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }

        if let Some(user) = lookup("JOBSCOUT_EMAIL_USER") {
            tracing::debug!("Override notification recipient from env");
            self.notifications.recipient = user.clone();
            self.notifications.smtp_username = user;
        }

        if let Some(pass) = lookup("JOBSCOUT_EMAIL_PASS") {
            self.notifications.smtp_password = Some(pass);
        }

        if let Some(port) = lookup("PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.bind = format!("0.0.0.0:{port}");
            }
        }

        if let Some(bind) = lookup("JOBSCOUT_BIND") {
            tracing::debug!("Override server.bind from env: {}", bind);
            self.server.bind = bind;
        }
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> ConfigResult<()> {
        self.schedule.daily_time()?;

        if self.scanning.navigation_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scanning.navigation_timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.scanning.selector_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scanning.selector_timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.scanning.scroll_step_px == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scanning.scroll_step_px".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.scanning.scroll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scanning.scroll_interval_ms".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/jobscout/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "jobscout", "jobscout").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path.
    ///
    /// Uses XDG base directories: `~/.local/share/jobscout`
    pub fn data_dir() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "jobscout", "jobscout").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Resolve the database file, defaulting to `jobscout.db` in the data dir.
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        match &self.database.path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("jobscout.db")),
        }
    }
}

/// Extraction timing and client identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanningConfig {
    /// User agent string presented to career sites
    pub user_agent: String,
    /// Upper bound on a single navigation
    pub navigation_timeout_secs: u64,
    /// Upper bound on waiting for a known page structure
    pub selector_timeout_secs: u64,
    /// Pixels scrolled per scroll-driver tick
    pub scroll_step_px: u32,
    /// Milliseconds between scroll-driver ticks
    pub scroll_interval_ms: u64,
}

impl ScanningConfig {
    /// Navigation timeout as a `Duration`.
    #[must_use]
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    /// Selector-wait timeout as a `Duration`.
    #[must_use]
    pub fn selector_timeout(&self) -> Duration {
        Duration::from_secs(self.selector_timeout_secs)
    }

    /// Scroll tick interval as a `Duration`.
    #[must_use]
    pub fn scroll_interval(&self) -> Duration {
        Duration::from_millis(self.scroll_interval_ms)
    }
}

impl Default for ScanningConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            navigation_timeout_secs: 60,
            selector_timeout_secs: 10,
            scroll_step_px: 100,
            scroll_interval_ms: 100,
        }
    }
}

/// Browser launch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,
    /// Pass `--no-sandbox` (needed in most containers)
    pub no_sandbox: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            no_sandbox: true,
            window_width: 1920,
            window_height: 1080,
        }
    }
}

/// Daily trigger settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Whether the daily trigger runs at all
    pub enabled: bool,
    /// Local time of day, `HH:MM`
    pub daily_at: String,
}

impl ScheduleConfig {
    /// Parse `daily_at`.
    pub fn daily_time(&self) -> ConfigResult<NaiveTime> {
        NaiveTime::parse_from_str(&self.daily_at, DAILY_AT_FORMAT).map_err(|e| {
            ConfigError::InvalidValue {
                field: "schedule.daily_at".to_string(),
                reason: format!("expected HH:MM, got '{}': {e}", self.daily_at),
            }
        })
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            daily_at: "09:00".to_string(),
        }
    }
}

/// Digest email settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Send digests at all
    pub enabled: bool,
    /// Digest recipient
    pub recipient: String,
    /// Sender address; falls back to `smtp_username` when empty
    pub from: String,
    /// SMTP relay host
    pub smtp_host: String,
    /// SMTP relay port
    pub smtp_port: u16,
    /// SMTP login
    pub smtp_username: String,
    /// SMTP password (read from the environment, never written to disk)
    #[serde(skip)]
    pub smtp_password: Option<String>,
}

impl NotificationConfig {
    /// Sender address used for digests.
    #[must_use]
    pub fn sender(&self) -> &str {
        if self.from.is_empty() {
            &self.smtp_username
        } else {
            &self.from
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            recipient: String::new(),
            from: String::new(),
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 465,
            smtp_username: String::new(),
            smtp_password: None,
        }
    }
}

/// SQLite location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file; defaults to the data directory
    pub path: Option<PathBuf>,
}

/// Trigger HTTP surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
        }
    }
}

/// Companies and roles inserted on startup when missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Career pages to monitor
    pub companies: Vec<SeedCompany>,
    /// Role keywords
    pub roles: Vec<String>,
}

/// A company entry in `[seed]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedCompany {
    /// Display name
    pub name: String,
    /// Careers page URL
    pub url: String,
    /// Optional label
    #[serde(default = "default_kind")]
    pub kind: String,
}

fn default_kind() -> String {
    crate::types::DEFAULT_TARGET_KIND.to_string()
}
