//! JobScout Core - Foundation crate for the JobScout career-page monitor.
//!
//! This crate provides the shared domain types, error handling, configuration
//! and the collaborator traits that the scanner depends on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Domain types (`Target`, `RoleFilter`, `Posting`)
//! - [`ports`] - Persistence and notification traits implemented by other crates
//!
//! # Example
//!
//! ```rust
//! use jobscout_core::{AppConfig, Target};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert_eq!(config.scanning.navigation_timeout_secs, 60);
//!
//! let target = Target::new("t-1", "Acme", "https://acme.example/careers")?;
//! assert!(target.active);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod ports;
pub mod types;

// Re-export commonly used types
pub use config::{
    AppConfig, BrowserConfig, DatabaseConfig, NotificationConfig, ScanningConfig, ScheduleConfig,
    SeedCompany, SeedConfig, ServerConfig,
};
pub use error::{ConfigError, ConfigResult, JobScoutError, Result};
pub use ports::{JobStore, Notifier};
pub use types::{Posting, RoleFilter, Target};
