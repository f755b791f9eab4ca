//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use wt_core::DEFAULT_REQUIRED_MINUTES_PER_DAY;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the worktime log file.
    pub log_path: PathBuf,
    /// Daily quota the summary delta is measured against.
    pub required_minutes_per_day: f64,
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            log_path: home.join(".worktime"),
            required_minutes_per_day: DEFAULT_REQUIRED_MINUTES_PER_DAY,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (WT_*)
        figment = figment.merge(Env::prefixed("WT_"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    fn validate(&self) -> Result<(), figment::Error> {
        let quota = self.required_minutes_per_day;
        if !quota.is_finite() || quota < 0.0 {
            return Err(figment::Error::from(format!(
                "required_minutes_per_day must be a finite, non-negative number, got {quota}"
            )));
        }
        Ok(())
    }
}

/// Returns the platform-specific config directory for wt.
///
/// On Linux: `~/.config/worktime`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("worktime"))
}
