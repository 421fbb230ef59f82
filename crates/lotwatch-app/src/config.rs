//! On-disk configuration.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use lotwatch_core::Thresholds;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::theme::Theme;

const CONFIG_DIR: &str = "lotwatch";
const CONFIG_FILE: &str = "config.toml";

/// Seconds between data refreshes when nothing is configured.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;

/// Top-level application configuration loaded from `<config dir>/lotwatch/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Appearance and refresh cadence.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Tier policy applied to lot occupancy.
    #[serde(default = "lot_thresholds")]
    pub thresholds: Thresholds,
    /// Tier policy applied to event impact.
    #[serde(default = "event_thresholds")]
    pub event_thresholds: Thresholds,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            thresholds: lot_thresholds(),
            event_thresholds: event_thresholds(),
        }
    }
}

const fn lot_thresholds() -> Thresholds {
    Thresholds::USAGE
}

const fn event_thresholds() -> Thresholds {
    Thresholds::EVENT_IMPACT
}

/// `[display]` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Initial theme.
    #[serde(default)]
    pub theme: Theme,
    /// Seconds between data refreshes.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
        }
    }
}

const fn default_refresh_interval_secs() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

impl DisplayConfig {
    /// Refresh interval as a `time` duration.
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::seconds(i64::try_from(self.refresh_interval_secs).unwrap_or(i64::MAX))
    }
}

/// Returns the default configuration file path.
///
/// On Linux/macOS: `~/.config/lotwatch/config.toml`
/// On Windows: `%APPDATA%\lotwatch\config.toml`
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

impl AppConfig {
    /// Load from `path`, or from [`default_config_path`] when `None`.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    /// Unreadable or malformed files and invalid values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };
        Self::from_file(&config_path)
    }

    /// Load from an explicit file; a missing file yields the defaults.
    ///
    /// # Errors
    /// Unreadable or malformed files and invalid values.
    pub fn from_file(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", config_path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid configuration in {}", config_path.display()))?;
        tracing::info!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.display.refresh_interval_secs == 0 {
            bail!("display.refresh_interval_secs must be greater than zero");
        }
        self.thresholds.validate().context("thresholds")?;
        self.event_thresholds.validate().context("event_thresholds")?;
        Ok(())
    }

    /// Serialize as TOML.
    ///
    /// # Errors
    /// Only if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize configuration")
    }
}
