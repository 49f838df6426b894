//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\tag-annals\config.toml
//! - macOS: ~/Library/Application Support/tag-annals/config.toml
//! - Linux: ~/.config/tag-annals/config.toml
//!
//! Every setting can also be given on the command line (or through the
//! environment for credentials); those win over the file. [`Settings`] is
//! the merged result that the rest of the program consumes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::history::{HistoryOptions, MAX_PAGE_SIZE};
use crate::stats::DEFAULT_TOP_THRESHOLD;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Snapshot file holding the accumulated statistics
    pub state_file: PathBuf,

    /// Last.fm credentials and target user
    pub credentials: Credentials,

    /// How much history to walk per run
    pub history: HistoryConfig,

    /// Report settings
    pub report: ReportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from("state.json"),
            credentials: Credentials::default(),
            history: HistoryConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Last.fm API key
    pub api_key: Option<String>,

    /// Last.fm API secret
    pub api_secret: Option<String>,

    /// Last.fm user whose history is counted
    pub user: Option<String>,
}

/// History walking settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum tracks to process per run (-1 = unlimited)
    pub tracks_limit: i64,

    /// Log progress every N tracks (<= 0 disables)
    pub tracks_per_indicator: i64,

    /// Scrobbles per API page (1-200)
    pub page_size: u32,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            tracks_limit: -1,
            tracks_per_indicator: 1000,
            page_size: MAX_PAGE_SIZE,
        }
    }
}

/// Report settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Top tags to print per year
    pub top_threshold: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_threshold: DEFAULT_TOP_THRESHOLD,
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tag-annals"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };
    load_from(&path)
}

/// Load configuration from a specific file, same fallbacks as [`load`]
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

// ============================================================================
// Resolved Settings
// ============================================================================

/// Values given on the command line; `None` falls back to the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub user: Option<String>,
    pub tracks_limit: Option<i64>,
    pub tracks_per_indicator: Option<i64>,
    pub page_size: Option<u32>,
    pub top_threshold: Option<usize>,
    pub state_file: Option<PathBuf>,
}

/// Everything a run needs, after merging file and command line
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub user: Option<String>,
    pub history: HistoryOptions,
    pub top_threshold: usize,
    pub state_file: PathBuf,
}

/// Credentials validated for an update run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastFmAccess {
    pub api_key: String,
    pub user: String,
}

impl Settings {
    /// Merge command-line overrides into the file configuration.
    pub fn resolve(config: Config, overrides: Overrides) -> Self {
        let tracks_limit = overrides
            .tracks_limit
            .unwrap_or(config.history.tracks_limit);
        let tracks_per_indicator = overrides
            .tracks_per_indicator
            .unwrap_or(config.history.tracks_per_indicator);
        let page_size = overrides
            .page_size
            .unwrap_or(config.history.page_size)
            .clamp(1, MAX_PAGE_SIZE);

        Self {
            api_key: non_empty(overrides.api_key.or(config.credentials.api_key)),
            api_secret: non_empty(overrides.api_secret.or(config.credentials.api_secret)),
            user: non_empty(overrides.user.or(config.credentials.user)),
            history: HistoryOptions {
                // Negative limits mean "no limit"
                max_events: u64::try_from(tracks_limit).ok(),
                progress_every: u64::try_from(tracks_per_indicator)
                    .ok()
                    .filter(|every| *every > 0),
                page_size,
            },
            top_threshold: overrides
                .top_threshold
                .unwrap_or(config.report.top_threshold),
            state_file: overrides.state_file.unwrap_or(config.state_file),
        }
    }

    /// Check that everything needed to talk to Last.fm is present.
    ///
    /// The secret is required even though the read-only methods only need
    /// the key, so a half-configured setup fails up front.
    pub fn lastfm_access(&self) -> Result<LastFmAccess> {
        let api_key = self
            .api_key
            .clone()
            .ok_or_else(|| Error::config("Need API key (--api-key or LASTFM_API_KEY)"))?;
        if self.api_secret.is_none() {
            return Err(Error::config(
                "Need API secret (--api-secret or LASTFM_API_SECRET)",
            ));
        }
        let user = self
            .user
            .clone()
            .ok_or_else(|| Error::config("Need last.fm user name (--user or LASTFM_USER)"))?;

        Ok(LastFmAccess { api_key, user })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ============================================================================
// Tests
// ============================================================================
