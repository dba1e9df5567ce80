// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and
//! saving user preferences to a `settings.toml` file.

mod defaults;

pub use defaults::*;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "IcedReel";

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub language: Option<String>,
    #[serde(default)]
    pub show_scrubber: Option<bool>,
    #[serde(default)]
    pub show_duration_label: Option<bool>,
    #[serde(default)]
    pub auto_hide_secs: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            show_scrubber: Some(DEFAULT_SHOW_SCRUBBER),
            show_duration_label: Some(DEFAULT_SHOW_DURATION_LABEL),
            auto_hide_secs: Some(DEFAULT_AUTO_HIDE_SECS),
        }
    }
}

/// Resolved per-screen options derived from [`Config`].
///
/// The screen variants (scrubber, duration label, hide delay) are one
/// configurable component instead of separate screen implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenOptions {
    pub show_scrubber: bool,
    pub show_duration_label: bool,
    pub auto_hide: Duration,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            show_scrubber: DEFAULT_SHOW_SCRUBBER,
            show_duration_label: DEFAULT_SHOW_DURATION_LABEL,
            auto_hide: Duration::from_secs(u64::from(DEFAULT_AUTO_HIDE_SECS)),
        }
    }
}

impl Config {
    /// Resolves screen options, clamping the hide delay to the supported
    /// range so persisted configs cannot request nonsensical values.
    pub fn screen_options(&self) -> ScreenOptions {
        let secs = self
            .auto_hide_secs
            .unwrap_or(DEFAULT_AUTO_HIDE_SECS)
            .clamp(MIN_AUTO_HIDE_SECS, MAX_AUTO_HIDE_SECS);

        ScreenOptions {
            show_scrubber: self.show_scrubber.unwrap_or(DEFAULT_SHOW_SCRUBBER),
            show_duration_label: self
                .show_duration_label
                .unwrap_or(DEFAULT_SHOW_DURATION_LABEL),
            auto_hide: Duration::from_secs(u64::from(secs)),
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
