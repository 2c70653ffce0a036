// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[browse]` - Enabled media kinds, catalog order and swipe threshold
//! - `[video]` - Seek step, player style, aspect fill and autoplay
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `SWIPE_REEL_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use swipe_reel::config::{self, Config};
//! use swipe_reel::domain::media::{KindSet, MediaKind};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load_with_override(None);
//!
//! // Show only videos from now on
//! config.set_enabled_kinds(&KindSet::only(MediaKind::Video));
//!
//! // Save the modified configuration
//! config::save_with_override(&config, None).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::domain::media::KindSet;
use crate::domain::navigation::SwipeThreshold;
use crate::domain::video::{PlayerStyle, Presentation, SeekStep};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Enums (shared between sections)
// =============================================================================

/// Order of the catalog built from a folder.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Whatever order the folder listing returns.
    #[default]
    Discovery,
    /// By display name, case-insensitive.
    Alphabetical,
}

// =============================================================================
// Section Structs
// =============================================================================

/// Browsing settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrowseConfig {
    /// Comma-separated media kinds to show (`video`, `image`, `animated`).
    #[serde(
        default = "default_enabled_kinds",
        skip_serializing_if = "Option::is_none"
    )]
    pub enabled_kinds: Option<String>,

    /// Catalog order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,

    /// Vertical drag distance that counts as a swipe, in points.
    #[serde(
        default = "default_swipe_threshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub swipe_threshold: Option<f32>,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            enabled_kinds: default_enabled_kinds(),
            sort_order: Some(SortOrder::default()),
            swipe_threshold: default_swipe_threshold(),
        }
    }
}

/// Video playback settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoConfig {
    /// Seek step in seconds for the seek buttons.
    #[serde(
        default = "default_seek_step_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub seek_step_secs: Option<f64>,

    /// Player used for videos.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_style: Option<PlayerStyle>,

    /// Fill the screen instead of fitting the video inside it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_fill: Option<bool>,

    /// Start videos as soon as they are on screen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            seek_step_secs: default_seek_step_secs(),
            player_style: Some(PlayerStyle::default()),
            aspect_fill: Some(false),
            autoplay: Some(true),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// Browsing settings.
    #[serde(default)]
    pub browse: BrowseConfig,

    /// Video playback settings.
    #[serde(default)]
    pub video: VideoConfig,
}

impl Config {
    /// Enabled kinds, falling back to all kinds when the stored list has no
    /// known kind in it.
    #[must_use]
    pub fn enabled_kinds(&self) -> KindSet {
        match self.browse.enabled_kinds.as_deref() {
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                log::warn!("ignoring enabled_kinds: {err}");
                KindSet::all()
            }),
            None => KindSet::all(),
        }
    }

    pub fn set_enabled_kinds(&mut self, kinds: &KindSet) {
        self.browse.enabled_kinds = Some(kinds.to_string());
    }

    #[must_use]
    pub fn sort_order(&self) -> SortOrder {
        self.browse.sort_order.unwrap_or_default()
    }

    #[must_use]
    pub fn swipe_threshold(&self) -> SwipeThreshold {
        SwipeThreshold::new(self.browse.swipe_threshold.unwrap_or(DEFAULT_SWIPE_THRESHOLD))
    }

    /// Seek step, clamped and snapped to the allowed range.
    #[must_use]
    pub fn seek_step(&self) -> SeekStep {
        SeekStep::new(self.video.seek_step_secs.unwrap_or(DEFAULT_SEEK_STEP_SECS))
    }

    #[must_use]
    pub fn presentation(&self) -> Presentation {
        Presentation {
            style: self.video.player_style.unwrap_or_default(),
            aspect_fill: self.video.aspect_fill.unwrap_or(false),
        }
    }

    #[must_use]
    pub fn autoplay(&self) -> bool {
        self.video.autoplay.unwrap_or(true)
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_enabled_kinds() -> Option<String> {
    Some(DEFAULT_ENABLED_KINDS.to_string())
}

fn default_swipe_threshold() -> Option<f32> {
    Some(DEFAULT_SWIPE_THRESHOLD)
}

fn default_seek_step_secs() -> Option<f64> {
    Some(DEFAULT_SEEK_STEP_SECS)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration, from `base_dir` when given.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!("Using default settings: {err}")),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration, to `base_dir` when given.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::MediaKind;
    use crate::test_utils::assert_abs_diff_eq;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            browse: BrowseConfig {
                enabled_kinds: Some("video,animated".to_string()),
                sort_order: Some(SortOrder::Alphabetical),
                swipe_threshold: Some(80.0),
            },
            video: VideoConfig {
                seek_step_secs: Some(30.0),
                player_style: Some(PlayerStyle::Native),
                aspect_fill: Some(true),
                autoplay: Some(false),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(message)) => assert!(!message.is_empty()),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.enabled_kinds(), KindSet::all());
        assert_eq!(config.sort_order(), SortOrder::Discovery);
        assert_abs_diff_eq!(config.seek_step().value(), DEFAULT_SEEK_STEP_SECS);
        assert_eq!(config.presentation(), Presentation::default());
        assert!(config.autoplay());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[video]\naspect_fill = true\n").expect("write");

        let config = load_from_path(&config_path).expect("loads");
        assert!(config.presentation().aspect_fill);
        assert_eq!(config.browse, BrowseConfig::default());
        assert_eq!(config.video.seek_step_secs, Some(DEFAULT_SEEK_STEP_SECS));
    }

    #[test]
    fn out_of_range_seek_step_is_clamped() {
        let mut config = Config::default();
        config.video.seek_step_secs = Some(500.0);
        assert_abs_diff_eq!(config.seek_step().value(), MAX_SEEK_STEP_SECS);

        config.video.seek_step_secs = Some(1.0);
        assert_abs_diff_eq!(config.seek_step().value(), MIN_SEEK_STEP_SECS);
    }

    #[test]
    fn unknown_kinds_fall_back_to_all() {
        let mut config = Config::default();
        config.browse.enabled_kinds = Some("audio,pdf".to_string());
        assert_eq!(config.enabled_kinds(), KindSet::all());

        config.browse.enabled_kinds = Some("audio,image".to_string());
        assert_eq!(config.enabled_kinds(), KindSet::only(MediaKind::Image));
    }

    #[test]
    fn enabled_kinds_round_trip_through_the_stored_string() {
        let mut config = Config::default();
        let kinds = KindSet::all()
            .toggled(MediaKind::Image)
            .expect("two kinds left");
        config.set_enabled_kinds(&kinds);
        assert_eq!(config.browse.enabled_kinds.as_deref(), Some("video,animated"));
        assert_eq!(config.enabled_kinds(), kinds);
    }

    #[test]
    fn sort_order_uses_kebab_case() {
        let content = toml::to_string(&BrowseConfig {
            enabled_kinds: None,
            sort_order: Some(SortOrder::Alphabetical),
            swipe_threshold: None,
        })
        .expect("serializes");
        assert!(content.contains("sort_order = \"alphabetical\""));
    }

    #[test]
    fn save_with_override_and_load_with_override_round_trip() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();

        let mut config = Config::default();
        config.video.player_style = Some(PlayerStyle::Native);

        save_with_override(&config, Some(base_dir.clone())).expect("save should succeed");
        assert!(base_dir.join("settings.toml").exists(), "config file should exist");

        let (loaded, warning) = load_with_override(Some(base_dir));
        assert!(warning.is_none(), "load should succeed without warning");
        assert_eq!(loaded.presentation().style, PlayerStyle::Native);
    }

    #[test]
    fn load_with_override_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none(), "should not warn for missing file");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_with_override_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        fs::write(base_dir.join("settings.toml"), "not = valid = toml").expect("write file");

        let (config, warning) = load_with_override(Some(base_dir));
        assert!(warning.is_some(), "should warn about parse error");
        assert_eq!(config, Config::default());
    }
}
