// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[placeholder]` - BlurHash decode resolution and contrast
//! - `[loader]` - Image cache bounds and network limits
//! - `[animation]` - Crossfade between placeholder and image
//!
//! Missing sections and fields fall back to the values in [`defaults`].
//!
//! # Examples
//!
//! ```no_run
//! use iced_poster::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.placeholder.resolution = Some(16);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::ui::{CrossfadeDuration, PlaceholderResolution};
use crate::error::{Error, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Placeholder decoding settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaceholderConfig {
    /// Decode resolution (pixels on the short side) hosts apply to requests.
    #[serde(
        default = "default_placeholder_resolution",
        skip_serializing_if = "Option::is_none"
    )]
    pub resolution: Option<u32>,

    /// BlurHash contrast multiplier.
    #[serde(default = "default_punch", skip_serializing_if = "Option::is_none")]
    pub punch: Option<f32>,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            resolution: default_placeholder_resolution(),
            punch: default_punch(),
        }
    }
}

/// Image loader settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoaderConfig {
    /// Number of decoded images kept in memory.
    #[serde(
        default = "default_memory_cache_entries",
        skip_serializing_if = "Option::is_none"
    )]
    pub memory_cache_entries: Option<usize>,

    /// Memory budget for decoded images, in megabytes.
    #[serde(
        default = "default_memory_cache_mb",
        skip_serializing_if = "Option::is_none"
    )]
    pub memory_cache_mb: Option<u32>,

    /// Persist fetched bytes in the cache directory.
    #[serde(default = "default_disk_cache", skip_serializing_if = "Option::is_none")]
    pub disk_cache: Option<bool>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs", skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Largest response body accepted, in megabytes.
    #[serde(
        default = "default_max_download_mb",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_download_mb: Option<u32>,

    /// HTTP user agent sent with every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            memory_cache_entries: default_memory_cache_entries(),
            memory_cache_mb: default_memory_cache_mb(),
            disk_cache: default_disk_cache(),
            timeout_secs: default_timeout_secs(),
            max_download_mb: default_max_download_mb(),
            user_agent: None,
        }
    }
}

impl LoaderConfig {
    /// Memory cache entry bound, clamped to the supported range.
    #[must_use]
    pub fn memory_entries(&self) -> usize {
        self.memory_cache_entries
            .unwrap_or(DEFAULT_MEMORY_CACHE_ENTRIES)
            .clamp(MIN_MEMORY_CACHE_ENTRIES, MAX_MEMORY_CACHE_ENTRIES)
    }

    /// Memory cache budget in bytes, clamped to the supported range.
    #[must_use]
    pub fn memory_bytes(&self) -> usize {
        let mb = self
            .memory_cache_mb
            .unwrap_or(DEFAULT_MEMORY_CACHE_MB)
            .clamp(MIN_MEMORY_CACHE_MB, MAX_MEMORY_CACHE_MB);
        mb as usize * 1024 * 1024
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS).max(1))
    }

    /// Download limit in bytes, clamped to the supported range.
    #[must_use]
    pub fn max_download_bytes(&self) -> u64 {
        let mb = self
            .max_download_mb
            .unwrap_or(DEFAULT_MAX_DOWNLOAD_MB)
            .clamp(1, MAX_MAX_DOWNLOAD_MB);
        u64::from(mb) * 1024 * 1024
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}

/// Transition settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnimationConfig {
    /// Crossfade from placeholder to image.
    #[serde(default = "default_crossfade", skip_serializing_if = "Option::is_none")]
    pub crossfade: Option<bool>,

    /// Crossfade duration in milliseconds.
    #[serde(default = "default_crossfade_ms", skip_serializing_if = "Option::is_none")]
    pub crossfade_ms: Option<u32>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            crossfade: default_crossfade(),
            crossfade_ms: default_crossfade_ms(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub placeholder: PlaceholderConfig,

    #[serde(default)]
    pub loader: LoaderConfig,

    #[serde(default)]
    pub animation: AnimationConfig,
}

impl Config {
    /// Resolution the host passes to `DisplayRequest::placeholder_resolution`.
    ///
    /// Requests built without it decode at their own default; the preview
    /// grid applies this value to every tile that does not pick one.
    #[must_use]
    pub fn placeholder_resolution(&self) -> PlaceholderResolution {
        PlaceholderResolution::new(
            self.placeholder
                .resolution
                .unwrap_or(DEFAULT_PLACEHOLDER_RESOLUTION),
        )
    }

    #[must_use]
    pub fn placeholder_punch(&self) -> f32 {
        self.placeholder.punch.unwrap_or(DEFAULT_PLACEHOLDER_PUNCH)
    }

    /// Effective crossfade duration; instant when crossfading is disabled.
    #[must_use]
    pub fn crossfade_duration(&self) -> CrossfadeDuration {
        if self.animation.crossfade.unwrap_or(DEFAULT_CROSSFADE) {
            CrossfadeDuration::from_millis(
                self.animation.crossfade_ms.unwrap_or(DEFAULT_CROSSFADE_MS),
            )
        } else {
            CrossfadeDuration::NONE
        }
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_placeholder_resolution() -> Option<u32> {
    Some(DEFAULT_PLACEHOLDER_RESOLUTION)
}

fn default_punch() -> Option<f32> {
    Some(DEFAULT_PLACEHOLDER_PUNCH)
}

fn default_memory_cache_entries() -> Option<usize> {
    Some(DEFAULT_MEMORY_CACHE_ENTRIES)
}

fn default_memory_cache_mb() -> Option<u32> {
    Some(DEFAULT_MEMORY_CACHE_MB)
}

fn default_disk_cache() -> Option<bool> {
    Some(DEFAULT_DISK_CACHE)
}

fn default_timeout_secs() -> Option<u64> {
    Some(DEFAULT_TIMEOUT_SECS)
}

fn default_max_download_mb() -> Option<u32> {
    Some(DEFAULT_MAX_DOWNLOAD_MB)
}

fn default_crossfade() -> Option<bool> {
    Some(DEFAULT_CROSSFADE)
}

fn default_crossfade_ms() -> Option<u32> {
    Some(DEFAULT_CROSSFADE_MS)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "using default settings");
                    return (
                        Config::default(),
                        Some(format!("Could not read {}: {}", path.display(), err)),
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

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
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
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            placeholder: PlaceholderConfig {
                resolution: Some(16),
                punch: Some(1.2),
            },
            loader: LoaderConfig {
                memory_cache_entries: Some(8),
                disk_cache: Some(false),
                user_agent: Some("Test/1.0".into()),
                ..LoaderConfig::default()
            },
            animation: AnimationConfig {
                crossfade: Some(false),
                crossfade_ms: Some(350),
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
    fn partial_file_fills_in_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[placeholder]\nresolution = 8\n").expect("write config");

        let loaded = load_from_path(&config_path).expect("partial config loads");
        assert_eq!(loaded.placeholder.resolution, Some(8));
        assert_eq!(loaded.placeholder.punch, Some(DEFAULT_PLACEHOLDER_PUNCH));
        assert_eq!(loaded.loader, LoaderConfig::default());
        assert_eq!(loaded.animation, AnimationConfig::default());
    }

    #[test]
    fn load_with_override_reports_broken_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[loader\n").expect("write config");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn load_with_override_missing_file_is_silent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn accessors_clamp_out_of_range_values() {
        let config = Config {
            placeholder: PlaceholderConfig {
                resolution: Some(100_000),
                punch: None,
            },
            loader: LoaderConfig {
                memory_cache_entries: Some(0),
                memory_cache_mb: Some(1),
                timeout_secs: Some(0),
                max_download_mb: Some(u32::MAX),
                ..LoaderConfig::default()
            },
            animation: AnimationConfig {
                crossfade: Some(true),
                crossfade_ms: Some(u32::MAX),
            },
        };

        assert_eq!(config.placeholder_resolution().value(), 256);
        assert_eq!(config.loader.memory_entries(), MIN_MEMORY_CACHE_ENTRIES);
        assert_eq!(
            config.loader.memory_bytes(),
            MIN_MEMORY_CACHE_MB as usize * 1024 * 1024
        );
        assert_eq!(config.loader.timeout(), Duration::from_secs(1));
        assert_eq!(
            config.loader.max_download_bytes(),
            u64::from(MAX_MAX_DOWNLOAD_MB) * 1024 * 1024
        );
        assert_eq!(config.crossfade_duration().millis(), 2000);
    }

    #[test]
    fn disabled_crossfade_is_instant() {
        let config = Config {
            animation: AnimationConfig {
                crossfade: Some(false),
                crossfade_ms: Some(500),
            },
            ..Config::default()
        };
        assert!(config.crossfade_duration().is_instant());
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.placeholder_resolution().value(), 32);
        assert_eq!(config.crossfade_duration().millis(), DEFAULT_CROSSFADE_MS);
        assert_eq!(config.loader.disk_cache, Some(true));
        assert!(config.loader.user_agent().starts_with("IcedPoster/"));
    }
}
