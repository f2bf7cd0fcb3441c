// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for configuration and image cache directories.
//!
//! # Path Resolution Order
//!
//! Paths are resolved in the following priority order:
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI arguments** (`--config-dir`, `--cache-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`ICED_POSTER_CONFIG_DIR`, `ICED_POSTER_CACHE_DIR`)
//! 4. **Platform default** - via `dirs` crate
//!
//! CLI overrides should be initialized once at startup:
//! ```ignore
//! paths::init_cli_overrides(flags.config_dir, flags.cache_dir);
//! ```

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "IcedPoster";

/// Sub-directory of the cache dir holding fetched image bytes.
const IMAGE_CACHE_SUBDIR: &str = "images";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "ICED_POSTER_CONFIG_DIR";

/// Environment variable to override the cache directory.
pub const ENV_CACHE_DIR: &str = "ICED_POSTER_CACHE_DIR";

static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

static CLI_CACHE_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Initializes CLI overrides for config and cache directories.
///
/// Later calls are ignored; the first initialization wins.
pub fn init_cli_overrides(config_dir: Option<String>, cache_dir: Option<String>) {
    if CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_err() {
        tracing::warn!("CLI config dir override already initialized");
    }
    if CLI_CACHE_DIR.set(cache_dir.map(PathBuf::from)).is_err() {
        tracing::warn!("CLI cache dir override already initialized");
    }
}

fn get_cli_config_dir() -> Option<PathBuf> {
    CLI_CONFIG_DIR.get().and_then(Clone::clone)
}

fn get_cli_cache_dir() -> Option<PathBuf> {
    CLI_CACHE_DIR.get().and_then(Clone::clone)
}

fn resolve(
    override_path: Option<PathBuf>,
    cli: Option<PathBuf>,
    env_var: &str,
    platform: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Some(path) = cli {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(env_var) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    platform.map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Returns the application config directory path (holds `settings.toml`).
///
/// Platform defaults:
/// - Linux: `~/.config/IcedPoster/`
/// - macOS: `~/Library/Application Support/IcedPoster/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\IcedPoster\`
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the application config directory path with an optional override.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(
        override_path,
        get_cli_config_dir(),
        ENV_CONFIG_DIR,
        dirs::config_dir(),
    )
}

/// Returns the application cache directory path.
///
/// Platform defaults:
/// - Linux: `~/.cache/IcedPoster/`
/// - macOS: `~/Library/Caches/IcedPoster/`
/// - Windows: `C:\Users\<User>\AppData\Local\IcedPoster\`
pub fn get_app_cache_dir() -> Option<PathBuf> {
    get_app_cache_dir_with_override(None)
}

/// Returns the application cache directory path with an optional override.
pub fn get_app_cache_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(
        override_path,
        get_cli_cache_dir(),
        ENV_CACHE_DIR,
        dirs::cache_dir(),
    )
}

/// Returns the directory used by the loader's on-disk image cache.
pub fn get_image_cache_dir() -> Option<PathBuf> {
    get_app_cache_dir().map(|mut path| {
        path.push(IMAGE_CACHE_SUBDIR);
        path
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to prevent parallel tests from interfering with each other's env vars
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn app_config_dir_contains_app_name() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::remove_var(ENV_CONFIG_DIR);

        if let Some(path) = get_app_config_dir() {
            assert!(
                path.to_string_lossy().contains(APP_NAME),
                "App config dir should contain app name"
            );
        }
    }

    #[test]
    fn image_cache_dir_is_nested_in_cache_dir() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::remove_var(ENV_CACHE_DIR);

        if let (Some(cache), Some(images)) = (get_app_cache_dir(), get_image_cache_dir()) {
            assert!(images.starts_with(&cache));
            assert!(images.ends_with(IMAGE_CACHE_SUBDIR));
        }
    }

    #[test]
    fn override_path_takes_precedence_for_config_dir() {
        let override_path = PathBuf::from("/custom/config/path");
        let result = get_app_config_dir_with_override(Some(override_path.clone()));
        assert_eq!(result, Some(override_path));
    }

    #[test]
    fn env_var_overrides_default_cache_dir() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let test_path = "/test/cache/dir";
        std::env::set_var(ENV_CACHE_DIR, test_path);

        let result = get_app_cache_dir();
        assert_eq!(result, Some(PathBuf::from(test_path)));

        std::env::remove_var(ENV_CACHE_DIR);
    }

    #[test]
    fn empty_env_var_uses_default() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_CONFIG_DIR, "");

        if let Some(path) = get_app_config_dir() {
            assert!(path.to_string_lossy().contains(APP_NAME));
        }

        std::env::remove_var(ENV_CONFIG_DIR);
    }

    #[test]
    fn override_path_takes_precedence_over_env_var() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_CACHE_DIR, "/env/path");

        let override_path = PathBuf::from("/override/path");
        let result = get_app_cache_dir_with_override(Some(override_path.clone()));

        assert_eq!(result, Some(override_path));

        std::env::remove_var(ENV_CACHE_DIR);
    }
}
