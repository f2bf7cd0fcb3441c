// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Placeholder**: BlurHash decode resolution and contrast
//! - **Loader**: Memory/disk cache bounds and network limits
//! - **Animation**: Crossfade timing

use crate::domain::ui::newtypes::{crossfade_bounds, resolution_bounds};

// ==========================================================================
// Placeholder Defaults
// ==========================================================================

/// Default placeholder resolution (pixels on the short side).
pub const DEFAULT_PLACEHOLDER_RESOLUTION: u32 = resolution_bounds::DEFAULT;

/// Default BlurHash contrast multiplier.
pub const DEFAULT_PLACEHOLDER_PUNCH: f32 = crate::placeholder::DEFAULT_PUNCH;

// ==========================================================================
// Loader Defaults
// ==========================================================================

/// Default number of decoded images kept in memory.
pub const DEFAULT_MEMORY_CACHE_ENTRIES: usize = 64;

/// Minimum number of decoded images kept in memory.
pub const MIN_MEMORY_CACHE_ENTRIES: usize = 1;

/// Maximum number of decoded images kept in memory.
pub const MAX_MEMORY_CACHE_ENTRIES: usize = 1024;

/// Default memory cache budget in megabytes.
pub const DEFAULT_MEMORY_CACHE_MB: u32 = 64;

/// Minimum memory cache budget in megabytes.
pub const MIN_MEMORY_CACHE_MB: u32 = 8;

/// Maximum memory cache budget in megabytes.
pub const MAX_MEMORY_CACHE_MB: u32 = 1024;

/// Whether fetched image bytes are persisted on disk by default.
pub const DEFAULT_DISK_CACHE: bool = true;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default maximum download size in megabytes.
pub const DEFAULT_MAX_DOWNLOAD_MB: u32 = 32;

/// Maximum accepted download size in megabytes.
pub const MAX_MAX_DOWNLOAD_MB: u32 = 256;

/// Default HTTP user agent.
pub const DEFAULT_USER_AGENT: &str = concat!("IcedPoster/", env!("CARGO_PKG_VERSION"));

// ==========================================================================
// Animation Defaults
// ==========================================================================

/// Whether the placeholder crossfades into the loaded image.
pub const DEFAULT_CROSSFADE: bool = true;

/// Default crossfade duration in milliseconds.
pub const DEFAULT_CROSSFADE_MS: u32 = crossfade_bounds::DEFAULT_MS;
