// SPDX-License-Identifier: MPL-2.0
//! UI newtypes.
//!
//! This module provides type-safe wrappers for UI values,
//! ensuring they are always within valid ranges.

use std::time::Duration;

// =============================================================================
// Aspect Ratio Bounds
// =============================================================================

/// Aspect ratio bounds (width / height).
pub mod aspect_bounds {
    /// Narrowest supported ratio (1:20).
    pub const MIN: f32 = 0.05;
    /// Widest supported ratio (20:1).
    pub const MAX: f32 = 20.0;
    /// Default ratio (square).
    pub const DEFAULT: f32 = 1.0;
}

// =============================================================================
// AspectRatio
// =============================================================================

/// Width-to-height ratio of a rendered image area.
///
/// Always finite and strictly positive. Non-finite or non-positive input
/// falls back to the square default instead of producing degenerate layouts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio(f32);

impl AspectRatio {
    /// Square ratio (1:1).
    pub const SQUARE: Self = Self(aspect_bounds::DEFAULT);

    /// Creates a new aspect ratio, clamping the value to the valid range.
    #[must_use]
    pub fn new(ratio: f32) -> Self {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Self::SQUARE;
        }
        Self(ratio.clamp(aspect_bounds::MIN, aspect_bounds::MAX))
    }

    /// Returns the raw ratio value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Stable key for hashing and equality in caches.
    #[must_use]
    pub fn to_bits(self) -> u32 {
        self.0.to_bits()
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::SQUARE
    }
}

// =============================================================================
// Placeholder Resolution Bounds
// =============================================================================

/// Placeholder resolution bounds (pixels on the short side).
pub mod resolution_bounds {
    /// Minimum resolution.
    pub const MIN: u32 = 1;
    /// Maximum resolution.
    pub const MAX: u32 = 256;
    /// Default resolution.
    pub const DEFAULT: u32 = 32;
}

// =============================================================================
// PlaceholderResolution
// =============================================================================

/// Size of the decoded placeholder bitmap, in pixels, along its short side.
///
/// Decoding cost grows with the square of this value, so it is capped to keep
/// decoding cheap enough to run on the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaceholderResolution(u32);

impl PlaceholderResolution {
    /// Creates a new resolution, clamping to valid range.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.clamp(resolution_bounds::MIN, resolution_bounds::MAX))
    }

    /// Returns the value as u32.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for PlaceholderResolution {
    fn default() -> Self {
        Self(resolution_bounds::DEFAULT)
    }
}

// =============================================================================
// Crossfade Bounds
// =============================================================================

/// Crossfade duration bounds (milliseconds).
pub mod crossfade_bounds {
    /// Minimum duration (instant swap).
    pub const MIN_MS: u32 = 0;
    /// Maximum duration.
    pub const MAX_MS: u32 = 2000;
    /// Default duration.
    pub const DEFAULT_MS: u32 = 200;
}

// =============================================================================
// CrossfadeDuration
// =============================================================================

/// Duration of the opacity transition from placeholder to loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossfadeDuration(u32);

impl CrossfadeDuration {
    /// No transition.
    pub const NONE: Self = Self(0);

    /// Creates a new duration in milliseconds, clamping to valid range.
    #[must_use]
    pub fn from_millis(ms: u32) -> Self {
        Self(ms.clamp(crossfade_bounds::MIN_MS, crossfade_bounds::MAX_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn millis(self) -> u32 {
        self.0
    }

    /// Returns the value as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(u64::from(self.0))
    }

    /// Returns true if the transition is instantaneous.
    #[must_use]
    pub fn is_instant(self) -> bool {
        self.0 == 0
    }
}

impl Default for CrossfadeDuration {
    fn default() -> Self {
        Self(crossfade_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// Tests
// =============================================================================
