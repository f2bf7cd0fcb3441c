// SPDX-License-Identifier: MPL-2.0
//! Low-resolution placeholders decoded from compact BlurHash strings.
//!
//! A placeholder is decoded into a bitmap whose *shorter* side equals the
//! requested resolution and whose longer side follows the aspect ratio of the
//! area it will fill. Decoding at the default resolution is cheap (a few
//! thousand pixels) and happens
//! synchronously on the UI thread; [`PlaceholderCache`] makes sure it only
//! happens when the inputs change.

mod cache;

pub use cache::{PlaceholderCache, PlaceholderInputs, PlaceholderSource, PlaceholderVisual};

use crate::domain::ui::newtypes::{aspect_bounds, resolution_bounds};
use crate::domain::ui::{AspectRatio, PlaceholderResolution};
use crate::error::PlaceholderError;
use crate::media::ImageData;

/// Largest bitmap side the decoder accepts: the longest side
/// [`decode_dimensions`] can produce from clamped inputs.
pub const MAX_DECODE_SIDE: u32 = resolution_bounds::MAX * aspect_bounds::MAX as u32;

/// Default contrast multiplier applied by the BlurHash decoder.
pub const DEFAULT_PUNCH: f32 = 1.0;

/// Computes the bitmap size used to decode a placeholder.
///
/// Landscape ratios stretch the width, portrait ratios stretch the height and
/// a square ratio yields `resolution x resolution`. Rounding is
/// half-to-even in single precision so decoded bitmaps stay pixel-identical
/// across platforms.
#[must_use]
pub fn decode_dimensions(ratio: AspectRatio, resolution: PlaceholderResolution) -> (u32, u32) {
    let ratio = ratio.value();
    let side = resolution.value();
    let side_f = side as f32;

    let width = if ratio > 1.0 {
        (side_f * ratio).round_ties_even() as u32
    } else {
        side
    };
    let height = if ratio >= 1.0 {
        side
    } else {
        (side_f / ratio).round_ties_even() as u32
    };

    (width, height)
}

/// Turns a placeholder encoding into a bitmap of the requested size.
///
/// Implementations must reject malformed or truncated input with an error
/// instead of panicking.
pub trait PlaceholderDecoder {
    fn decode(
        &self,
        encoding: &str,
        width: u32,
        height: u32,
    ) -> Result<ImageData, PlaceholderError>;
}

/// [`PlaceholderDecoder`] for BlurHash strings.
#[derive(Debug, Clone, Copy)]
pub struct BlurHashDecoder {
    punch: f32,
}

impl BlurHashDecoder {
    #[must_use]
    pub fn new(punch: f32) -> Self {
        let punch = if punch.is_finite() && punch > 0.0 {
            punch
        } else {
            DEFAULT_PUNCH
        };
        Self { punch }
    }

    #[must_use]
    pub fn punch(&self) -> f32 {
        self.punch
    }
}

impl Default for BlurHashDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_PUNCH)
    }
}

impl PlaceholderDecoder for BlurHashDecoder {
    fn decode(
        &self,
        encoding: &str,
        width: u32,
        height: u32,
    ) -> Result<ImageData, PlaceholderError> {
        if width == 0 || height == 0 || width > MAX_DECODE_SIDE || height > MAX_DECODE_SIDE {
            return Err(PlaceholderError::InvalidDimensions { width, height });
        }
        // The base83 alphabet is pure ASCII; anything else would trip the
        // decoder's byte indexing.
        if !encoding.is_ascii() {
            return Err(PlaceholderError::NonAscii);
        }

        let pixels = blurhash::decode(encoding, width, height, self.punch)
            .map_err(|e| PlaceholderError::Malformed(e.to_string()))?;

        let expected = (width as usize) * (height as usize) * 4;
        if pixels.len() != expected {
            return Err(PlaceholderError::Malformed(format!(
                "decoder produced {} bytes, expected {}",
                pixels.len(),
                expected
            )));
        }

        Ok(ImageData::from_rgba(width, height, pixels))
    }
}
