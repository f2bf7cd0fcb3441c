// SPDX-License-Identifier: MPL-2.0
//! Per-instance memo of the placeholder shown while loading and on error.
//!
//! The decoded bitmap is keyed by (encoding, resolution, ratio) and the
//! fallback drawable by its resource id. Each is recomputed only when its own
//! key changes, so swapping the fallback never re-runs the decoder.

use super::{decode_dimensions, PlaceholderDecoder};
use crate::domain::ui::{AspectRatio, PlaceholderResolution};
use crate::media::ImageData;
use crate::resources::FallbackResolver;

/// Where a resolved placeholder came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderSource {
    /// Decoded from the placeholder encoding.
    BlurHash,
    /// Static drawable with the given resource id.
    Fallback(String),
}

/// Bitmap shown before the image arrives and when it cannot be loaded.
#[derive(Debug, Clone)]
pub struct PlaceholderVisual {
    pub image: ImageData,
    pub source: PlaceholderSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DecodeKey {
    encoding: String,
    resolution: PlaceholderResolution,
    ratio_bits: u32,
}

impl DecodeKey {
    fn matches(&self, encoding: &str, resolution: PlaceholderResolution, ratio: AspectRatio) -> bool {
        self.encoding == encoding
            && self.resolution == resolution
            && self.ratio_bits == ratio.to_bits()
    }
}

/// Placeholder inputs taken from a display request.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderInputs<'a> {
    pub encoding: Option<&'a str>,
    pub fallback: Option<&'a str>,
    pub ratio: AspectRatio,
    pub resolution: PlaceholderResolution,
}

#[derive(Debug, Default)]
pub struct PlaceholderCache {
    decoded: Option<(DecodeKey, Option<ImageData>)>,
    fallback: Option<(String, Option<ImageData>)>,
    current: Option<PlaceholderVisual>,
    decode_count: u64,
    fallback_count: u64,
}

impl PlaceholderCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the cached placeholder in line with `inputs` and returns it.
    ///
    /// A successfully decoded encoding wins over the fallback drawable; when
    /// neither is usable the result is `None`.
    pub fn resolve(
        &mut self,
        inputs: PlaceholderInputs<'_>,
        decoder: &dyn PlaceholderDecoder,
        resolver: &dyn FallbackResolver,
    ) -> Option<&PlaceholderVisual> {
        let decoded = match inputs.encoding {
            Some(encoding) => self.decode(encoding, inputs.resolution, inputs.ratio, decoder),
            None => {
                self.decoded = None;
                None
            }
        };

        self.current = match decoded {
            Some(image) => Some(PlaceholderVisual {
                image,
                source: PlaceholderSource::BlurHash,
            }),
            None => inputs.fallback.and_then(|id| {
                self.fallback(id, resolver).map(|image| PlaceholderVisual {
                    image,
                    source: PlaceholderSource::Fallback(id.to_string()),
                })
            }),
        };

        self.current.as_ref()
    }

    fn decode(
        &mut self,
        encoding: &str,
        resolution: PlaceholderResolution,
        ratio: AspectRatio,
        decoder: &dyn PlaceholderDecoder,
    ) -> Option<ImageData> {
        if let Some((key, image)) = &self.decoded {
            if key.matches(encoding, resolution, ratio) {
                return image.clone();
            }
        }

        let (width, height) = decode_dimensions(ratio, resolution);
        self.decode_count += 1;
        let image = match decoder.decode(encoding, width, height) {
            Ok(image) => Some(image),
            Err(err) => {
                tracing::debug!(width, height, error = %err, "placeholder decode failed");
                None
            }
        };

        self.decoded = Some((
            DecodeKey {
                encoding: encoding.to_string(),
                resolution,
                ratio_bits: ratio.to_bits(),
            },
            image.clone(),
        ));
        image
    }

    fn fallback(&mut self, id: &str, resolver: &dyn FallbackResolver) -> Option<ImageData> {
        if let Some((cached_id, image)) = &self.fallback {
            if cached_id == id {
                return image.clone();
            }
        }

        self.fallback_count += 1;
        let image = resolver.resolve(id);
        if image.is_none() {
            tracing::debug!(id, "fallback drawable not found");
        }
        self.fallback = Some((id.to_string(), image.clone()));
        image
    }

    /// The placeholder produced by the last [`resolve`](Self::resolve).
    #[must_use]
    pub fn current(&self) -> Option<&PlaceholderVisual> {
        self.current.as_ref()
    }

    /// Number of times the decoder has been invoked.
    #[must_use]
    pub fn decode_count(&self) -> u64 {
        self.decode_count
    }

    /// Number of times the fallback resolver has been invoked.
    #[must_use]
    pub fn fallback_count(&self) -> u64 {
        self.fallback_count
    }
}
