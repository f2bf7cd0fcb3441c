// SPDX-License-Identifier: MPL-2.0
//! Static fallback drawables.
//!
//! Resources are addressed by a short identifier (e.g. `"ic_movie"`). The
//! component never reads assets itself; it asks a [`FallbackResolver`], so
//! hosts can plug in their own resource bundles. [`BundledDrawables`] serves
//! the SVG icons embedded in the binary from `assets/drawable/`.

use crate::media::{self, ImageData};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(RustEmbed)]
#[folder = "assets/drawable/"]
struct Drawables;

/// Identifiers of the drawables bundled with the crate.
pub mod drawable {
    pub const MOVIE: &str = "ic_movie";
    pub const TV: &str = "ic_tv";
    pub const USER: &str = "ic_user";
    pub const FOLDER: &str = "ic_folder";
}

/// Default raster size (longer side, in pixels) for bundled vector drawables.
pub const DEFAULT_DRAWABLE_SIZE: u32 = 128;

/// Resolves a resource identifier to a drawable.
///
/// Returns `None` when the resource does not exist or cannot be rendered.
pub trait FallbackResolver {
    fn resolve(&self, id: &str) -> Option<ImageData>;
}

impl<F> FallbackResolver for F
where
    F: Fn(&str) -> Option<ImageData>,
{
    fn resolve(&self, id: &str) -> Option<ImageData> {
        self(id)
    }
}

/// Resolver backed by the drawables embedded at compile time.
///
/// Rasterized results (including misses) are memoized per identifier.
pub struct BundledDrawables {
    size: u32,
    rendered: Mutex<HashMap<String, Option<ImageData>>>,
}

impl BundledDrawables {
    #[must_use]
    pub fn new(size: u32) -> Self {
        Self {
            size: size.max(1),
            rendered: Mutex::new(HashMap::new()),
        }
    }

    /// Lists the identifiers of every bundled drawable.
    pub fn ids() -> impl Iterator<Item = String> {
        Drawables::iter().filter_map(|file| {
            file.rsplit_once('.')
                .map(|(stem, _)| stem.to_string())
        })
    }

    fn render(&self, id: &str) -> Option<ImageData> {
        if let Some(file) = Drawables::get(&format!("{id}.svg")) {
            return match media::rasterize_svg(&file.data, Some(self.size)) {
                Ok(image) => Some(image),
                Err(err) => {
                    tracing::warn!(id, error = %err, "failed to rasterize bundled drawable");
                    None
                }
            };
        }

        if let Some(file) = Drawables::get(&format!("{id}.png")) {
            return match media::decode_bytes(&file.data) {
                Ok(image) => Some(image),
                Err(err) => {
                    tracing::warn!(id, error = %err, "failed to decode bundled drawable");
                    None
                }
            };
        }

        tracing::debug!(id, "no bundled drawable with this id");
        None
    }
}

impl Default for BundledDrawables {
    fn default() -> Self {
        Self::new(DEFAULT_DRAWABLE_SIZE)
    }
}

impl FallbackResolver for BundledDrawables {
    fn resolve(&self, id: &str) -> Option<ImageData> {
        let mut rendered = match self.rendered.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        rendered
            .entry(id.to_string())
            .or_insert_with(|| self.render(id))
            .clone()
    }
}
