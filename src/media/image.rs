// SPDX-License-Identifier: MPL-2.0
//! Image decoding from encoded bytes (PNG, JPEG, WebP, GIF, SVG, etc.).

use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::{GenericImageView, ImageError};
use resvg::usvg;

/// Decoded pixels, owned by the `iced` handle and shared between clones.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    /// Creates a new `ImageData` from RGBA pixels, moving them into the handle.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            handle: image::Handle::from_rgba(width, height, pixels),
            width,
            height,
        }
    }

    /// Decoded size in memory (width * height * 4 for RGBA).
    #[must_use]
    pub fn byte_size(&self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

/// Returns true if the bytes look like an SVG document rather than a raster format.
fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(256)];
    let text = String::from_utf8_lossy(head);
    let trimmed = text.trim_start();
    trimmed.starts_with("<svg") || (trimmed.starts_with("<?xml") && text.contains("<svg"))
}

/// Decode an encoded image held in memory.
///
/// SVG documents are rasterized at their intrinsic size; everything else goes
/// through the `image` crate.
///
/// # Errors
///
/// Returns [`Error::Svg`] for unparsable SVG data and [`Error::Decode`] for
/// unsupported or corrupt raster data.
pub fn decode_bytes(bytes: &[u8]) -> Result<ImageData> {
    if looks_like_svg(bytes) {
        return rasterize_svg(bytes, None);
    }

    let img = image_rs::load_from_memory(bytes).map_err(|e| Error::Decode(e.to_string()))?;
    let (width, height) = img.dimensions();
    let pixels = img.to_rgba8().into_vec();

    Ok(ImageData::from_rgba(width, height, pixels))
}

/// Rasterize SVG data, optionally scaling it so its longer side equals `target`.
///
/// # Errors
///
/// Returns [`Error::Svg`] if parsing fails or the document has empty dimensions.
pub fn rasterize_svg(svg_data: &[u8], target: Option<u32>) -> Result<ImageData> {
    let tree = usvg::Tree::from_data(svg_data, &usvg::Options::default())
        .map_err(|e| Error::Svg(e.to_string()))?;

    let size = tree.size();
    if size.width() <= 0.0 || size.height() <= 0.0 {
        return Err(Error::Svg("SVG has empty dimensions".into()));
    }

    let scale = match target {
        Some(target) if target > 0 => target as f32 / size.width().max(size.height()),
        _ => 1.0,
    };
    let width = (size.width() * scale).round() as u32;
    let height = (size.height() * scale).round() as u32;
    if width == 0 || height == 0 {
        return Err(Error::Svg("SVG has empty dimensions".into()));
    }

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| Error::Svg("Failed to allocate SVG pixmap".into()))?;

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    Ok(ImageData::from_rgba(width, height, pixmap.data().to_vec()))
}

impl From<ImageError> for Error {
    fn from(err: ImageError) -> Self {
        Error::Decode(err.to_string())
    }
}
