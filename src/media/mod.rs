// SPDX-License-Identifier: MPL-2.0
//! Decoded image data shared by the placeholder, fallback and loader paths.

pub mod image;

pub use image::{decode_bytes, rasterize_svg, ImageData};
