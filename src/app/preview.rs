// SPDX-License-Identifier: MPL-2.0
//! The preview grid: one tile per loading scenario worth eyeballing.

use crate::domain::ui::PlaceholderResolution;
use crate::resources::drawable;
use crate::ui::{AsyncImage, DisplayRequest};

/// Poster served by the public Jellyfin demo instance.
pub const DEMO_URL: &str = "https://demo.jellyfin.org/stable/Items/b07f6514-a3e3-aa7d-8c27-3458c9cd4c82/Images/Primary?tag=29526c6e8f8d9286c8f6d03275da6ebd";

/// Relative locator that can never be fetched.
pub const CORRUPT_URL: &str = "82/Images/Primary?tag=29526c6e8f8d9286c8f6d03275da6ebd";

/// BlurHash of the demo poster.
pub const DEMO_HASH: &str = "dI9Qjlof00RjxukBRjM{ITaz-;j[WBj[t7oeIUaxt7WB";

/// `DEMO_HASH` cut short; fails to decode.
pub const TRUNCATED_HASH: &str = "dI9Qjlof00RjxukBRjM{ITaz-;j[WBj[t7oe";

pub const TILE_SIZE: f32 = 128.0;

/// Poster ratio used throughout the grid.
const POSTER_RATIO: f32 = 0.66;

/// Decoration drawn around a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Plain,
    Rounded,
    Circle,
}

impl Frame {
    #[must_use]
    pub fn radius(self) -> f32 {
        match self {
            Frame::Plain => 0.0,
            Frame::Rounded => 5.0,
            Frame::Circle => TILE_SIZE / 2.0,
        }
    }
}

#[derive(Debug)]
pub struct Tile {
    pub caption: &'static str,
    pub frame: Frame,
    pub request: DisplayRequest,
    pub image: AsyncImage,
}

impl Tile {
    fn new(caption: &'static str, frame: Frame, request: DisplayRequest) -> Self {
        Self {
            caption,
            frame,
            request,
            image: AsyncImage::new(),
        }
    }
}

#[derive(Debug)]
pub struct Section {
    pub title: &'static str,
    pub tiles: Vec<Tile>,
}

/// Builds the preview grid.
///
/// `url` replaces the demo poster; `resolution` applies wherever a tile does
/// not pin its own.
#[must_use]
pub fn sections(url: &str, resolution: PlaceholderResolution) -> Vec<Section> {
    let tile = || {
        DisplayRequest::new()
            .height(TILE_SIZE)
            .placeholder_resolution(resolution.value())
    };

    vec![
        Section {
            title: "Remote image",
            tiles: vec![
                Tile::new(
                    "Poster, BlurHash 16 + fallback",
                    Frame::Rounded,
                    tile()
                        .locator(url)
                        .blur_hash(DEMO_HASH)
                        .fallback(drawable::MOVIE)
                        .aspect_ratio(POSTER_RATIO)
                        .placeholder_resolution(16)
                        .content_description("Movie poster"),
                ),
                Tile::new(
                    "Square, BlurHash",
                    Frame::Circle,
                    tile()
                        .locator(url)
                        .blur_hash(DEMO_HASH)
                        .aspect_ratio(1.0)
                        .content_description("Avatar"),
                ),
            ],
        },
        Section {
            title: "Fallbacks",
            tiles: vec![
                Tile::new(
                    "Corrupt URL: BlurHash",
                    Frame::Plain,
                    tile()
                        .locator(CORRUPT_URL)
                        .blur_hash(DEMO_HASH)
                        .aspect_ratio(POSTER_RATIO),
                ),
                Tile::new(
                    "Empty URL, truncated hash: icon",
                    Frame::Plain,
                    tile()
                        .locator("")
                        .blur_hash(TRUNCATED_HASH)
                        .fallback(drawable::MOVIE)
                        .aspect_ratio(POSTER_RATIO),
                ),
            ],
        },
        Section {
            title: "BlurHash resolution",
            tiles: [(8, "8 px"), (16, "16 px"), (32, "32 px"), (128, "128 px")]
                .into_iter()
                .map(|(resolution, caption)| {
                    Tile::new(
                        caption,
                        Frame::Plain,
                        tile()
                            .blur_hash(DEMO_HASH)
                            .aspect_ratio(POSTER_RATIO)
                            .placeholder_resolution(resolution),
                    )
                })
                .collect(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_matches_expected_layout() {
        let sections = sections(DEMO_URL, PlaceholderResolution::default());
        let counts: Vec<usize> = sections.iter().map(|s| s.tiles.len()).collect();
        assert_eq!(counts, vec![2, 2, 4]);
    }

    #[test]
    fn url_override_applies_to_remote_tiles_only() {
        let sections = sections("https://example.org/a.jpg", PlaceholderResolution::default());

        for tile in &sections[0].tiles {
            assert_eq!(tile.request.locator.as_deref(), Some("https://example.org/a.jpg"));
        }
        assert_eq!(sections[1].tiles[0].request.locator.as_deref(), Some(CORRUPT_URL));
        assert!(sections[2].tiles.iter().all(|t| t.request.locator.is_none()));
    }

    #[test]
    fn configured_resolution_is_the_default() {
        let sections = sections(DEMO_URL, PlaceholderResolution::new(24));

        assert_eq!(sections[0].tiles[0].request.placeholder_resolution.value(), 16);
        assert_eq!(sections[0].tiles[1].request.placeholder_resolution.value(), 24);
        let pinned: Vec<u32> = sections[2]
            .tiles
            .iter()
            .map(|t| t.request.placeholder_resolution.value())
            .collect();
        assert_eq!(pinned, vec![8, 16, 32, 128]);
    }

    #[test]
    fn truncated_hash_is_a_prefix() {
        assert!(DEMO_HASH.starts_with(TRUNCATED_HASH));
        assert!(TRUNCATED_HASH.len() < DEMO_HASH.len());
    }
}
