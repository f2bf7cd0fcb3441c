// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the preview application.

use crate::config::Config;
use crate::loader::ImageLoader;
use crate::ui::async_image;

/// Position of a tile in the preview grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId {
    pub section: usize,
    pub index: usize,
}

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// A tile's own message, including its crossfade frames.
    Tile(TileId, async_image::Message),
    /// Drop decoded images from memory and load every tile again.
    Reload,
}

/// Startup state prepared by the launcher.
#[derive(Debug, Clone)]
pub struct Flags {
    pub config: Config,
    /// Reason the configuration fell back to defaults, if it did.
    pub config_warning: Option<String>,
    pub loader: ImageLoader,
    /// Replaces the demo poster URL.
    pub url: Option<String>,
}
