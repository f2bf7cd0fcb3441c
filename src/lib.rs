// SPDX-License-Identifier: MPL-2.0
//! `iced_poster` is a remote image view for television-style media browsers,
//! built with the Iced GUI framework.
//!
//! While the image loads, or when it cannot be loaded, the view shows a
//! bitmap decoded from the item's BlurHash, falling back to a bundled icon.
//! See [`ui::AsyncImage`].

#![doc(html_root_url = "https://docs.rs/iced_poster/0.1.0")]

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logging;
pub mod media;
pub mod paths;
pub mod placeholder;
pub mod resources;
pub mod ui;
