// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Components follow the Elm-style "state down, messages up" pattern: the
//! host owns the component state, forwards its messages to `update`, and
//! embeds its `view`.
//!
//! - [`async_image`] - Remote image with BlurHash placeholder and static fallback
//! - [`aspect`] - Aspect-ratio sizing helpers
//! - [`crossfade`] - Placeholder-to-image transition timing

pub mod aspect;
pub mod async_image;
pub mod crossfade;

pub use async_image::{AsyncImage, ContentScale, Context, DisplayRequest, Displayed};
