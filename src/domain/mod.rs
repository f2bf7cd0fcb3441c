// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value types with ZERO external dependencies.
//!
//! # Modules
//!
//! - [`ui`]: UI value objects ([`AspectRatio`](ui::newtypes::AspectRatio),
//!   [`PlaceholderResolution`](ui::newtypes::PlaceholderResolution),
//!   [`CrossfadeDuration`](ui::newtypes::CrossfadeDuration))

pub mod ui;
