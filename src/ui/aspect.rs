// SPDX-License-Identifier: MPL-2.0
//! Sizing helpers that keep the image area at a fixed aspect ratio.

use crate::domain::ui::AspectRatio;
use iced::{Length, Size};

/// Largest size with `ratio` that fits inside `available`.
///
/// Unbounded axes (e.g. inside a scrollable) are derived from the bounded
/// one. When both axes are unbounded there is nothing to fit against and the
/// result is [`Size::ZERO`].
#[must_use]
pub fn constrain(available: Size, ratio: AspectRatio) -> Size {
    let ratio = ratio.value();
    let width_bounded = available.width.is_finite() && available.width > 0.0;
    let height_bounded = available.height.is_finite() && available.height > 0.0;

    match (width_bounded, height_bounded) {
        (true, true) => {
            let width = available.width.min(available.height * ratio);
            Size::new(width, width / ratio)
        }
        (true, false) => Size::new(available.width, available.width / ratio),
        (false, true) => Size::new(available.height * ratio, available.height),
        (false, false) => Size::ZERO,
    }
}

/// Size implied by a fixed caller width or height, if either is fixed.
///
/// A fixed width wins over a fixed height; the other axis follows the ratio.
#[must_use]
pub fn fixed_size(width: Length, height: Length, ratio: AspectRatio) -> Option<Size> {
    let ratio = ratio.value();
    match (width, height) {
        (Length::Fixed(width), _) => Some(Size::new(width, width / ratio)),
        (_, Length::Fixed(height)) => Some(Size::new(height * ratio, height)),
        _ => None,
    }
}
