// SPDX-License-Identifier: MPL-2.0
//! Linear crossfade between the placeholder and the loaded image.

use crate::domain::ui::CrossfadeDuration;
use std::time::{Duration, Instant};

/// Interval between animation frames while a crossfade runs (~60 FPS).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossfade {
    started_at: Instant,
    duration: Duration,
}

impl Crossfade {
    #[must_use]
    pub fn start(now: Instant, duration: CrossfadeDuration) -> Self {
        Self {
            started_at: now,
            duration: duration.as_duration(),
        }
    }

    /// Opacity of the incoming image at `now`, in `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.duration
    }
}
