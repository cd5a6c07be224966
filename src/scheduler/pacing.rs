//! Frame pacing for hosts without a vsync-style per-frame primitive.
//!
//! Such hosts drive the scheduler from a plain timer loop: tick, render,
//! then sleep for [`sleep_budget`]. Both functions are pure so pacing
//! math stays testable.

use std::time::Duration;

/// Duration of one frame at `target_fps`. Zero when `target_fps` is 0.
#[must_use]
pub fn frame_budget(target_fps: u32) -> Duration {
    if target_fps == 0 {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(1.0 / f64::from(target_fps))
}

/// Time left to sleep after `elapsed` of the current frame's budget has
/// been spent. Zero when the frame is already over budget.
#[must_use]
pub fn sleep_budget(elapsed: Duration, target_fps: u32) -> Duration {
    let budget = frame_budget(target_fps);
    budget.saturating_sub(elapsed)
}
