//! Continuous time: the per-frame scheduler and its metrics.
//!
//! The scheduler is blind to combat semantics. It hands the active scene
//! a bounded delta each frame and tracks rolling frame-time statistics;
//! discrete combat events never pass through it.

pub mod clock;
pub mod frame;
pub mod metrics;
pub mod pacing;

pub use clock::{Clock, MonotonicClock};
pub use frame::{FrameScheduler, FrameSchedulerConfig, MAX_DELTA_SECONDS};
pub use metrics::{FrameMetrics, FRAME_SAMPLE_WINDOW};
