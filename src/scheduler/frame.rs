//! The per-frame scheduler.
//!
//! Drives a recurring tick callback with a bounded delta, independently
//! of discrete combat events. The host's per-frame primitive (vsync
//! callback, event-loop redraw) calls [`FrameScheduler::tick`] once per
//! frame; hosts without one drive it from a plain timer loop paced by
//! [`crate::scheduler::pacing`].
//!
//! Ticking never fails: bad timestamps produce a zero delta and are
//! dropped by the metrics recorder rather than propagated.

use tracing::warn;

use super::clock::{Clock, MonotonicClock};
use super::metrics::FrameMetrics;

/// Upper bound on the delta handed to the tick callback, in seconds.
///
/// Protects against tab-suspend or debugger-pause gaps producing
/// multi-second simulation jumps.
pub const MAX_DELTA_SECONDS: f64 = 1.0;

/// Caller-supplied scheduler configuration.
pub struct FrameSchedulerConfig {
    /// Nominal frame rate, used only for pacing hints.
    pub target_fps: u32,

    /// Frame times above this, in milliseconds, invoke the warning
    /// callback.
    pub warning_threshold_ms: f64,

    /// Per-frame callback. Receives the clamped delta in seconds.
    pub on_tick: Box<dyn FnMut(f64)>,

    /// Invoked with the unclamped frame time when it exceeds the
    /// threshold, before the tick callback fires.
    pub on_performance_warning: Option<Box<dyn FnMut(f64)>>,
}

impl FrameSchedulerConfig {
    /// Config with a tick callback, 60 FPS target, and a 33.3 ms
    /// warning threshold (two 60 Hz frames).
    #[must_use]
    pub fn new(on_tick: impl FnMut(f64) + 'static) -> Self {
        Self {
            target_fps: 60,
            warning_threshold_ms: 1000.0 / 30.0,
            on_tick: Box::new(on_tick),
            on_performance_warning: None,
        }
    }

    /// Set the nominal frame rate (builder pattern).
    #[must_use]
    pub fn with_target_fps(mut self, target_fps: u32) -> Self {
        self.target_fps = target_fps;
        self
    }

    /// Set the warning threshold and callback (builder pattern).
    #[must_use]
    pub fn with_performance_warning(
        mut self,
        threshold_ms: f64,
        callback: impl FnMut(f64) + 'static,
    ) -> Self {
        self.warning_threshold_ms = threshold_ms;
        self.on_performance_warning = Some(Box::new(callback));
        self
    }
}

/// Recurring per-frame driver with bounded deltas and rolling metrics.
///
/// The timestamp-explicit methods (`start_at`, `resume_at`, `tick_at`)
/// take seconds on an arbitrary monotonic axis and exist for hosts with
/// their own clock and for tests; the plain variants read the internal
/// monotonic clock.
pub struct FrameScheduler {
    config: FrameSchedulerConfig,
    clock: MonotonicClock,
    metrics: FrameMetrics,
    running: bool,
    paused: bool,
    last_timestamp: Option<f64>,
}

impl FrameScheduler {
    #[must_use]
    pub fn new(config: FrameSchedulerConfig) -> Self {
        Self {
            config,
            clock: MonotonicClock::new(),
            metrics: FrameMetrics::new(),
            running: false,
            paused: false,
            last_timestamp: None,
        }
    }

    /// Start ticking with `now` as the baseline.
    ///
    /// Idempotent: a second call while running is a no-op and does not
    /// move the baseline.
    pub fn start_at(&mut self, now: f64) {
        if self.running {
            return;
        }
        self.running = true;
        self.paused = false;
        self.last_timestamp = Some(now);
    }

    /// Start ticking from the internal clock.
    pub fn start(&mut self) {
        let now = self.clock.now();
        self.start_at(now);
    }

    /// Stop ticking and clear accumulated metrics. Idempotent.
    pub fn stop(&mut self) {
        self.running = false;
        self.paused = false;
        self.last_timestamp = None;
        self.metrics.reset();
    }

    /// Suspend the tick callback. Idempotent; no effect while stopped.
    pub fn pause(&mut self) {
        if self.running {
            self.paused = true;
        }
    }

    /// Resume after a pause, recalibrating the baseline to `now` so the
    /// next delta is not inflated by the paused duration.
    pub fn resume_at(&mut self, now: f64) {
        if self.running && self.paused {
            self.paused = false;
            self.last_timestamp = Some(now);
        }
    }

    /// Resume from the internal clock.
    pub fn resume(&mut self) {
        let now = self.clock.now();
        self.resume_at(now);
    }

    /// Process one frame at timestamp `now` (seconds).
    ///
    /// Computes the delta from the previous timestamp, records the
    /// unclamped frame time, fires the performance warning when the
    /// threshold is exceeded, then invokes the tick callback with the
    /// delta clamped to `[0, MAX_DELTA_SECONDS]`. Skipped entirely while
    /// stopped or paused.
    pub fn tick_at(&mut self, now: f64) {
        if !self.running || self.paused {
            return;
        }

        let last = self.last_timestamp.unwrap_or(now);
        self.last_timestamp = Some(now);

        let delta = now - last;
        let frame_time_ms = delta * 1000.0;

        // The recorder drops negative samples itself.
        self.metrics.record(frame_time_ms);

        if frame_time_ms > self.config.warning_threshold_ms {
            warn!(
                frame_time_ms,
                threshold_ms = self.config.warning_threshold_ms,
                "slow frame"
            );
            if let Some(on_warning) = self.config.on_performance_warning.as_mut() {
                on_warning(frame_time_ms);
            }
        }

        (self.config.on_tick)(delta.clamp(0.0, MAX_DELTA_SECONDS));
    }

    /// Process one frame at the internal clock's current time.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        self.tick_at(now);
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Nominal frame rate from the config.
    #[must_use]
    pub fn target_fps(&self) -> u32 {
        self.config.target_fps
    }

    /// Rolling average FPS; zero before any frame has been recorded.
    #[must_use]
    pub fn average_fps(&self) -> f64 {
        self.metrics.average_fps()
    }

    /// Rolling average frame time in milliseconds; zero before any
    /// frame has been recorded.
    #[must_use]
    pub fn average_frame_time_ms(&self) -> f64 {
        self.metrics.average_frame_time_ms()
    }

    /// Frames ticked since start or the last stop.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.metrics.frame_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_scheduler() -> (FrameScheduler, Rc<RefCell<Vec<f64>>>) {
        let deltas = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&deltas);
        let config = FrameSchedulerConfig::new(move |delta| {
            sink.borrow_mut().push(delta);
        });
        (FrameScheduler::new(config), deltas)
    }

    #[test]
    fn test_delta_between_ticks() {
        let (mut scheduler, deltas) = recording_scheduler();
        scheduler.start_at(0.0);
        scheduler.tick_at(0.016);
        scheduler.tick_at(0.032);

        let deltas = deltas.borrow();
        assert_eq!(deltas.len(), 2);
        assert!((deltas[0] - 0.016).abs() < 1e-9);
        assert!((deltas[1] - 0.016).abs() < 1e-9);
    }

    #[test]
    fn test_delta_is_clamped_to_one_second() {
        let (mut scheduler, deltas) = recording_scheduler();
        scheduler.start_at(0.0);
        scheduler.tick_at(5.0);

        assert_eq!(deltas.borrow()[0], MAX_DELTA_SECONDS);
        // Unclamped frame time still lands in the metrics.
        assert!((scheduler.average_frame_time_ms() - 5000.0).abs() < 1e-6);
    }

    #[test]
    fn test_backwards_timestamp_yields_zero_delta() {
        let (mut scheduler, deltas) = recording_scheduler();
        scheduler.start_at(10.0);
        scheduler.tick_at(9.0);

        assert_eq!(deltas.borrow()[0], 0.0);
        // Negative sample discarded.
        assert_eq!(scheduler.frame_count(), 0);
        assert_eq!(scheduler.average_fps(), 0.0);
    }

    #[test]
    fn test_start_is_idempotent() {
        let (mut scheduler, deltas) = recording_scheduler();
        scheduler.start_at(0.0);
        // Second start must not move the baseline.
        scheduler.start_at(100.0);
        scheduler.tick_at(0.5);

        assert!((deltas.borrow()[0] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_stop_clears_metrics_and_is_idempotent() {
        let (mut scheduler, deltas) = recording_scheduler();
        scheduler.start_at(0.0);
        scheduler.tick_at(0.016);
        assert_eq!(scheduler.frame_count(), 1);

        scheduler.stop();
        scheduler.stop();

        assert!(!scheduler.is_running());
        assert_eq!(scheduler.frame_count(), 0);
        assert_eq!(scheduler.average_fps(), 0.0);

        // Ticks while stopped are ignored.
        scheduler.tick_at(0.5);
        assert_eq!(deltas.borrow().len(), 1);
    }

    #[test]
    fn test_pause_skips_ticks_and_resume_recalibrates() {
        let (mut scheduler, deltas) = recording_scheduler();
        scheduler.start_at(0.0);
        scheduler.tick_at(0.016);

        scheduler.pause();
        scheduler.pause();
        assert!(scheduler.is_paused());

        // Paused: callback and recording both skipped.
        scheduler.tick_at(1.0);
        scheduler.tick_at(2.0);
        assert_eq!(deltas.borrow().len(), 1);
        assert_eq!(scheduler.frame_count(), 1);

        // Resume recalibrates: the paused gap does not inflate the delta.
        scheduler.resume_at(10.0);
        scheduler.tick_at(10.016);
        let deltas = deltas.borrow();
        assert_eq!(deltas.len(), 2);
        assert!((deltas[1] - 0.016).abs() < 1e-9);
    }

    #[test]
    fn test_resume_without_pause_is_noop() {
        let (mut scheduler, deltas) = recording_scheduler();
        scheduler.start_at(0.0);
        scheduler.resume_at(50.0);
        scheduler.tick_at(0.016);

        // Baseline unchanged by the stray resume.
        assert!((deltas.borrow()[0] - 0.016).abs() < 1e-9);
    }

    #[test]
    fn test_performance_warning_fires_before_tick() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let tick_order = Rc::clone(&order);
        let warn_order = Rc::clone(&order);
        let config = FrameSchedulerConfig::new(move |_| {
            tick_order.borrow_mut().push("tick");
        })
        .with_performance_warning(20.0, move |frame_time_ms| {
            assert!(frame_time_ms > 20.0);
            warn_order.borrow_mut().push("warn");
        });

        let mut scheduler = FrameScheduler::new(config);
        scheduler.start_at(0.0);
        scheduler.tick_at(0.016);
        scheduler.tick_at(0.066);

        assert_eq!(*order.borrow(), vec!["tick", "warn", "tick"]);
    }
}
