//! Rolling frame-time metrics.
//!
//! A fixed-capacity ring buffer of the most recent frame times, in
//! milliseconds, feeding `average_fps` / `average_frame_time_ms`.
//! Invalid samples (negative or non-finite) are discarded by the
//! recorder; they never corrupt the rolling average.

/// Number of frame-time samples the rolling window holds.
pub const FRAME_SAMPLE_WINDOW: usize = 60;

/// Fixed-capacity ring buffer of frame times.
#[derive(Clone, Debug)]
pub struct FrameMetrics {
    samples: [f64; FRAME_SAMPLE_WINDOW],
    len: usize,
    head: usize,
    frame_count: u64,
}

impl FrameMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: [0.0; FRAME_SAMPLE_WINDOW],
            len: 0,
            head: 0,
            frame_count: 0,
        }
    }

    /// Record one frame time in milliseconds.
    ///
    /// Negative or non-finite samples are dropped.
    pub fn record(&mut self, frame_time_ms: f64) {
        if !frame_time_ms.is_finite() || frame_time_ms < 0.0 {
            return;
        }
        self.samples[self.head] = frame_time_ms;
        self.head = (self.head + 1) % FRAME_SAMPLE_WINDOW;
        self.len = (self.len + 1).min(FRAME_SAMPLE_WINDOW);
        self.frame_count += 1;
    }

    /// Average frame time over the window, in milliseconds.
    ///
    /// Zero before any frame has been recorded.
    #[must_use]
    pub fn average_frame_time_ms(&self) -> f64 {
        if self.len == 0 {
            return 0.0;
        }
        let sum: f64 = self.samples[..self.len].iter().sum();
        sum / self.len as f64
    }

    /// Average frames per second over the window.
    ///
    /// Zero before any frame has been recorded.
    #[must_use]
    pub fn average_fps(&self) -> f64 {
        let avg_ms = self.average_frame_time_ms();
        if avg_ms <= 0.0 {
            return 0.0;
        }
        1000.0 / avg_ms
    }

    /// Total frames recorded since creation or the last reset.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Empty the window and zero the frame counter.
    pub fn reset(&mut self) {
        self.len = 0;
        self.head = 0;
        self.frame_count = 0;
    }
}

impl Default for FrameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
