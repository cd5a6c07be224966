//! Monotonic time source behind a trait so ticking is testable.

use std::time::Instant;

/// Monotonic clock reporting seconds since an arbitrary origin.
///
/// Tests drive the scheduler through its `*_at` methods with synthetic
/// timestamps instead of implementing this.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall-clock implementation over `std::time::Instant`.
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}
