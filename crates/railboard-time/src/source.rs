//! Real-time sources for the clock controller

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Monotonic reference the simulated clock measures elapsed time against
pub trait RealTimeSource: Send + Sync {
    fn now(&self) -> Instant;
}

/// Monotonic OS clock
#[derive(Clone, Copy, Debug, Default)]
pub struct MonotonicSource;

impl RealTimeSource for MonotonicSource {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to; clones share the same offset
#[derive(Clone, Debug)]
pub struct ManualSource {
    base: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl ManualSource {
    pub fn new() -> Self {
        ManualSource {
            base: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, dt: Duration) {
        *self.offset.lock() += dt;
    }

    pub fn elapsed(&self) -> Duration {
        *self.offset.lock()
    }
}

impl Default for ManualSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RealTimeSource for ManualSource {
    fn now(&self) -> Instant {
        self.base + *self.offset.lock()
    }
}
