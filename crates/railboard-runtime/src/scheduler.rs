//! Scheduler - fixed-period driver of the clock and the boards
//!
//! Each tick:
//! 1. Advance the clock (running) or reconcile with the shared time (paused)
//! 2. Update the clock text, publishing the time whenever it changes
//! 3. Refresh every board, forced when the simulated minute changed or the
//!    reconcile step asked for it

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, trace};

use crate::Dispatcher;

/// Dispatcher shared between the scheduler and the operator side
pub type SharedDispatcher = Arc<Mutex<Dispatcher>>;

/// What one tick did
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub running: bool,
    /// Clock as `HH:MM:SS`
    pub clock_text: String,
    pub clock_text_changed: bool,
    /// The shared time replaced the local one
    pub adopted: bool,
    /// Refresh of every board was forced
    pub forced: bool,
    /// Boards whose rows were rebuilt
    pub stations_recomputed: usize,
}

#[derive(Clone, Debug, Default)]
pub struct SchedulerStats {
    pub ticks: u64,
    pub board_rebuilds: u64,
    pub publishes: u64,
    pub last_tick_duration: Duration,
}

/// Tick state carried between ticks
#[derive(Debug, Default)]
pub struct Scheduler {
    last_clock_text: Option<String>,
    last_minute: Option<i64>,
    stats: SchedulerStats,
}

impl Scheduler {
    pub fn new() -> Self {
        Scheduler::default()
    }

    pub fn stats(&self) -> &SchedulerStats {
        &self.stats
    }

    /// Execute one tick against `dispatcher`
    pub fn tick(&mut self, dispatcher: &mut Dispatcher) -> TickReport {
        let start = Instant::now();
        self.stats.ticks += 1;

        // Stage 1: clock
        let running = dispatcher.is_running();
        let (adopted, mut forced) = if running {
            dispatcher.clock_mut().advance();
            (false, false)
        } else {
            let outcome = dispatcher.clock_mut().reconcile();
            (outcome.adopted, outcome.refresh)
        };

        let now = dispatcher.now();
        let minute = now.minute_index();
        if self.last_minute != Some(minute) {
            forced = true;
            self.last_minute = Some(minute);
        }

        // Stage 2: clock text
        let clock_text = now.with_seconds().to_string();
        let clock_text_changed = self.last_clock_text.as_deref() != Some(clock_text.as_str());
        if clock_text_changed {
            dispatcher.clock().publish();
            self.stats.publishes += 1;
            self.last_clock_text = Some(clock_text.clone());
        }

        // Stage 3: boards
        let stations_recomputed = dispatcher.refresh_all(forced);
        self.stats.board_rebuilds += stations_recomputed as u64;
        self.stats.last_tick_duration = start.elapsed();

        trace!(clock = %clock_text, running, forced, stations_recomputed, "tick");

        TickReport {
            running,
            clock_text,
            clock_text_changed,
            adopted,
            forced,
            stations_recomputed,
        }
    }

    /// Tick every `period` until `shutdown` resolves.
    ///
    /// The dispatcher lock is held for the duration of one tick only, so
    /// operator events interleave between ticks, never inside one.
    pub async fn run<S, F>(
        mut self,
        dispatcher: SharedDispatcher,
        period: Duration,
        shutdown: S,
        mut on_tick: F,
    ) -> SchedulerStats
    where
        S: Future<Output = ()>,
        F: FnMut(&Dispatcher, &TickReport),
    {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        info!(period_ms = period.as_millis() as u64, "scheduler started");
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    debug!("scheduler shutdown requested");
                    break;
                }
                _ = ticker.tick() => {
                    let mut guard = dispatcher.lock();
                    let report = self.tick(&mut *guard);
                    on_tick(&*guard, &report);
                }
            }
        }

        info!(ticks = self.stats.ticks, rebuilds = self.stats.board_rebuilds, "scheduler stopped");
        self.stats
    }
}
