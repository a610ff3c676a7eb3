//! Clock controller - the authoritative simulated time of one instance

use std::sync::Arc;
use std::time::{Duration, Instant};

use railboard_core::SimTime;
use tracing::{debug, info};

use crate::{MonotonicSource, RealTimeSource, SyncRegister};

/// Real-time anchor of the clock
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// Time changed locally; the next reconcile owes a refresh
    Pending,
    /// Nothing owed
    Settled,
    /// Running; reference for the next advance
    At(Instant),
}

/// Result of one reconcile step
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// The shared sync value replaced the local time
    pub adopted: bool,
    /// First settle after a change; boards should recompute
    pub refresh: bool,
}

/// Simulated clock, 1:1 with real time while running, frozen while paused
pub struct ClockController {
    current: SimTime,
    /// Pause state used when auto-sync is off
    local_running: bool,
    anchor: Anchor,
    register: SyncRegister,
    source: Arc<dyn RealTimeSource>,
}

impl ClockController {
    /// Clock driven by the monotonic OS clock
    pub fn new(register: SyncRegister) -> Self {
        Self::with_source(register, Arc::new(MonotonicSource))
    }

    pub fn with_source(register: SyncRegister, source: Arc<dyn RealTimeSource>) -> Self {
        ClockController {
            current: SimTime::ZERO,
            local_running: false,
            anchor: Anchor::Pending,
            register,
            source,
        }
    }

    /// Current simulated time
    pub fn now(&self) -> SimTime {
        self.current
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn register(&self) -> &SyncRegister {
        &self.register
    }

    /// Running state: the shared pause flag under auto-sync (missing reads
    /// as paused), the local flag otherwise
    pub fn is_running(&self) -> bool {
        if self.register.auto_sync() {
            self.register.paused() == Some(false)
        } else {
            self.local_running
        }
    }

    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.local_running = true;
        self.register.set_paused(false);
        self.anchor = Anchor::At(self.source.now());
        info!(time = %self.current.with_seconds(), "clock started");
    }

    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.local_running = false;
        self.register.set_paused(true);
        self.publish();
        info!(time = %self.current.with_seconds(), "clock stopped");
    }

    /// Manual edit; ignored while running. Returns whether it was applied.
    pub fn set_time(&mut self, time: SimTime) -> bool {
        if self.is_running() {
            debug!(requested = %time.with_seconds(), "ignoring time edit while running");
            return false;
        }
        self.current = time;
        if self.anchor == Anchor::Settled {
            self.anchor = Anchor::Pending;
        }
        self.publish();
        true
    }

    /// Add real time elapsed since the previous advance (zero on the first
    /// call after starting)
    pub fn advance(&mut self) -> Duration {
        let now = self.source.now();
        let elapsed = match self.anchor {
            Anchor::At(previous) => now.saturating_duration_since(previous),
            Anchor::Pending | Anchor::Settled => Duration::ZERO,
        };
        self.anchor = Anchor::At(now);
        self.current = self.current + elapsed;
        elapsed
    }

    /// Adopt the shared sync value while paused
    pub fn reconcile(&mut self) -> ReconcileOutcome {
        let synced = self.synced_value();
        if self.anchor == Anchor::Settled && synced == self.current {
            return ReconcileOutcome::default();
        }

        let outcome = ReconcileOutcome {
            adopted: synced != self.current,
            refresh: self.anchor != Anchor::Settled,
        };
        if outcome.adopted {
            debug!(
                from = %self.current.with_seconds(),
                to = %synced.with_seconds(),
                "adopting synced time"
            );
        }
        self.current = synced;
        self.anchor = Anchor::Settled;
        outcome
    }

    /// Write the current time as the shared sync value
    pub fn publish(&self) {
        self.register.set_synced_time(self.current);
    }

    /// Reset for a freshly loaded scenario: paused, at `initial`
    pub fn load(&mut self, initial: SimTime, publish: bool) {
        self.force_pause();
        self.current = initial;
        self.anchor = Anchor::Pending;
        if publish {
            self.publish();
        }
    }

    /// Pause locally and in the register regardless of the current state
    pub fn force_pause(&mut self) {
        self.local_running = false;
        self.register.set_paused(true);
    }

    fn synced_value(&self) -> SimTime {
        if self.register.auto_sync() {
            self.register.synced_time().unwrap_or(self.current)
        } else {
            self.current
        }
    }
}

impl std::fmt::Debug for ClockController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClockController")
            .field("current", &self.current)
            .field("running", &self.is_running())
            .field("anchor", &self.anchor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ManualSource, MemoryRegister};
    use proptest::prelude::*;

    fn clock_pair() -> (ClockController, ManualSource) {
        let source = ManualSource::new();
        let clock = ClockController::with_source(SyncRegister::in_memory(), Arc::new(source.clone()));
        (clock, source)
    }

    #[test]
    fn test_first_advance_after_start_is_zero() {
        let (mut clock, source) = clock_pair();
        clock.set_time(SimTime::from_hms(10, 0, 0));
        source.advance(Duration::from_secs(30));

        clock.start();
        assert!(clock.is_running());
        assert_eq!(clock.advance(), Duration::ZERO);

        source.advance(Duration::from_millis(250));
        assert_eq!(clock.advance(), Duration::from_millis(250));
        source.advance(Duration::from_millis(750));
        clock.advance();
        assert_eq!(clock.now(), SimTime::from_hms(10, 0, 1));
    }

    #[test]
    fn test_stop_publishes_and_freezes() {
        let (mut clock, source) = clock_pair();
        clock.start();
        clock.advance();
        source.advance(Duration::from_secs(90));
        clock.advance();
        clock.stop();

        assert!(!clock.is_running());
        assert_eq!(clock.register().synced_time(), Some(SimTime::from_hms(0, 1, 30)));
        assert_eq!(clock.register().paused(), Some(true));

        source.advance(Duration::from_secs(10));
        clock.reconcile();
        assert_eq!(clock.now(), SimTime::from_hms(0, 1, 30));
    }

    #[test]
    fn test_set_time_while_running_is_ignored() {
        let (mut clock, _source) = clock_pair();
        clock.set_time(SimTime::from_hms(6, 0, 0));
        clock.start();

        assert!(!clock.set_time(SimTime::from_hms(12, 0, 0)));
        assert_eq!(clock.now(), SimTime::from_hms(6, 0, 0));
        assert_eq!(clock.register().synced_time(), Some(SimTime::from_hms(6, 0, 0)));
    }

    #[test]
    fn test_reconcile_signals_refresh_once() {
        let (mut clock, _source) = clock_pair();
        clock.set_time(SimTime::from_hms(7, 0, 0));

        let first = clock.reconcile();
        assert!(first.refresh);
        assert!(!first.adopted);
        assert_eq!(clock.anchor(), Anchor::Settled);

        assert_eq!(clock.reconcile(), ReconcileOutcome::default());

        clock.set_time(SimTime::from_hms(7, 5, 0));
        assert_eq!(clock.anchor(), Anchor::Pending);
        assert!(clock.reconcile().refresh);
    }

    #[test]
    fn test_reconcile_adopts_remote_time_under_auto_sync() {
        let backend = MemoryRegister::new();
        let register = SyncRegister::new(Arc::new(backend.clone()));
        register.set_auto_sync(true);
        let source = ManualSource::new();
        let mut clock = ClockController::with_source(register, Arc::new(source));
        clock.load(SimTime::from_hms(8, 0, 0), true);
        clock.reconcile();

        let remote = SyncRegister::new(Arc::new(backend));
        remote.set_synced_time(SimTime::from_hms(9, 15, 0));

        let outcome = clock.reconcile();
        assert!(outcome.adopted);
        assert!(!outcome.refresh);
        assert_eq!(clock.now(), SimTime::from_hms(9, 15, 0));
    }

    #[test]
    fn test_without_auto_sync_register_time_is_ignored() {
        let (mut clock, _source) = clock_pair();
        clock.set_time(SimTime::from_hms(8, 0, 0));
        clock.register().set_synced_time(SimTime::from_hms(11, 0, 0));

        let outcome = clock.reconcile();
        assert!(!outcome.adopted);
        assert_eq!(clock.now(), SimTime::from_hms(8, 0, 0));
    }

    #[test]
    fn test_shared_pause_flag_drives_all_synced_instances() {
        let backend = MemoryRegister::new();
        let source = ManualSource::new();
        let make = || {
            let register = SyncRegister::new(Arc::new(backend.clone()));
            register.set_auto_sync(true);
            ClockController::with_source(register, Arc::new(source.clone()))
        };
        let mut a = make();
        let mut b = make();
        a.force_pause();

        assert!(!a.is_running() && !b.is_running());
        a.start();
        assert!(b.is_running());

        // b never called start: its first advance contributes nothing
        assert_eq!(b.advance(), Duration::ZERO);
        source.advance(Duration::from_secs(2));
        assert_eq!(b.advance(), Duration::from_secs(2));

        b.stop();
        assert!(!a.is_running());
    }

    #[test]
    fn test_missing_pause_flag_reads_paused_under_auto_sync() {
        let register = SyncRegister::in_memory();
        register.set_auto_sync(true);
        let clock = ClockController::new(register);
        assert!(!clock.is_running());
    }

    proptest! {
        #[test]
        fn prop_running_clock_tracks_real_time(steps in prop::collection::vec(0u64..5_000, 1..40)) {
            let (mut clock, source) = clock_pair();
            clock.start();
            let mut total = Duration::ZERO;
            for ms in steps {
                let dt = Duration::from_millis(ms);
                source.advance(dt);
                total += dt;
                clock.advance();
            }
            prop_assert_eq!(clock.now(), SimTime::ZERO + total);
        }

        #[test]
        fn prop_paused_synced_clocks_converge(edits in prop::collection::vec((0usize..3, 0i64..86_400), 1..20)) {
            let backend = MemoryRegister::new();
            let source = ManualSource::new();
            let mut clocks: Vec<_> = (0..3)
                .map(|_| {
                    let register = SyncRegister::new(Arc::new(backend.clone()));
                    register.set_auto_sync(true);
                    ClockController::with_source(register, Arc::new(source.clone()))
                })
                .collect();

            let mut last = SimTime::ZERO;
            for (who, secs) in edits {
                last = SimTime::from_hms(0, 0, secs);
                prop_assert!(clocks[who].set_time(last));
            }
            for clock in &mut clocks {
                clock.reconcile();
                prop_assert_eq!(clock.now(), last);
            }
        }
    }
}
