//! Dispatcher - the application state of one board instance
//!
//! Owns the loaded scenario, the operator confirmations, the clock and the
//! tracked station boards. Every operation the presentation layer forwards
//! is one non-overlapping step; the scheduler drives the rest.

use std::sync::Arc;

use railboard_board::{
    BoardSettings, ConfirmationStore, FilterMode, ScheduleRow, SortKey, StationBoard, ViewContext,
};
use railboard_core::{
    RailboardError, RailboardResult, Scenario, SimTime, StationId, StationInfo, TrainId,
};
use railboard_save::parse_save;
use railboard_time::{ClockController, SyncRegister};
use tracing::{debug, info, warn};

/// Application state of one instance
pub struct Dispatcher {
    scenario: Option<Arc<Scenario>>,
    confirmations: ConfirmationStore,
    clock: ClockController,
    boards: Vec<StationBoard>,
    settings: BoardSettings,
}

impl Dispatcher {
    /// Dispatcher with a monotonic clock over `register`
    pub fn new(register: SyncRegister, settings: BoardSettings) -> Self {
        Self::with_clock(ClockController::new(register), settings)
    }

    pub fn with_clock(clock: ClockController, settings: BoardSettings) -> Self {
        Dispatcher {
            scenario: None,
            confirmations: ConfirmationStore::new(),
            clock,
            boards: Vec::new(),
            settings,
        }
    }

    // ---- loading ----

    /// Parse and install a save export; on error nothing changes
    pub fn load_text(&mut self, raw: &str) -> RailboardResult<()> {
        self.load(raw, true)
    }

    /// Store the loaded export in the shared register
    pub fn save_locally(&self) -> RailboardResult<()> {
        let scenario = self.scenario.as_ref().ok_or(RailboardError::NotLoaded)?;
        self.register().set_saved_text(&scenario.raw_text);
        info!(bytes = scenario.raw_text.len(), "save stored locally");
        Ok(())
    }

    /// Load the export stored in the shared register
    pub fn load_local(&mut self) -> RailboardResult<()> {
        let raw = self.register().saved_text().ok_or(RailboardError::NoLocalSave)?;
        self.load(&raw, true)
    }

    pub fn clear_local(&self) {
        self.register().clear_saved_text();
        info!("local save cleared");
    }

    pub fn has_local_save(&self) -> bool {
        self.register().saved_text().is_some()
    }

    /// First step of a new instance: pause the shared clock and, under
    /// auto-sync, pick up the stored export without touching the shared
    /// time. Returns whether a save was loaded.
    pub fn startup(&mut self) -> RailboardResult<bool> {
        self.clock.force_pause();
        if !self.auto_sync() {
            return Ok(false);
        }
        let Some(raw) = self.register().saved_text() else {
            return Ok(false);
        };
        self.load(&raw, false)?;
        Ok(true)
    }

    fn load(&mut self, raw: &str, publish: bool) -> RailboardResult<()> {
        let scenario = parse_save(raw).map_err(|e| {
            warn!(error = %e, "rejected save export");
            e
        })?;

        let initial = scenario.initial_time();
        self.confirmations.reset();
        self.boards.clear();
        self.clock.load(initial, publish);
        info!(
            map = %scenario.map_info.name,
            trains = scenario.timetable.len(),
            stations = scenario.level_content.stations.len(),
            start = %initial.with_seconds(),
            "scenario installed"
        );
        self.scenario = Some(Arc::new(scenario));
        Ok(())
    }

    pub fn scenario(&self) -> Option<&Arc<Scenario>> {
        self.scenario.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.scenario.is_some()
    }

    // ---- synchronization ----

    pub fn set_auto_sync(&mut self, enabled: bool) {
        self.register().set_auto_sync(enabled);
        info!(enabled, "auto-sync changed");
    }

    pub fn auto_sync(&self) -> bool {
        self.register().auto_sync()
    }

    pub fn register(&self) -> &SyncRegister {
        self.clock.register()
    }

    // ---- stations ----

    /// Stations of the loaded level, sorted by name
    pub fn stations(&self) -> Vec<&StationInfo> {
        self.scenario
            .as_deref()
            .map(|scenario| scenario.level_content.stations_by_name())
            .unwrap_or_default()
    }

    /// Start showing a board for `station`; returns false if already tracked
    pub fn track_station(&mut self, station: StationId) -> bool {
        if self.board(&station).is_some() {
            return false;
        }
        debug!(%station, "tracking station");
        self.boards.push(StationBoard::new(station.clone()));
        self.refresh_station(&station);
        true
    }

    pub fn untrack_station(&mut self, station: &StationId) -> bool {
        let before = self.boards.len();
        self.boards.retain(|board| board.station() != station);
        before != self.boards.len()
    }

    pub fn tracked_stations(&self) -> impl Iterator<Item = &StationId> {
        self.boards.iter().map(StationBoard::station)
    }

    pub fn boards(&self) -> &[StationBoard] {
        &self.boards
    }

    /// Rows currently displayed for a tracked station
    pub fn rows(&self, station: &StationId) -> Option<&[ScheduleRow]> {
        self.board(station).map(StationBoard::rows)
    }

    // ---- board controls ----

    pub fn set_search(&mut self, station: &StationId, prefix: &str) -> bool {
        self.update_board(station, |board| board.set_search(prefix))
    }

    pub fn set_filter(&mut self, station: &StationId, filter: FilterMode) -> bool {
        self.update_board(station, |board| board.set_filter(filter))
    }

    pub fn set_sort(&mut self, station: &StationId, sort: SortKey) -> bool {
        self.update_board(station, |board| board.set_sort(sort))
    }

    /// Approaching window for every board
    pub fn set_grace(&mut self, arrival_minutes: u32, departure_minutes: u32) {
        self.settings = self.settings.clone().with_grace(arrival_minutes, departure_minutes);
        self.refresh_all(true);
    }

    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    // ---- confirmations ----

    pub fn toggle_arrived(&mut self, station: &StationId, train: &TrainId, confirmed: bool) {
        let now = self.clock.now();
        self.confirmations.toggle_arrived(station, train, confirmed, now);
        self.refresh_station(station);
    }

    /// Rejected for pass-through stops, which have no separate departure
    pub fn toggle_departed(&mut self, station: &StationId, train: &TrainId, confirmed: bool) -> bool {
        let pass_through = self
            .scenario
            .as_deref()
            .and_then(|scenario| scenario.timetable.get(train.as_str()))
            .and_then(|entry| entry.stop_at(station))
            .is_some_and(|(_, stop)| stop.is_pass_through());
        if pass_through {
            debug!(%station, %train, "ignoring departure toggle of pass-through");
            return false;
        }

        let now = self.clock.now();
        self.confirmations.toggle_departed(station, train, confirmed, now);
        self.refresh_station(station);
        true
    }

    pub fn reset_confirmations(&mut self) {
        self.confirmations.reset();
        info!("confirmations reset");
        self.refresh_all(true);
    }

    pub fn confirmations(&self) -> &ConfirmationStore {
        &self.confirmations
    }

    // ---- clock ----

    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn start(&mut self) {
        self.clock.start();
    }

    pub fn stop(&mut self) {
        self.clock.stop();
    }

    pub fn toggle_pause(&mut self) {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Manual time edit from `HH[:MM[:SS]]`; rejected while running or
    /// when unparsable
    pub fn edit_time(&mut self, text: &str) -> bool {
        let time = match SimTime::parse_time_of_day(text) {
            Ok(time) => time,
            Err(e) => {
                debug!(error = %e, "rejected time edit");
                return false;
            }
        };
        if !self.clock.set_time(time) {
            return false;
        }
        self.refresh_all(true);
        true
    }

    pub fn clock(&self) -> &ClockController {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut ClockController {
        &mut self.clock
    }

    // ---- refresh ----

    /// Recompute every board; returns how many were rebuilt
    pub fn refresh_all(&mut self, force: bool) -> usize {
        self.refresh_boards(None, force)
    }

    fn refresh_station(&mut self, station: &StationId) -> usize {
        self.refresh_boards(Some(station), true)
    }

    fn refresh_boards(&mut self, only: Option<&StationId>, force: bool) -> usize {
        let Some(scenario) = self.scenario.as_deref() else {
            return 0;
        };
        let ctx = ViewContext {
            timetable: &scenario.timetable,
            level: &scenario.level_content,
            confirmations: &self.confirmations,
            settings: &self.settings,
            now: self.clock.now(),
        };

        let mut rebuilt = 0;
        for board in &mut self.boards {
            if only.is_some_and(|station| board.station() != station) {
                continue;
            }
            if board.refresh(&ctx, force) {
                rebuilt += 1;
            }
        }

        for board in &self.boards {
            self.confirmations.touch(board.station(), board.displayed());
        }
        rebuilt
    }

    fn board(&self, station: &StationId) -> Option<&StationBoard> {
        self.boards.iter().find(|board| board.station() == station)
    }

    fn update_board(&mut self, station: &StationId, update: impl FnOnce(&mut StationBoard)) -> bool {
        let Some(board) = self.boards.iter_mut().find(|board| board.station() == station) else {
            return false;
        };
        update(board);
        self.refresh_station(station);
        true
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("loaded", &self.is_loaded())
            .field("clock", &self.clock)
            .field("boards", &self.boards.len())
            .field("confirmations", &self.confirmations.len())
            .finish()
    }
}
