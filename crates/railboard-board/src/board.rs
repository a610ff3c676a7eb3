//! Station boards

use railboard_core::{StationId, TrainId};
use tracing::trace;

use crate::{schedule_order, schedule_view, FilterMode, ScheduleRow, SortKey, StationControls, ViewContext};

/// One tracked station with its controls and last rendered rows
#[derive(Clone, Debug)]
pub struct StationBoard {
    station: StationId,
    controls: StationControls,
    displayed: Vec<TrainId>,
    rows: Vec<ScheduleRow>,
}

impl StationBoard {
    pub fn new(station: StationId) -> Self {
        StationBoard {
            station,
            controls: StationControls::default(),
            displayed: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn station(&self) -> &StationId {
        &self.station
    }

    pub fn controls(&self) -> &StationControls {
        &self.controls
    }

    pub fn set_search(&mut self, prefix: impl Into<String>) {
        self.controls.search_prefix = prefix.into();
    }

    pub fn set_filter(&mut self, filter: FilterMode) {
        self.controls.filter = filter;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.controls.sort = sort;
    }

    /// Rows from the last refresh
    pub fn rows(&self) -> &[ScheduleRow] {
        &self.rows
    }

    /// Train IDs from the last refresh, in display order
    pub fn displayed(&self) -> &[TrainId] {
        &self.displayed
    }

    /// Recompute the board.
    ///
    /// Unless `force` is set, the rows are kept when the ordered train IDs
    /// did not change; the caller forces a refresh whenever the statuses may
    /// have moved (minute change, confirmation, control change).
    ///
    /// Returns whether the rows were rebuilt.
    pub fn refresh(&mut self, ctx: &ViewContext<'_>, force: bool) -> bool {
        if !force {
            let order = schedule_order(ctx, &self.station, &self.controls);
            if order == self.displayed {
                trace!(station = %self.station, "board unchanged");
                return false;
            }
        }

        self.rows = schedule_view(ctx, &self.station, &self.controls);
        self.displayed = self.rows.iter().map(|row| row.train.clone()).collect();
        trace!(station = %self.station, rows = self.rows.len(), "board rebuilt");
        true
    }

    /// Drop the rendered rows, e.g. after the timetable went away
    pub fn clear(&mut self) {
        self.displayed.clear();
        self.rows.clear();
    }
}
