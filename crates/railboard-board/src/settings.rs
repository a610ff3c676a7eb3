//! Board settings and per-station controls

use serde::Deserialize;

/// Settings shared by every station board
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    /// Approaching filter: minutes before arrival a train enters the window
    pub arrival_grace_minutes: u32,
    /// Approaching filter: minutes after departure a train stays in the window
    pub departure_grace_minutes: u32,
    /// Extra minutes added to the departure side of the Approaching window.
    /// The arrival side has no such bias.
    pub departure_grace_bias_minutes: u32,
    /// Minutes before a planned event it is shown as approaching
    pub approach_threshold_minutes: u32,
}

impl Default for BoardSettings {
    fn default() -> Self {
        BoardSettings {
            arrival_grace_minutes: 5,
            departure_grace_minutes: 1,
            departure_grace_bias_minutes: 1,
            approach_threshold_minutes: 3,
        }
    }
}

impl BoardSettings {
    pub fn with_grace(mut self, arrival_minutes: u32, departure_minutes: u32) -> Self {
        self.arrival_grace_minutes = arrival_minutes;
        self.departure_grace_minutes = departure_minutes;
        self
    }
}

/// Which trains a board shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FilterMode {
    #[default]
    All,
    /// Inside the grace window around arrival/departure
    Approaching,
    /// Still waiting for an operator confirmation
    Unconfirmed,
}

/// How a board orders its trains
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    ArrivalTime,
    DepartureTime,
    /// Soonest still-pending event of each train
    NextAction,
}

/// Per-station controls
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StationControls {
    /// Case-sensitive train ID prefix; empty matches everything
    pub search_prefix: String,
    pub filter: FilterMode,
    pub sort: SortKey,
}
