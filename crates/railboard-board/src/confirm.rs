//! Operator confirmations
//!
//! Local to one instance, never persisted or synchronized, dropped on reload.

use std::collections::HashMap;

use railboard_core::{SimTime, StationId, TrainId};
use tracing::debug;

/// Acknowledgment of one event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Confirmation {
    #[default]
    NotConfirmed,
    ConfirmedAt(SimTime),
}

impl Confirmation {
    /// Checkbox semantics: checked stamps the current simulated time
    pub fn from_toggle(confirmed: bool, now: SimTime) -> Self {
        if confirmed {
            Confirmation::ConfirmedAt(now)
        } else {
            Confirmation::NotConfirmed
        }
    }

    #[inline]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Confirmation::ConfirmedAt(_))
    }

    #[inline]
    pub fn time(&self) -> Option<SimTime> {
        match self {
            Confirmation::ConfirmedAt(t) => Some(*t),
            Confirmation::NotConfirmed => None,
        }
    }
}

/// Arrival and departure acknowledgments of one train at one station
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfirmationRecord {
    pub arrived: Confirmation,
    pub departed: Confirmation,
}

/// Station → train → record
#[derive(Clone, Debug, Default)]
pub struct ConfirmationStore {
    stations: HashMap<StationId, HashMap<TrainId, ConfirmationRecord>>,
}

impl ConfirmationStore {
    pub fn new() -> Self {
        ConfirmationStore::default()
    }

    /// Record for a train at a station; unknown keys read as unconfirmed
    pub fn record(&self, station: &StationId, train: &TrainId) -> ConfirmationRecord {
        self.stations
            .get(station)
            .and_then(|trains| trains.get(train))
            .copied()
            .unwrap_or_default()
    }

    /// Whether a record exists (it is created on first display)
    pub fn contains(&self, station: &StationId, train: &TrainId) -> bool {
        self.stations
            .get(station)
            .is_some_and(|trains| trains.contains_key(train))
    }

    /// Create records for displayed trains that have none yet
    pub fn touch<'a>(&mut self, station: &StationId, trains: impl IntoIterator<Item = &'a TrainId>) {
        let records = self.stations.entry(station.clone()).or_default();
        for train in trains {
            records.entry(train.clone()).or_default();
        }
    }

    pub fn toggle_arrived(&mut self, station: &StationId, train: &TrainId, confirmed: bool, now: SimTime) {
        let record = self.record_mut(station, train);
        record.arrived = Confirmation::from_toggle(confirmed, now);
        debug!(%station, %train, confirmed, "arrival toggled");
    }

    /// Only meaningful for stops with a layover; callers reject pass-throughs
    pub fn toggle_departed(&mut self, station: &StationId, train: &TrainId, confirmed: bool, now: SimTime) {
        let record = self.record_mut(station, train);
        record.departed = Confirmation::from_toggle(confirmed, now);
        debug!(%station, %train, confirmed, "departure toggled");
    }

    /// Forget every record of every station
    pub fn reset(&mut self) {
        self.stations.clear();
    }

    /// Number of records across all stations
    pub fn len(&self) -> usize {
        self.stations.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record_mut(&mut self, station: &StationId, train: &TrainId) -> &mut ConfirmationRecord {
        self.stations
            .entry(station.clone())
            .or_default()
            .entry(train.clone())
            .or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_stamps_time() {
        let mut store = ConfirmationStore::new();
        let (station, train) = (StationId::new("s"), TrainId::new("t"));
        let now = SimTime::from_hms(10, 2, 0);

        store.toggle_arrived(&station, &train, true, now);
        assert_eq!(store.record(&station, &train).arrived, Confirmation::ConfirmedAt(now));
        assert_eq!(store.record(&station, &train).departed, Confirmation::NotConfirmed);

        store.toggle_arrived(&station, &train, false, now);
        assert!(!store.record(&station, &train).arrived.is_confirmed());
    }

    #[test]
    fn test_records_are_per_station() {
        let mut store = ConfirmationStore::new();
        let train = TrainId::new("t");
        store.toggle_departed(&StationId::new("a"), &train, true, SimTime::ZERO);

        assert!(store.record(&StationId::new("a"), &train).departed.is_confirmed());
        assert!(!store.record(&StationId::new("b"), &train).departed.is_confirmed());
    }

    #[test]
    fn test_touch_is_lazy_and_idempotent() {
        let mut store = ConfirmationStore::new();
        let station = StationId::new("s");
        let trains = [TrainId::new("1"), TrainId::new("2")];
        store.toggle_arrived(&station, &trains[0], true, SimTime::ZERO);
        store.touch(&station, trains.iter());

        assert_eq!(store.len(), 2);
        assert!(store.contains(&station, &trains[1]));
        assert!(store.record(&station, &trains[0]).arrived.is_confirmed());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut store = ConfirmationStore::new();
        let station = StationId::new("s");
        let train = TrainId::new("t");
        store.toggle_arrived(&station, &train, true, SimTime::ZERO);
        store.toggle_departed(&station, &train, true, SimTime::ZERO);
        store.reset();

        assert!(store.is_empty());
        assert_eq!(store.record(&station, &train), ConfirmationRecord::default());
    }
}
