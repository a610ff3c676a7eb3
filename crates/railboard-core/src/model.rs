//! Schedule data model
//!
//! Everything here is produced once by the save parser and is read-only
//! afterwards. A reload builds a fresh [`Scenario`] instead of mutating one.

use std::collections::HashMap;

use serde::Deserialize;

use crate::{SimTime, StationId, TrainId, MINUTE_MS};

/// Scenario metadata from the first line of the export
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MapInfo {
    /// Display name of the map
    #[serde(rename = "Name")]
    pub name: String,
    /// Remaining fields, kept verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A single station visit in a train's route
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stop {
    pub station: StationId,
    pub platform: i32,
    pub arrival: SimTime,
    /// Dwell minutes, zero for a pass-through
    pub layover: u32,
}

impl Stop {
    pub fn new(station: StationId, platform: i32, arrival: SimTime, layover: u32) -> Self {
        Stop {
            station,
            platform,
            arrival,
            layover,
        }
    }

    /// Planned departure, always `arrival + layover` minutes
    #[inline]
    pub fn departure(&self) -> SimTime {
        SimTime::from_millis(self.arrival.as_millis() + self.layover as i64 * MINUTE_MS)
    }

    #[inline]
    pub fn is_pass_through(&self) -> bool {
        self.layover == 0
    }
}

/// One train and its route
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimetableEntry {
    pub train: TrainId,
    pub train_type: String,
    /// Kept as exported, the board never does arithmetic on it
    pub max_speed: String,
    pub composition: String,
    /// Stops in route order
    pub stops: Vec<Stop>,
}

impl TimetableEntry {
    /// First stop of the route at `station`, with its route index
    pub fn stop_at(&self, station: &StationId) -> Option<(usize, &Stop)> {
        self.stops
            .iter()
            .enumerate()
            .find(|(_, stop)| &stop.station == station)
    }

    pub fn visits(&self, station: &StationId) -> bool {
        self.stop_at(station).is_some()
    }

    pub fn first_stop(&self) -> Option<&Stop> {
        self.stops.first()
    }

    pub fn last_stop(&self) -> Option<&Stop> {
        self.stops.last()
    }
}

/// Train ID → entry, iterated in export order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Timetable {
    entries: Vec<TimetableEntry>,
    index: HashMap<TrainId, usize>,
}

impl Timetable {
    pub fn new() -> Self {
        Timetable::default()
    }

    /// Insert an entry; a repeated train ID replaces the earlier entry in place
    pub fn insert(&mut self, entry: TimetableEntry) -> Option<TimetableEntry> {
        match self.index.get(&entry.train) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot], entry)),
            None => {
                self.index.insert(entry.train.clone(), self.entries.len());
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn get(&self, train: &str) -> Option<&TimetableEntry> {
        self.index.get(train).map(|&slot| &self.entries[slot])
    }

    pub fn contains(&self, train: &str) -> bool {
        self.index.contains_key(train)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimetableEntry> {
        self.entries.iter()
    }

    /// Trains calling at `station`, paired with their (first) stop there
    pub fn visiting<'a>(
        &'a self,
        station: &'a StationId,
    ) -> impl Iterator<Item = (&'a TimetableEntry, &'a Stop)> + 'a {
        self.entries
            .iter()
            .filter_map(move |entry| entry.stop_at(station).map(|(_, stop)| (entry, stop)))
    }

    /// Earliest arrival at any train's first stop
    pub fn earliest_first_arrival(&self) -> Option<SimTime> {
        self.entries
            .iter()
            .filter_map(|entry| entry.first_stop())
            .map(|stop| stop.arrival)
            .min()
    }
}

impl FromIterator<TimetableEntry> for Timetable {
    fn from_iter<I: IntoIterator<Item = TimetableEntry>>(iter: I) -> Self {
        let mut timetable = Timetable::new();
        for entry in iter {
            timetable.insert(entry);
        }
        timetable
    }
}

/// Station projection of the level content
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct StationInfo {
    pub uuid: StationId,
    pub name: String,
}

/// Opaque scenario data plus the station list the board needs
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LevelContent {
    pub raw: serde_json::Value,
    pub stations: Vec<StationInfo>,
}

impl LevelContent {
    pub fn station(&self, id: &StationId) -> Option<&StationInfo> {
        self.stations.iter().find(|s| &s.uuid == id)
    }

    pub fn station_name(&self, id: &StationId) -> Option<&str> {
        self.station(id).map(|s| s.name.as_str())
    }

    pub fn has_station(&self, id: &StationId) -> bool {
        self.station(id).is_some()
    }

    /// Stations ordered by display name, for station selection
    pub fn stations_by_name(&self) -> Vec<&StationInfo> {
        let mut stations: Vec<_> = self.stations.iter().collect();
        stations.sort_by(|a, b| a.name.cmp(&b.name));
        stations
    }
}

/// Length or speed override, passed through uninterpreted
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverrideEntry {
    pub kind: String,
    pub id: String,
    pub value: String,
}

/// Everything one successful load produces
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    pub raw_text: String,
    pub map_info: MapInfo,
    /// Second line of the header segment, not interpreted
    pub layout: String,
    pub length_overrides: Vec<OverrideEntry>,
    pub speed_overrides: Vec<OverrideEntry>,
    pub timetable: Timetable,
    pub level_content: LevelContent,
}

impl Scenario {
    /// Clock value right after loading: one minute before the earliest
    /// first-stop arrival
    pub fn initial_time(&self) -> SimTime {
        self.timetable
            .earliest_first_arrival()
            .map(|t| SimTime::from_millis(t.as_millis() - MINUTE_MS))
            .unwrap_or(SimTime::ZERO)
    }
}
