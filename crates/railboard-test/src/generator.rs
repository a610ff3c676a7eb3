//! Synthetic save exports
//!
//! Seeded, so a failing scenario can be replayed from its seed.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use railboard_core::{StationId, TrainId};
use serde_json::json;

/// Shape of a generated save
#[derive(Clone, Debug)]
pub struct SaveGeneratorConfig {
    pub stations: usize,
    pub trains: usize,
    /// Upper bound of stops per train (at least one)
    pub max_stops: usize,
    /// Probability that a stop has no layover
    pub pass_through_ratio: f64,
    /// Longest layover in minutes
    pub max_layover: u32,
    /// First departures are spread over this many hours from 05:00
    pub service_hours: u32,
}

impl Default for SaveGeneratorConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl SaveGeneratorConfig {
    /// A handful of trains, for readable failures
    pub fn minimal() -> Self {
        SaveGeneratorConfig {
            stations: 3,
            trains: 4,
            max_stops: 3,
            pass_through_ratio: 0.3,
            max_layover: 5,
            service_hours: 2,
        }
    }

    pub fn standard() -> Self {
        SaveGeneratorConfig {
            stations: 12,
            trains: 80,
            max_stops: 8,
            pass_through_ratio: 0.3,
            max_layover: 10,
            service_hours: 16,
        }
    }

    /// Large boards for benchmarks
    pub fn stress() -> Self {
        SaveGeneratorConfig {
            stations: 40,
            trains: 2_000,
            max_stops: 20,
            pass_through_ratio: 0.4,
            max_layover: 15,
            service_hours: 20,
        }
    }
}

/// A generated export with the identifiers it contains
#[derive(Clone, Debug)]
pub struct GeneratedSave {
    pub raw: String,
    pub stations: Vec<StationId>,
    pub trains: Vec<TrainId>,
}

pub struct SaveGenerator {
    config: SaveGeneratorConfig,
    rng: StdRng,
}

impl SaveGenerator {
    pub fn new(config: SaveGeneratorConfig, seed: u64) -> Self {
        SaveGenerator {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn generate(&mut self) -> GeneratedSave {
        let stations: Vec<StationId> = (0..self.config.stations.max(1))
            .map(|i| StationId::new(format!("st-{i:04x}")))
            .collect();
        let prefixes = ["IC", "RE", "RB", "S"];

        let mut trains = Vec::with_capacity(self.config.trains);
        let mut rows = Vec::with_capacity(self.config.trains);
        for i in 0..self.config.trains {
            let kind = prefixes[i % prefixes.len()];
            let train = TrainId::new(format!("{kind}{}", 100 + i));
            rows.push(self.timetable_row(&train, kind, &stations));
            trains.push(train);
        }

        let level = json!({
            "stations": {
                "stations": stations
                    .iter()
                    .enumerate()
                    .map(|(i, id)| json!({ "uuid": id.as_str(), "name": format!("Station {i}") }))
                    .collect::<Vec<_>>(),
            },
            "tracks": [],
        });

        let mut raw = String::new();
        raw.push_str(&json!({ "Name": "Generated", "Version": 1 }).to_string());
        raw.push_str("\nLAYOUT");
        raw.push_str("\n+++stations:");
        for station in &stations {
            raw.push('\n');
            raw.push_str(station.as_str());
        }
        raw.push_str("\n+++speed overrides:\ntrack t0 80");
        raw.push_str("\n+++timetable:");
        for row in &rows {
            raw.push('\n');
            raw.push_str(row);
        }
        raw.push_str("\n+++level content:\n");
        raw.push_str(&level.to_string());
        raw.push('\n');

        GeneratedSave { raw, stations, trains }
    }

    fn timetable_row(&mut self, train: &TrainId, kind: &str, stations: &[StationId]) -> String {
        let stop_count = self.rng.gen_range(1..=self.config.max_stops.clamp(1, stations.len()));
        let route: Vec<&StationId> = stations.choose_multiple(&mut self.rng, stop_count).collect();

        let window = self.config.service_hours.max(1) as i64 * 60;
        let mut minute = 5 * 60 + self.rng.gen_range(0..window);
        let mut seconds = if self.rng.gen_bool(0.2) { 30 } else { 0 };

        let mut row = format!("{train} {kind} {} L+{} x y", 80 + 20 * self.rng.gen_range(0..5), self.rng.gen_range(1..9));
        for station in route {
            let layover = if self.rng.gen_bool(self.config.pass_through_ratio) {
                0
            } else {
                self.rng.gen_range(1..=self.config.max_layover.max(1))
            };
            let platform = self.rng.gen_range(1..6);
            row.push_str(&format!(
                " {station}#{platform}#{:02}:{:02}:{seconds:02}#{layover}#0",
                minute / 60,
                minute % 60
            ));
            minute += layover as i64 + self.rng.gen_range(3..20);
            seconds = 0;
        }
        row
    }
}
