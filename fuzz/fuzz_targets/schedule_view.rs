//! Fuzz target: structured timetables through the station view

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use railboard_board::{
    schedule_view, BoardSettings, ConfirmationStore, FilterMode, SortKey, StationControls,
    ViewContext,
};
use railboard_core::{
    LevelContent, SimTime, StationId, StationInfo, Stop, Timetable, TimetableEntry, TrainId,
};

#[derive(Arbitrary, Debug)]
struct FuzzStop {
    station: u8,
    arrival_minutes: u16,
    layover: u8,
    arrived: bool,
    departed: bool,
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    trains: Vec<Vec<FuzzStop>>,
    now_minutes: u16,
    prefix: String,
    filter: u8,
    sort: u8,
}

const STATIONS: u8 = 4;

fuzz_target!(|input: FuzzInput| {
    let station = |n: u8| StationId::new(format!("s{}", n % STATIONS));
    let now = SimTime::from_hms(0, input.now_minutes as i64, 0);

    let mut confirmations = ConfirmationStore::new();
    let mut timetable = Timetable::new();
    for (i, stops) in input.trains.iter().enumerate() {
        let train = TrainId::new(format!("T{i}"));
        for stop in stops {
            confirmations.toggle_arrived(&station(stop.station), &train, stop.arrived, now);
            confirmations.toggle_departed(&station(stop.station), &train, stop.departed, now);
        }
        timetable.insert(TimetableEntry {
            train,
            train_type: String::new(),
            max_speed: String::new(),
            composition: String::new(),
            stops: stops
                .iter()
                .map(|s| {
                    Stop::new(
                        station(s.station),
                        1,
                        SimTime::from_hms(0, s.arrival_minutes as i64, 0),
                        s.layover as u32,
                    )
                })
                .collect(),
        });
    }

    let level = LevelContent {
        raw: serde_json::Value::Null,
        stations: (0..STATIONS)
            .map(|n| StationInfo {
                uuid: station(n),
                name: format!("Station {n}"),
            })
            .collect(),
    };
    let settings = BoardSettings::default();
    let ctx = ViewContext {
        timetable: &timetable,
        level: &level,
        confirmations: &confirmations,
        settings: &settings,
        now,
    };
    let controls = StationControls {
        search_prefix: input.prefix,
        filter: [FilterMode::All, FilterMode::Approaching, FilterMode::Unconfirmed][input.filter as usize % 3],
        sort: [SortKey::ArrivalTime, SortKey::DepartureTime, SortKey::NextAction][input.sort as usize % 3],
    };

    for n in 0..STATIONS {
        let rows = schedule_view(&ctx, &station(n), &controls);
        for row in &rows {
            assert!(row.train.has_prefix(&controls.search_prefix));
            if row.is_pass_through {
                assert_eq!(row.departure_status, row.arrival_status);
                assert_eq!(row.actual_departure, row.actual_arrival);
            }
        }
    }
});
