//! Station schedule view
//!
//! A pure function of the timetable, the confirmations, the simulated time
//! and the board controls. Selection, sorting and filtering run in that
//! order: sorting only looks at planned times and confirmations, filters
//! also consult the live clock.

use std::cmp::Ordering;

use railboard_core::{
    LevelContent, SimTime, StationId, Stop, Timetable, TimetableEntry, TrainId, MINUTE_MS,
};

use crate::{BoardSettings, ConfirmationRecord, ConfirmationStore, FilterMode, SortKey, StationControls};

/// Highlight of an arrival, a departure, or a whole row
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventStatus {
    #[default]
    None,
    Approaching,
    Now,
}

/// A station referenced by a stop, with its name when level content knows it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StationRef {
    pub id: StationId,
    pub name: Option<String>,
}

/// Previous or next stop relative to the board's station
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Neighbor {
    /// No previous stop: the train enters the map here
    Incoming,
    /// No next stop: the train leaves the map here
    Outgoing,
    Station(StationRef),
}

impl Neighbor {
    pub fn name(&self) -> Option<&str> {
        match self {
            Neighbor::Station(station) => station.name.as_deref(),
            Neighbor::Incoming | Neighbor::Outgoing => None,
        }
    }
}

/// One row of a station board, everything the presentation layer renders
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleRow {
    pub train: TrainId,
    pub train_type: String,
    pub max_speed: String,
    pub composition: String,

    pub from: Neighbor,
    /// Route origin, when it is not already the previous stop
    pub origin: Option<StationRef>,
    pub to: Neighbor,
    /// Route terminus, when it is not already the next stop
    pub terminus: Option<StationRef>,

    pub planned_arrival: SimTime,
    pub actual_arrival: Option<SimTime>,
    pub arrival_status: EventStatus,
    /// Whole minutes past planned arrival while unconfirmed
    pub arrival_delay_minutes: Option<i64>,

    pub planned_departure: SimTime,
    pub actual_departure: Option<SimTime>,
    pub departure_status: EventStatus,
    /// Whole minutes past planned departure while unconfirmed (never for
    /// pass-throughs)
    pub departure_delay_minutes: Option<i64>,

    pub platform: i32,
    pub layover_minutes: u32,
    pub is_pass_through: bool,
}

impl ScheduleRow {
    /// Compact highlight of the whole row
    pub fn urgency(&self) -> EventStatus {
        self.arrival_status.max(self.departure_status)
    }

    pub fn from_station_name(&self) -> Option<&str> {
        self.from.name()
    }

    pub fn to_station_name(&self) -> Option<&str> {
        self.to.name()
    }
}

/// Inputs shared by every board during one refresh
#[derive(Clone, Copy)]
pub struct ViewContext<'a> {
    pub timetable: &'a Timetable,
    pub level: &'a LevelContent,
    pub confirmations: &'a ConfirmationStore,
    pub settings: &'a BoardSettings,
    pub now: SimTime,
}

/// A train calling at the board's station
#[derive(Clone, Copy, Debug)]
pub struct Visit<'a> {
    pub entry: &'a TimetableEntry,
    /// Index of `stop` in the route
    pub index: usize,
    pub stop: &'a Stop,
    pub record: ConfirmationRecord,
}

impl Visit<'_> {
    pub fn train(&self) -> &TrainId {
        &self.entry.train
    }

    /// Planned time this visit sorts by
    pub fn sort_time(&self, key: SortKey) -> SimTime {
        match key {
            SortKey::ArrivalTime => self.stop.arrival,
            SortKey::DepartureTime => self.stop.departure(),
            SortKey::NextAction => {
                if self.record.arrived.is_confirmed() && !self.record.departed.is_confirmed() {
                    self.stop.departure()
                } else {
                    self.stop.arrival
                }
            }
        }
    }
}

/// Ordered, filtered visits of `station`; empty for unknown stations
pub fn select_visits<'a>(
    ctx: &ViewContext<'a>,
    station: &StationId,
    controls: &StationControls,
) -> Vec<Visit<'a>> {
    if !ctx.level.has_station(station) {
        return Vec::new();
    }

    let mut visits: Vec<Visit<'a>> = ctx
        .timetable
        .iter()
        .filter(|entry| entry.train.has_prefix(&controls.search_prefix))
        .filter_map(|entry| {
            let (index, stop) = entry.stop_at(station)?;
            Some(Visit {
                entry,
                index,
                stop,
                record: ctx.confirmations.record(station, &entry.train),
            })
        })
        .collect();

    sort_visits(&mut visits, controls.sort);
    visits.retain(|visit| passes_filter(visit, controls.filter, ctx.now, ctx.settings));
    visits
}

/// Stable ascending sort by the key's planned time
pub fn sort_visits(visits: &mut [Visit<'_>], key: SortKey) {
    visits.sort_by(|a, b| compare_visits(a, b, key));
}

fn compare_visits(a: &Visit<'_>, b: &Visit<'_>, key: SortKey) -> Ordering {
    a.sort_time(key).cmp(&b.sort_time(key))
}

pub fn passes_filter(visit: &Visit<'_>, filter: FilterMode, now: SimTime, settings: &BoardSettings) -> bool {
    match filter {
        FilterMode::All => true,
        FilterMode::Approaching => {
            let before_arrival = visit.stop.arrival.millis_since(now);
            let after_departure = now.millis_since(visit.stop.departure());
            let departure_window =
                (settings.departure_grace_minutes + settings.departure_grace_bias_minutes) as i64;

            before_arrival <= settings.arrival_grace_minutes as i64 * MINUTE_MS
                && after_departure <= departure_window * MINUTE_MS
        }
        FilterMode::Unconfirmed => {
            let record = &visit.record;
            !(record.arrived.is_confirmed()
                && (record.departed.is_confirmed() || visit.stop.is_pass_through()))
        }
    }
}

/// Arrival highlight
pub fn arrival_status(stop: &Stop, record: &ConfirmationRecord, now: SimTime, threshold_minutes: u32) -> EventStatus {
    if record.arrived.is_confirmed() {
        return EventStatus::None;
    }

    let minutes = now.whole_minutes_since(stop.arrival);
    if minutes >= 0 {
        EventStatus::Now
    } else if minutes >= -(threshold_minutes as i64) {
        EventStatus::Approaching
    } else {
        EventStatus::None
    }
}

/// Departure highlight; a pass-through mirrors its arrival
pub fn departure_status(stop: &Stop, record: &ConfirmationRecord, now: SimTime, threshold_minutes: u32) -> EventStatus {
    if stop.is_pass_through() {
        return arrival_status(stop, record, now, threshold_minutes);
    }

    let departed = record.departed.is_confirmed();
    let minutes = now.whole_minutes_since(stop.departure());
    if minutes == 0 || (!departed && minutes > 0) {
        EventStatus::Now
    } else if departed {
        EventStatus::None
    } else if minutes >= -(threshold_minutes as i64) {
        EventStatus::Approaching
    } else {
        EventStatus::None
    }
}

/// Rows for `station`, in display order
pub fn schedule_view(ctx: &ViewContext<'_>, station: &StationId, controls: &StationControls) -> Vec<ScheduleRow> {
    select_visits(ctx, station, controls)
        .iter()
        .map(|visit| build_row(ctx, visit))
        .collect()
}

/// Ordered train IDs the view would show, without building rows
pub fn schedule_order(ctx: &ViewContext<'_>, station: &StationId, controls: &StationControls) -> Vec<TrainId> {
    select_visits(ctx, station, controls)
        .iter()
        .map(|visit| visit.train().clone())
        .collect()
}

pub fn build_row(ctx: &ViewContext<'_>, visit: &Visit<'_>) -> ScheduleRow {
    let Visit { entry, index, stop, record } = *visit;
    let threshold = ctx.settings.approach_threshold_minutes;
    let pass_through = stop.is_pass_through();
    let last = entry.stops.len() - 1;

    let station_ref = |stop: &Stop| StationRef {
        id: stop.station.clone(),
        name: ctx.level.station_name(&stop.station).map(str::to_string),
    };

    let from = match index.checked_sub(1) {
        Some(previous) => Neighbor::Station(station_ref(&entry.stops[previous])),
        None => Neighbor::Incoming,
    };
    let to = if index < last {
        Neighbor::Station(station_ref(&entry.stops[index + 1]))
    } else {
        Neighbor::Outgoing
    };
    let origin = (index >= 2).then(|| station_ref(&entry.stops[0]));
    let terminus = (index + 2 <= last).then(|| station_ref(&entry.stops[last]));

    let actual_arrival = record.arrived.time();
    let actual_departure = if pass_through {
        actual_arrival
    } else {
        record.departed.time()
    };

    let arrival_delay_minutes = (!record.arrived.is_confirmed())
        .then(|| ctx.now.whole_minutes_since(stop.arrival));
    let departure_delay_minutes = (!pass_through && !record.departed.is_confirmed())
        .then(|| ctx.now.whole_minutes_since(stop.departure()));

    ScheduleRow {
        train: entry.train.clone(),
        train_type: entry.train_type.clone(),
        max_speed: entry.max_speed.clone(),
        composition: entry.composition.clone(),
        from,
        origin,
        to,
        terminus,
        planned_arrival: stop.arrival,
        actual_arrival,
        arrival_status: arrival_status(stop, &record, ctx.now, threshold),
        arrival_delay_minutes,
        planned_departure: stop.departure(),
        actual_departure,
        departure_status: departure_status(stop, &record, ctx.now, threshold),
        departure_delay_minutes,
        platform: stop.platform,
        layover_minutes: stop.layover,
        is_pass_through: pass_through,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Confirmation;
    use proptest::prelude::*;
    use railboard_core::StationInfo;

    fn hm(h: i64, m: i64) -> SimTime {
        SimTime::from_hms(h, m, 0)
    }

    fn level() -> LevelContent {
        LevelContent {
            raw: serde_json::Value::Null,
            stations: ["north", "mid", "south", "far"]
                .iter()
                .map(|id| StationInfo {
                    uuid: StationId::new(*id),
                    name: id.to_uppercase(),
                })
                .collect(),
        }
    }

    fn entry(train: &str, stops: &[(&str, SimTime, u32)]) -> TimetableEntry {
        TimetableEntry {
            train: TrainId::new(train),
            train_type: "IC".into(),
            max_speed: "140".into(),
            composition: "L+5".into(),
            stops: stops
                .iter()
                .map(|(station, arrival, layover)| Stop::new(StationId::new(*station), 1, *arrival, *layover))
                .collect(),
        }
    }

    fn mid() -> StationId {
        StationId::new("mid")
    }

    #[derive(Debug)]
    struct Fixture {
        timetable: Timetable,
        level: LevelContent,
        confirmations: ConfirmationStore,
        settings: BoardSettings,
    }

    impl Fixture {
        fn new(entries: Vec<TimetableEntry>) -> Self {
            Fixture {
                timetable: entries.into_iter().collect(),
                level: level(),
                confirmations: ConfirmationStore::new(),
                settings: BoardSettings::default(),
            }
        }

        fn ctx(&self, now: SimTime) -> ViewContext<'_> {
            ViewContext {
                timetable: &self.timetable,
                level: &self.level,
                confirmations: &self.confirmations,
                settings: &self.settings,
                now,
            }
        }

        fn order(&self, now: SimTime, controls: &StationControls) -> Vec<String> {
            schedule_order(&self.ctx(now), &mid(), controls)
                .into_iter()
                .map(|id| id.0)
                .collect()
        }
    }

    fn controls(filter: FilterMode, sort: SortKey) -> StationControls {
        StationControls {
            search_prefix: String::new(),
            filter,
            sort,
        }
    }

    #[test]
    fn test_arrival_status_scenario() {
        let stop = Stop::new(mid(), 1, hm(10, 0), 2);
        let record = ConfirmationRecord::default();

        assert_eq!(arrival_status(&stop, &record, hm(10, 0), 3), EventStatus::Now);
        assert_eq!(arrival_status(&stop, &record, hm(9, 58), 3), EventStatus::Approaching);
        assert_eq!(arrival_status(&stop, &record, hm(9, 57), 3), EventStatus::Approaching);
        assert_eq!(arrival_status(&stop, &record, SimTime::from_hms(9, 56, 59), 3), EventStatus::None);
        assert_eq!(arrival_status(&stop, &record, hm(9, 50), 3), EventStatus::None);

        let confirmed = ConfirmationRecord {
            arrived: Confirmation::ConfirmedAt(hm(10, 1)),
            ..Default::default()
        };
        assert_eq!(arrival_status(&stop, &confirmed, hm(10, 5), 3), EventStatus::None);
    }

    #[test]
    fn test_departure_status_with_layover() {
        let stop = Stop::new(mid(), 1, hm(10, 0), 4);
        let open = ConfirmationRecord::default();
        let departed = ConfirmationRecord {
            departed: Confirmation::ConfirmedAt(hm(10, 4)),
            ..Default::default()
        };

        assert_eq!(departure_status(&stop, &open, hm(10, 1), 3), EventStatus::Approaching);
        assert_eq!(departure_status(&stop, &open, hm(10, 0), 3), EventStatus::None);
        assert_eq!(departure_status(&stop, &open, hm(10, 4), 3), EventStatus::Now);
        assert_eq!(departure_status(&stop, &open, hm(10, 30), 3), EventStatus::Now);

        // Within the departure minute the highlight stays on even when confirmed
        assert_eq!(departure_status(&stop, &departed, SimTime::from_hms(10, 4, 30), 3), EventStatus::Now);
        assert_eq!(departure_status(&stop, &departed, hm(10, 5), 3), EventStatus::None);
        assert_eq!(departure_status(&stop, &departed, hm(10, 2), 3), EventStatus::None);
    }

    #[test]
    fn test_row_urgency() {
        let fixture = Fixture::new(vec![entry("A", &[("mid", hm(10, 0), 5)])]);
        let ctrl = StationControls::default();

        let rows = schedule_view(&fixture.ctx(hm(9, 30)), &mid(), &ctrl);
        assert_eq!(rows[0].urgency(), EventStatus::None);

        let rows = schedule_view(&fixture.ctx(hm(9, 58)), &mid(), &ctrl);
        assert_eq!(rows[0].urgency(), EventStatus::Approaching);

        let rows = schedule_view(&fixture.ctx(hm(10, 1)), &mid(), &ctrl);
        assert_eq!(rows[0].arrival_status, EventStatus::Now);
        assert_eq!(rows[0].departure_status, EventStatus::None);
        assert_eq!(rows[0].urgency(), EventStatus::Now);
    }

    #[test]
    fn test_prefix_search_keeps_sort_order() {
        let fixture = Fixture::new(vec![
            entry("ICE204", &[("mid", hm(11, 0), 2)]),
            entry("RB17", &[("mid", hm(9, 0), 2)]),
            entry("ICE311", &[("mid", hm(8, 0), 2)]),
        ]);
        let mut ctrl = controls(FilterMode::All, SortKey::ArrivalTime);
        ctrl.search_prefix = "ICE".into();
        assert_eq!(fixture.order(hm(7, 0), &ctrl), vec!["ICE311", "ICE204"]);

        ctrl.search_prefix = "RB1".into();
        assert_eq!(fixture.order(hm(7, 0), &ctrl), vec!["RB17"]);

        ctrl.search_prefix = "rb1".into();
        assert!(fixture.order(hm(7, 0), &ctrl).is_empty());
    }

    #[test]
    fn test_sort_keys() {
        let mut fixture = Fixture::new(vec![
            entry("long", &[("mid", hm(10, 0), 30)]),
            entry("short", &[("mid", hm(10, 10), 5)]),
        ]);
        let now = hm(9, 0);
        assert_eq!(fixture.order(now, &controls(FilterMode::All, SortKey::ArrivalTime)), vec!["long", "short"]);
        assert_eq!(fixture.order(now, &controls(FilterMode::All, SortKey::DepartureTime)), vec!["short", "long"]);
        assert_eq!(fixture.order(now, &controls(FilterMode::All, SortKey::NextAction)), vec!["long", "short"]);

        // Arrived but not departed: next action is the departure at 10:30
        fixture.confirmations.toggle_arrived(&mid(), &TrainId::new("long"), true, hm(10, 0));
        assert_eq!(fixture.order(now, &controls(FilterMode::All, SortKey::NextAction)), vec!["short", "long"]);

        // Departed too: back to the arrival
        fixture.confirmations.toggle_departed(&mid(), &TrainId::new("long"), true, hm(10, 30));
        assert_eq!(fixture.order(now, &controls(FilterMode::All, SortKey::NextAction)), vec!["long", "short"]);
    }

    #[test]
    fn test_ties_keep_timetable_order() {
        let fixture = Fixture::new(vec![
            entry("b", &[("mid", hm(10, 0), 0)]),
            entry("a", &[("mid", hm(10, 0), 0)]),
            entry("c", &[("mid", hm(10, 0), 0)]),
        ]);
        assert_eq!(fixture.order(hm(9, 0), &StationControls::default()), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_approaching_window() {
        // Window with defaults: [arrival - 5min, departure + 2min]
        let fixture = Fixture::new(vec![entry("A", &[("mid", hm(10, 0), 3)])]);
        let ctrl = controls(FilterMode::Approaching, SortKey::ArrivalTime);

        assert!(fixture.order(SimTime::from_hms(9, 54, 59), &ctrl).is_empty());
        assert_eq!(fixture.order(hm(9, 55), &ctrl), vec!["A"]);
        assert_eq!(fixture.order(hm(10, 5), &ctrl), vec!["A"]);
        assert!(fixture.order(SimTime::from_hms(10, 5, 1), &ctrl).is_empty());
    }

    #[test]
    fn test_approaching_window_follows_settings() {
        let mut fixture = Fixture::new(vec![entry("A", &[("mid", hm(10, 0), 0)])]);
        fixture.settings = BoardSettings::default().with_grace(0, 0);
        fixture.settings.departure_grace_bias_minutes = 0;
        let ctrl = controls(FilterMode::Approaching, SortKey::ArrivalTime);

        assert!(fixture.order(SimTime::from_hms(9, 59, 59), &ctrl).is_empty());
        assert_eq!(fixture.order(hm(10, 0), &ctrl), vec!["A"]);
        assert!(fixture.order(SimTime::from_hms(10, 0, 1), &ctrl).is_empty());
    }

    #[test]
    fn test_unconfirmed_filter() {
        let mut fixture = Fixture::new(vec![
            entry("stay", &[("mid", hm(10, 0), 5)]),
            entry("pass", &[("mid", hm(10, 0), 0)]),
        ]);
        let ctrl = controls(FilterMode::Unconfirmed, SortKey::ArrivalTime);
        let now = hm(10, 10);

        fixture.confirmations.toggle_arrived(&mid(), &TrainId::new("stay"), true, now);
        fixture.confirmations.toggle_arrived(&mid(), &TrainId::new("pass"), true, now);
        assert_eq!(fixture.order(now, &ctrl), vec!["stay"]);

        fixture.confirmations.toggle_departed(&mid(), &TrainId::new("stay"), true, now);
        assert!(fixture.order(now, &ctrl).is_empty());
    }

    #[test]
    fn test_unknown_station_is_empty() {
        let fixture = Fixture::new(vec![entry("A", &[("ghost", hm(10, 0), 1)])]);
        let rows = schedule_view(&fixture.ctx(hm(10, 0)), &StationId::new("ghost"), &StationControls::default());
        assert!(rows.is_empty());
    }

    #[test]
    fn test_row_neighbors() {
        let fixture = Fixture::new(vec![
            entry(
                "L",
                &[
                    ("north", hm(8, 0), 0),
                    ("far", hm(8, 30), 1),
                    ("mid", hm(9, 0), 2),
                    ("unmapped", hm(9, 20), 0),
                    ("south", hm(9, 40), 0),
                ],
            ),
            entry("S", &[("mid", hm(9, 5), 0)]),
        ]);
        let rows = schedule_view(&fixture.ctx(hm(7, 0)), &mid(), &StationControls::default());

        let long = &rows[0];
        assert_eq!(long.from_station_name(), Some("FAR"));
        assert_eq!(long.origin.as_ref().and_then(|s| s.name.as_deref()), Some("NORTH"));
        assert_eq!(
            long.to,
            Neighbor::Station(StationRef { id: StationId::new("unmapped"), name: None })
        );
        assert_eq!(long.terminus.as_ref().map(|s| s.id.as_str()), Some("south"));
        assert_eq!(long.planned_departure, hm(9, 2));

        let short = &rows[1];
        assert_eq!(short.from, Neighbor::Incoming);
        assert_eq!(short.to, Neighbor::Outgoing);
        assert!(short.origin.is_none() && short.terminus.is_none());
        assert!(short.is_pass_through);
    }

    #[test]
    fn test_actual_times_and_delays() {
        let mut fixture = Fixture::new(vec![
            entry("stay", &[("mid", hm(10, 0), 5)]),
            entry("pass", &[("mid", hm(10, 0), 0)]),
        ]);
        let now = hm(10, 7);
        fixture.confirmations.toggle_arrived(&mid(), &TrainId::new("pass"), true, hm(10, 2));

        let rows = schedule_view(&fixture.ctx(now), &mid(), &StationControls::default());
        let stay = rows.iter().find(|r| r.train.as_str() == "stay").unwrap();
        assert_eq!(stay.arrival_delay_minutes, Some(7));
        assert_eq!(stay.departure_delay_minutes, Some(2));
        assert_eq!(stay.actual_arrival, None);

        let pass = rows.iter().find(|r| r.train.as_str() == "pass").unwrap();
        assert_eq!(pass.actual_arrival, Some(hm(10, 2)));
        assert_eq!(pass.actual_departure, Some(hm(10, 2)));
        assert_eq!(pass.arrival_delay_minutes, None);
        assert_eq!(pass.departure_delay_minutes, None);
    }

    fn arb_fixture() -> impl Strategy<Value = (Fixture, i64)> {
        let trains = prop::collection::vec((0i64..48 * 60, 0u32..20, any::<bool>(), any::<bool>()), 0..12);
        (trains, 0i64..48 * 60).prop_map(|(trains, now)| {
            let entries: Vec<_> = trains
                .iter()
                .enumerate()
                .map(|(i, (arrival, layover, _, _))| {
                    entry(&format!("T{i}"), &[("north", SimTime::ZERO, 0), ("mid", SimTime::from_millis(arrival * MINUTE_MS), *layover)])
                })
                .collect();
            let mut fixture = Fixture::new(entries);
            for (i, (_, _, arrived, departed)) in trains.iter().enumerate() {
                let train = TrainId::new(format!("T{i}"));
                fixture.confirmations.toggle_arrived(&mid(), &train, *arrived, SimTime::ZERO);
                fixture.confirmations.toggle_departed(&mid(), &train, *departed, SimTime::ZERO);
            }
            (fixture, now * MINUTE_MS)
        })
    }

    fn arb_sort() -> impl Strategy<Value = SortKey> {
        prop_oneof![Just(SortKey::ArrivalTime), Just(SortKey::DepartureTime), Just(SortKey::NextAction)]
    }

    proptest! {
        #[test]
        fn prop_unconfirmed_is_subset_of_all((fixture, now) in arb_fixture(), sort in arb_sort()) {
            let now = SimTime::from_millis(now);
            let all = fixture.order(now, &controls(FilterMode::All, sort));
            let unconfirmed = fixture.order(now, &controls(FilterMode::Unconfirmed, sort));
            prop_assert!(unconfirmed.iter().all(|id| all.contains(id)));
        }

        #[test]
        fn prop_sort_is_ordered_and_idempotent((fixture, now) in arb_fixture(), sort in arb_sort()) {
            let ctx = fixture.ctx(SimTime::from_millis(now));
            let mut visits = select_visits(&ctx, &mid(), &controls(FilterMode::All, sort));
            prop_assert!(visits.windows(2).all(|w| w[0].sort_time(sort) <= w[1].sort_time(sort)));

            let before: Vec<_> = visits.iter().map(|v| v.train().clone()).collect();
            sort_visits(&mut visits, sort);
            let after: Vec<_> = visits.iter().map(|v| v.train().clone()).collect();
            prop_assert_eq!(before, after);
        }

        #[test]
        fn prop_pass_through_departure_mirrors_arrival(arrival in 0i64..86_400_000, now in 0i64..86_400_000, arrived in any::<bool>(), departed in any::<bool>()) {
            let stop = Stop::new(mid(), 1, SimTime::from_millis(arrival), 0);
            let record = ConfirmationRecord {
                arrived: Confirmation::from_toggle(arrived, SimTime::ZERO),
                departed: Confirmation::from_toggle(departed, SimTime::ZERO),
            };
            let now = SimTime::from_millis(now);
            prop_assert_eq!(departure_status(&stop, &record, now, 3), arrival_status(&stop, &record, now, 3));
        }
    }
}
