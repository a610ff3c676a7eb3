//! Save export parser

use railboard_core::{
    LevelContent, MapInfo, OverrideEntry, RailboardError, RailboardResult, Scenario, SimTime,
    StationId, StationInfo, Stop, Timetable, TimetableEntry, TrainId,
};
use tracing::{debug, info, warn};

use crate::{Section, FIELD_DELIMITER, SEGMENT_DELIMITER, STOP_DELIMITER};

/// Fields before the first stop of a timetable row
const TIMETABLE_FIXED_FIELDS: usize = 6;
/// Parts of one `#`-separated stop field
const STOP_PARTS: usize = 5;
/// Fields of one override row
const OVERRIDE_FIELDS: usize = 3;

/// One data line with its 1-based line number in the whole export
#[derive(Clone, Copy, Debug)]
struct Line<'a> {
    number: usize,
    text: &'a str,
}

/// A segment split into its header and data lines
struct Segment<'a> {
    header: Line<'a>,
    data: Vec<Line<'a>>,
}

/// Parse a complete save export.
///
/// Nothing is returned unless every section parsed; callers install the
/// returned scenario wholesale.
pub fn parse_save(raw: &str) -> RailboardResult<Scenario> {
    let mut segments = split_segments(raw).into_iter();

    let Some(head) = segments.next() else {
        return Err(RailboardError::MalformedMapInfo("empty export".into()));
    };
    let map_info = parse_map_info(head.header.text)?;
    let layout = head
        .data
        .first()
        .map(|line| line.text.to_string())
        .unwrap_or_default();

    let mut length_overrides = Vec::new();
    let mut speed_overrides = Vec::new();
    let mut timetable = Timetable::new();
    let mut level_content = LevelContent::default();

    for segment in segments {
        let section = Section::from_header(segment.header.text);
        match &section {
            Section::Stations => {}
            Section::LengthOverrides | Section::SpeedOverrides => {
                let entries = parse_overrides(&section, &segment.data)?;
                if section == Section::LengthOverrides {
                    length_overrides = entries;
                } else {
                    speed_overrides = entries;
                }
            }
            Section::Timetable => timetable = parse_timetable(&segment.data)?,
            Section::LevelContent => level_content = parse_level_content(&segment.data)?,
            Section::Unknown(name) => {
                debug!(header = %name, line = segment.header.number, "skipping unknown section");
            }
        }
    }

    info!(
        map = %map_info.name,
        trains = timetable.len(),
        stations = level_content.stations.len(),
        "parsed save export"
    );

    Ok(Scenario {
        raw_text: raw.to_string(),
        map_info,
        layout,
        length_overrides,
        speed_overrides,
        timetable,
        level_content,
    })
}

/// Split on the segment delimiter, keeping line numbers and dropping
/// blank data lines
fn split_segments(raw: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut start = 1;

    for chunk in raw.split(SEGMENT_DELIMITER) {
        let mut lines = chunk
            .split('\n')
            .enumerate()
            .map(|(offset, text)| Line {
                number: start + offset,
                text: text.strip_suffix('\r').unwrap_or(text),
            });
        let line_count = chunk.split('\n').count();

        if let Some(header) = lines.next() {
            let data = lines.filter(|line| !line.text.trim().is_empty()).collect();
            segments.push(Segment { header, data });
        }
        start += line_count;
    }

    segments
}

fn parse_map_info(line: &str) -> RailboardResult<MapInfo> {
    serde_json::from_str(line).map_err(|e| RailboardError::MalformedMapInfo(e.to_string()))
}

fn parse_overrides(section: &Section, data: &[Line<'_>]) -> RailboardResult<Vec<OverrideEntry>> {
    data.iter()
        .map(|line| {
            let fields: Vec<&str> = line.text.split(FIELD_DELIMITER).collect();
            let [kind, id, value] = fields[..] else {
                return Err(RailboardError::FieldCount {
                    section: section.label(),
                    line: line.number,
                    expected: OVERRIDE_FIELDS,
                    actual: fields.len(),
                });
            };
            Ok(OverrideEntry {
                kind: kind.to_string(),
                id: id.to_string(),
                value: value.to_string(),
            })
        })
        .collect()
}

fn parse_timetable(data: &[Line<'_>]) -> RailboardResult<Timetable> {
    let mut timetable = Timetable::new();

    for line in data {
        let entry = parse_timetable_row(*line)?;
        let train = entry.train.clone();
        if timetable.insert(entry).is_some() {
            warn!(train = %train, line = line.number, "duplicate train in timetable, keeping the later row");
        }
    }

    Ok(timetable)
}

fn parse_timetable_row(line: Line<'_>) -> RailboardResult<TimetableEntry> {
    let fields: Vec<&str> = line.text.split(FIELD_DELIMITER).collect();
    if fields.len() < TIMETABLE_FIXED_FIELDS {
        return Err(RailboardError::FieldCount {
            section: Section::Timetable.label(),
            line: line.number,
            expected: TIMETABLE_FIXED_FIELDS,
            actual: fields.len(),
        });
    }

    let stops = fields[TIMETABLE_FIXED_FIELDS..]
        .iter()
        .map(|field| parse_stop(field, line.number))
        .collect::<RailboardResult<Vec<_>>>()?;

    Ok(TimetableEntry {
        train: TrainId::new(fields[0]),
        train_type: fields[1].to_string(),
        max_speed: fields[2].to_string(),
        composition: fields[3].to_string(),
        stops,
    })
}

/// `stationID#platform#HH[:MM[:SS]]#layoverMinutes#unused`
fn parse_stop(field: &str, line: usize) -> RailboardResult<Stop> {
    let section = Section::Timetable.label();
    let parts: Vec<&str> = field.split(STOP_DELIMITER).collect();
    let [station, platform, arrival, layover, _unused] = parts[..] else {
        return Err(RailboardError::FieldCount {
            section,
            line,
            expected: STOP_PARTS,
            actual: parts.len(),
        });
    };

    let platform: i32 = platform.parse().map_err(|_| RailboardError::InvalidNumber {
        section,
        field: "platform",
        line,
        value: platform.to_string(),
    })?;
    let layover: u32 = layover.parse().map_err(|_| RailboardError::InvalidNumber {
        section,
        field: "layover",
        line,
        value: layover.to_string(),
    })?;
    let arrival =
        SimTime::parse_time_of_day(arrival).map_err(|_| RailboardError::InvalidStopTime {
            section,
            line,
            value: arrival.to_string(),
        })?;

    Ok(Stop::new(StationId::new(station), platform, arrival, layover))
}

fn parse_level_content(data: &[Line<'_>]) -> RailboardResult<LevelContent> {
    let Some(blob) = data.first() else {
        return Err(RailboardError::MalformedLevelContent("missing JSON blob".into()));
    };

    let raw: serde_json::Value = serde_json::from_str(blob.text)
        .map_err(|e| RailboardError::MalformedLevelContent(format!("line {}: {}", blob.number, e)))?;

    let stations = raw
        .pointer("/stations/stations")
        .ok_or_else(|| RailboardError::MalformedLevelContent("no stations.stations list".into()))?;
    let stations: Vec<StationInfo> = serde_json::from_value(stations.clone())
        .map_err(|e| RailboardError::MalformedLevelContent(format!("station list: {}", e)))?;

    Ok(LevelContent { raw, stations })
}
