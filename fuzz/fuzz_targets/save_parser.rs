//! Fuzz target: arbitrary text through the save parser

#![no_main]

use libfuzzer_sys::fuzz_target;
use railboard_save::parse_save;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };

    match parse_save(raw) {
        Ok(scenario) => {
            assert_eq!(scenario.raw_text, raw);
            for entry in scenario.timetable.iter() {
                for stop in &entry.stops {
                    assert_eq!(stop.departure(), stop.arrival.plus_minutes(stop.layover));
                }
            }
        }
        Err(e) => assert!(e.is_malformed_input(), "unexpected error kind: {e}"),
    }
});
