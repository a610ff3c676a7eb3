//! Simulated time primitives
//!
//! Scenario times carry no calendar date: an instant is a number of
//! milliseconds since midnight of the scenario's first day. Values may run
//! past 24h (a running clock crosses midnight) and may be slightly negative
//! (the initial clock sits one minute before the earliest arrival).

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;
use std::time::Duration;

use crate::{RailboardError, RailboardResult};

pub const SECOND_MS: i64 = 1_000;
pub const MINUTE_MS: i64 = 60 * SECOND_MS;
pub const HOUR_MS: i64 = 60 * MINUTE_MS;
pub const DAY_MS: i64 = 24 * HOUR_MS;

/// Simulated instant, milliseconds since scenario midnight
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SimTime(pub i64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    #[inline]
    pub fn from_millis(millis: i64) -> Self {
        SimTime(millis)
    }

    #[inline]
    pub fn from_hms(hours: i64, minutes: i64, seconds: i64) -> Self {
        SimTime(hours * HOUR_MS + minutes * MINUTE_MS + seconds * SECOND_MS)
    }

    #[inline]
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Parse `hours[:minutes[:seconds]]`, missing components default to 0.
    ///
    /// Components are unsigned integers and may exceed their usual range,
    /// so `"25:75"` is 25 hours plus 75 minutes.
    pub fn parse_time_of_day(text: &str) -> RailboardResult<Self> {
        let text = text.trim();
        let mut parts = text.split(':');
        let mut units = [HOUR_MS, MINUTE_MS, SECOND_MS].into_iter();
        let mut millis = 0i64;

        for part in parts.by_ref().take(3) {
            let unit = units.next().unwrap_or(SECOND_MS);
            let value: u32 = part
                .trim()
                .parse()
                .map_err(|_| RailboardError::InvalidTime(text.to_string()))?;
            millis += value as i64 * unit;
        }

        if parts.next().is_some() {
            return Err(RailboardError::InvalidTime(text.to_string()));
        }

        Ok(SimTime(millis))
    }

    /// Signed milliseconds from `earlier` to `self`
    #[inline]
    pub fn millis_since(self, earlier: SimTime) -> i64 {
        self.0 - earlier.0
    }

    /// Whole minutes from `earlier` to `self`, floored toward negative infinity
    #[inline]
    pub fn whole_minutes_since(self, earlier: SimTime) -> i64 {
        self.millis_since(earlier).div_euclid(MINUTE_MS)
    }

    /// Index of the simulated minute containing this instant
    #[inline]
    pub fn minute_index(self) -> i64 {
        self.0.div_euclid(MINUTE_MS)
    }

    #[inline]
    pub fn plus_minutes(self, minutes: u32) -> Self {
        SimTime(self.0 + minutes as i64 * MINUTE_MS)
    }

    /// Hour, minute, second of the time of day (wrapped to 24h)
    pub fn clock_parts(self) -> (i64, i64, i64) {
        let of_day = self.0.rem_euclid(DAY_MS);
        (
            of_day / HOUR_MS,
            (of_day % HOUR_MS) / MINUTE_MS,
            (of_day % MINUTE_MS) / SECOND_MS,
        )
    }

    /// `HH:MM:SS` rendering used by the running clock
    pub fn with_seconds(self) -> WithSeconds {
        WithSeconds(self)
    }
}

impl FromStr for SimTime {
    type Err = RailboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SimTime::parse_time_of_day(s)
    }
}

impl Add<Duration> for SimTime {
    type Output = SimTime;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        SimTime(self.0.saturating_add(rhs.as_millis() as i64))
    }
}

impl Sub<Duration> for SimTime {
    type Output = SimTime;

    #[inline]
    fn sub(self, rhs: Duration) -> Self::Output {
        SimTime(self.0.saturating_sub(rhs.as_millis() as i64))
    }
}

/// `HH:MM`, wrapped to 24h
impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, _) = self.clock_parts();
        write!(f, "{:02}:{:02}", h, m)
    }
}

impl fmt::Debug for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sim({}, {}ms)", self.with_seconds(), self.0)
    }
}

/// Display adapter for `HH:MM:SS`
#[derive(Clone, Copy)]
pub struct WithSeconds(SimTime);

impl fmt::Display for WithSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.0.clock_parts();
        write!(f, "{:02}:{:02}:{:02}", h, m, s)
    }
}
