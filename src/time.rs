use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Wire format shared by flight times, blackout windows and snapshot timestamps.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, PartialOrd, Hash)]
pub struct Time(pub NaiveDateTime);

impl Time {
    /// Half-open overlap test: touching intervals do not overlap.
    pub fn is_overlapping(time: &(Time, Time), window: &(Time, Time)) -> bool {
        time.0 < window.1 && time.1 > window.0
    }

    pub fn now() -> Time {
        Time(chrono::Local::now().naive_local())
    }

    pub fn start_of(date: NaiveDate) -> Time {
        Time(date.and_hms_opt(0, 0, 0).unwrap_or_default())
    }

    pub fn end_of(date: NaiveDate) -> Time {
        Time(date.and_hms_opt(23, 59, 0).unwrap_or_default())
    }

    /// `None` when the result falls outside the representable calendar.
    pub fn checked_add_minutes(self, minutes: u64) -> Option<Time> {
        self.0.checked_add_signed(Self::delta(minutes)?).map(Time)
    }

    pub fn checked_sub_minutes(self, minutes: u64) -> Option<Time> {
        self.0.checked_sub_signed(Self::delta(minutes)?).map(Time)
    }

    fn delta(minutes: u64) -> Option<TimeDelta> {
        i64::try_from(minutes).ok().and_then(TimeDelta::try_minutes)
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

impl FromStr for Time {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s.trim(), TIME_FORMAT).map(Time)
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
