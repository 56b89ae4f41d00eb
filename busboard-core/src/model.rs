//! Domain data structures for timetables, departures, and forecasts.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Reasons a timetable table is rejected.
pub enum TimetableError {
    /// Hour key is not a valid hour of day.
    #[error("hour {0} is outside 0-23")]
    HourOutOfRange(u32),
    /// Minute value is not a valid minute of hour.
    #[error("minute {minute} in hour {hour} is outside 0-59")]
    MinuteOutOfRange {
        /// Hour the minute was listed under.
        hour: u32,
        /// Offending minute value.
        minute: u32,
    },
}

/// Daily timetable mapping hour of day to the departure minutes within it.
///
/// Minutes are kept ascending and unique. Hours need not be contiguous.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<u32, Vec<u32>>", into = "BTreeMap<u32, Vec<u32>>")]
pub struct Timetable {
    hours: BTreeMap<u32, Vec<u32>>,
}

impl Timetable {
    /// Validate and normalise a raw hour → minutes table.
    ///
    /// # Errors
    ///
    /// Returns a [`TimetableError`] when an hour or minute is out of range.
    pub fn new(hours: BTreeMap<u32, Vec<u32>>) -> Result<Self, TimetableError> {
        let mut normalized = BTreeMap::new();

        for (hour, mut minutes) in hours {
            if hour > 23 {
                return Err(TimetableError::HourOutOfRange(hour));
            }
            if let Some(&minute) = minutes.iter().find(|&&minute| minute > 59) {
                return Err(TimetableError::MinuteOutOfRange { hour, minute });
            }

            minutes.sort_unstable();
            minutes.dedup();
            normalized.insert(hour, minutes);
        }

        Ok(Self { hours: normalized })
    }

    /// Hours in ascending order with their departure minutes.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[u32])> {
        self.hours
            .iter()
            .map(|(hour, minutes)| (*hour, minutes.as_slice()))
    }

    /// Total number of departures in the day.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hours.values().map(Vec::len).sum()
    }

    /// Whether the table has no departures at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TryFrom<BTreeMap<u32, Vec<u32>>> for Timetable {
    type Error = TimetableError;

    fn try_from(hours: BTreeMap<u32, Vec<u32>>) -> Result<Self, Self::Error> {
        Self::new(hours)
    }
}

impl From<Timetable> for BTreeMap<u32, Vec<u32>> {
    fn from(timetable: Timetable) -> Self {
        timetable.hours
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// Scheduled departure at a time of day.
pub struct Departure {
    /// Hour of day (0-23).
    pub hour: u32,
    /// Minute of hour (0-59).
    pub minute: u32,
}

impl Departure {
    /// Timestamp of this departure on the given date, at second zero.
    #[must_use]
    pub fn on(&self, date: NaiveDate) -> Option<NaiveDateTime> {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).map(|time| date.and_time(time))
    }
}

impl fmt::Display for Departure {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Time left until a departure, floored to whole seconds.
pub struct Countdown {
    /// Whole minutes.
    pub minutes: i64,
    /// Remaining seconds after the whole minutes (0-59).
    pub seconds: i64,
}

impl Countdown {
    /// Countdown from `now` until `departure`.
    #[must_use]
    pub fn between(now: NaiveDateTime, departure: NaiveDateTime) -> Self {
        let millis = (departure - now).num_milliseconds();
        Self {
            minutes: millis.div_euclid(60_000),
            seconds: millis.rem_euclid(60_000) / 1_000,
        }
    }

    /// Headline countdown, e.g. `あと 3分 12秒`.
    #[must_use]
    pub fn long_label(&self) -> String {
        format!("あと {}分 {}秒", self.minutes, self.seconds)
    }

    /// Compact countdown for follow-up departures, e.g. `23分12秒`.
    #[must_use]
    pub fn short_label(&self) -> String {
        format!("{}分{}秒", self.minutes, self.seconds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Departure paired with the countdown computed for the current tick.
pub struct UpcomingDeparture {
    /// Scheduled time of day.
    pub departure: Departure,
    /// Time left from "now".
    pub countdown: Countdown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Raw forecast fields as published, before positional resolution.
pub struct ForecastBundle {
    /// Condition text for today, tomorrow, and the day after (0-3 entries).
    pub conditions: Vec<String>,
    /// Short-range temperatures whose layout depends on publication time.
    /// Unparsable entries keep their position as `None`.
    pub temps: Vec<Option<i32>>,
    /// Day-after condition from the extended-range forecast.
    pub far_condition: Option<String>,
    /// Day-after minimum from the extended-range forecast.
    pub far_min: Option<i32>,
    /// Day-after maximum from the extended-range forecast.
    pub far_max: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Today's row: condition plus the live observed temperature.
pub struct TodayWeather {
    /// Condition text, if published.
    pub condition: Option<String>,
    /// Observed temperature floored to whole degrees.
    pub temperature: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Forecast row for a future day.
pub struct DayOutlook {
    /// Condition text, if published.
    pub condition: Option<String>,
    /// Forecast minimum temperature.
    pub min: Option<i32>,
    /// Forecast maximum temperature.
    pub max: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Forecast with every display field resolved or marked unknown.
pub struct ResolvedForecast {
    /// Today.
    pub today: TodayWeather,
    /// Tomorrow.
    pub tomorrow: DayOutlook,
    /// The day after tomorrow.
    pub day_after: DayOutlook,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Weather icon category derived from condition text.
pub enum Sky {
    /// Clear or mostly clear.
    Sunny,
    /// Snow.
    Snow,
    /// Thunderstorms.
    Thunder,
    /// Rain.
    Rain,
    /// Overcast.
    Cloudy,
    /// Anything else that was published.
    PartlyCloudy,
    /// No condition text available.
    Unknown,
}
