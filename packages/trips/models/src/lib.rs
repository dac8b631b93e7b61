#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Trip record, calendar and filter selection types.
//!
//! A [`Trip`] is one row of a city's bike-share file after loading. The
//! month and weekday of its start time are derived once at load time so
//! that filtering and reporting never re-parse timestamps.

use chrono::{Datelike as _, Month, NaiveDateTime, Timelike as _, Weekday};
use serde::Serialize;
use strum_macros::{Display, EnumString};

/// Separator placed between the start and end station in a trip label.
pub const TRIP_LABEL_SEPARATOR: &str = " to ";

/// A single bike-share trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    /// Row identifier from the unnamed leading column, if the file has one.
    pub row_id: Option<String>,
    /// When the trip started.
    pub start_time: NaiveDateTime,
    /// When the trip ended, if the file records it.
    pub end_time: Option<NaiveDateTime>,
    /// Trip duration in seconds.
    pub trip_duration: f64,
    /// Name of the station the trip started at.
    pub start_station: String,
    /// Name of the station the trip ended at.
    pub end_station: String,
    /// Rider category (e.g. `"Subscriber"`, `"Customer"`).
    pub user_type: Option<String>,
    /// Rider gender. Always `None` for cities without a gender column.
    pub gender: Option<String>,
    /// Rider birth year. Always `None` for cities without a birth year column.
    pub birth_year: Option<i32>,
    /// Calendar month of [`Self::start_time`].
    pub month: Month,
    /// Day of the week of [`Self::start_time`].
    pub weekday: Weekday,
}

impl Trip {
    /// Hour of day (0-23) the trip started in.
    #[must_use]
    pub fn hour(&self) -> u32 {
        self.start_time.hour()
    }

    /// `"<start station> to <end station>"`.
    #[must_use]
    pub fn trip_label(&self) -> String {
        format!(
            "{}{TRIP_LABEL_SEPARATOR}{}",
            self.start_station, self.end_station
        )
    }

    /// Full English month name of the start time.
    #[must_use]
    pub const fn month_name(&self) -> &'static str {
        month_name(self.month)
    }

    /// Full English weekday name of the start time.
    #[must_use]
    pub const fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }
}

/// Months indexed by `month0()`.
const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Derives the `(month, weekday)` pair for a start timestamp.
#[must_use]
pub fn calendar_of(start_time: &NaiveDateTime) -> (Month, Weekday) {
    // `month0()` is always in `0..12`.
    let month = MONTHS[start_time.month0() as usize];
    (month, start_time.weekday())
}

/// Full English name of a month, independent of the system locale.
#[must_use]
pub const fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "January",
        Month::February => "February",
        Month::March => "March",
        Month::April => "April",
        Month::May => "May",
        Month::June => "June",
        Month::July => "July",
        Month::August => "August",
        Month::September => "September",
        Month::October => "October",
        Month::November => "November",
        Month::December => "December",
    }
}

/// Full English name of a weekday, independent of the system locale.
#[must_use]
pub const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// How the user wants to narrow the trip table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FilterMode {
    /// Filter by month only.
    Month,
    /// Filter by weekday only.
    Day,
    /// Filter by month and weekday.
    Both,
    /// Keep every row.
    #[strum(serialize = "none")]
    NoFilter,
}

impl FilterMode {
    /// Every mode, in prompt order.
    pub const ALL: &[Self] = &[Self::Month, Self::Day, Self::Both, Self::NoFilter];

    /// Whether this mode asks for a month.
    #[must_use]
    pub const fn includes_month(self) -> bool {
        matches!(self, Self::Month | Self::Both)
    }

    /// Whether this mode asks for a weekday.
    #[must_use]
    pub const fn includes_day(self) -> bool {
        matches!(self, Self::Day | Self::Both)
    }
}

/// The `(month, weekday)` restriction applied to a trip table.
///
/// `None` on either side means "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FilterSelection {
    /// Month to keep, or every month when `None`.
    pub month: Option<Month>,
    /// Weekday to keep, or every weekday when `None`.
    pub weekday: Option<Weekday>,
}

impl FilterSelection {
    /// The selection that keeps every row.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            month: None,
            weekday: None,
        }
    }

    /// Builds a selection from optional month and weekday restrictions.
    #[must_use]
    pub const fn new(month: Option<Month>, weekday: Option<Weekday>) -> Self {
        Self { month, weekday }
    }

    /// `true` when neither month nor weekday is restricted.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        self.month.is_none() && self.weekday.is_none()
    }

    /// Whether `trip` passes this selection.
    #[must_use]
    pub fn matches(&self, trip: &Trip) -> bool {
        self.month.is_none_or(|m| trip.month == m)
            && self.weekday.is_none_or(|d| trip.weekday == d)
    }
}

impl std::fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let month = self.month.map_or("all", month_name);
        let day = self.weekday.map_or("all", weekday_name);
        write!(f, "month: {month}, day: {day}")
    }
}
