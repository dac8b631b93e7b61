#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types for the aggregate trip reports.
//!
//! Reports over an empty table return `None` (or an explicit empty value)
//! rather than a placeholder, so renderers decide how "no data" reads.

use chrono::{Month, Weekday};
use serde::Serialize;

/// A value and how many rows carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueCount<T> {
    /// The counted value.
    pub value: T,
    /// Number of rows with this value.
    pub count: u64,
}

/// Most frequent start month, weekday and hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularTimes {
    /// Most frequent month.
    pub month: ValueCount<Month>,
    /// Most frequent day of the week.
    pub weekday: ValueCount<Weekday>,
    /// Most frequent start hour (0-23).
    pub hour: ValueCount<u32>,
}

/// Most frequent stations and start/end pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularStations {
    /// Most used start station.
    pub start_station: ValueCount<String>,
    /// Most used end station.
    pub end_station: ValueCount<String>,
    /// Most ridden `"<start> to <end>"` trip.
    pub trip: ValueCount<String>,
}

/// Total and average trip duration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDurationStats {
    /// Number of trips the figures cover.
    pub trip_count: u64,
    /// Sum of all durations, in seconds. `0.0` for an empty table.
    pub total_seconds: f64,
    /// Arithmetic mean duration, in seconds. `None` for an empty table.
    pub mean_seconds: Option<f64>,
}

/// Counts of each distinct value of a categorical column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Distribution {
    /// Distinct values, highest count first.
    pub counts: Vec<ValueCount<String>>,
    /// Rows with no value.
    pub missing: u64,
}

/// Earliest, most recent and most common birth year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthYearStats {
    /// Smallest birth year.
    pub earliest: i32,
    /// Largest birth year.
    pub most_recent: i32,
    /// Most frequent birth year.
    pub most_common: ValueCount<i32>,
}

/// Whether a city's file carries an optional column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "camelCase")]
pub enum Availability<T> {
    /// The column exists; `T` holds the figures computed from it.
    Available(T),
    /// The column does not exist for this city.
    Unavailable,
}

impl<T> Availability<T> {
    /// Returns the inner value, or `None` when unavailable.
    #[must_use]
    pub const fn as_available(&self) -> Option<&T> {
        match self {
            Self::Available(value) => Some(value),
            Self::Unavailable => None,
        }
    }
}

/// Rider demographics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    /// User type breakdown.
    pub user_types: Distribution,
    /// Gender breakdown.
    pub gender: Availability<Distribution>,
    /// Birth year figures. `Available(None)` means the column exists but
    /// every row in the table is missing a value.
    pub birth_year: Availability<Option<BirthYearStats>>,
}
