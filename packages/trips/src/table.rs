//! In-memory trip table, its schema, and month/weekday filtering.

use std::collections::BTreeSet;

use bikeshare_trips_models::{FilterSelection, Trip};
use chrono::{Month, Weekday};
use strum_macros::Display;

/// Header names of the city files.
pub mod columns {
    /// Trip start timestamp.
    pub const START_TIME: &str = "Start Time";
    /// Trip end timestamp.
    pub const END_TIME: &str = "End Time";
    /// Duration in seconds.
    pub const TRIP_DURATION: &str = "Trip Duration";
    /// Start station name.
    pub const START_STATION: &str = "Start Station";
    /// End station name.
    pub const END_STATION: &str = "End Station";
    /// Rider category.
    pub const USER_TYPE: &str = "User Type";
    /// Rider gender (not every city).
    pub const GENDER: &str = "Gender";
    /// Rider birth year (not every city).
    pub const BIRTH_YEAR: &str = "Birth Year";

    /// Columns every city file must provide.
    pub const REQUIRED: &[&str] = &[
        START_TIME,
        TRIP_DURATION,
        START_STATION,
        END_STATION,
        USER_TYPE,
    ];
}

/// Optional data a city's file may or may not carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Capability {
    /// Rider gender.
    Gender,
    /// Rider birth year.
    #[strum(serialize = "Birth year")]
    BirthYear,
}

impl Capability {
    /// Header name that provides this capability.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Gender => columns::GENDER,
            Self::BirthYear => columns::BIRTH_YEAR,
        }
    }
}

/// The set of column names present in a loaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSchema {
    columns: BTreeSet<String>,
}

impl TableSchema {
    /// Builds a schema from header names. Surrounding whitespace is trimmed.
    #[must_use]
    pub fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            columns: headers.into_iter().map(|h| h.trim().to_string()).collect(),
        }
    }

    /// Whether `column` is present.
    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains(column)
    }

    /// Whether the file carries the data behind `capability`.
    #[must_use]
    pub fn supports(&self, capability: Capability) -> bool {
        self.contains(capability.column())
    }

    /// The first required column that is missing, if any.
    #[must_use]
    pub fn missing_required(&self) -> Option<&'static str> {
        columns::REQUIRED
            .iter()
            .copied()
            .find(|column| !self.contains(column))
    }
}

/// All trips of one city, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct TripTable {
    schema: TableSchema,
    trips: Vec<Trip>,
}

impl TripTable {
    /// Creates a table from an already-validated schema and its rows.
    #[must_use]
    pub const fn new(schema: TableSchema, trips: Vec<Trip>) -> Self {
        Self { schema, trips }
    }

    /// Columns present in the source file.
    #[must_use]
    pub const fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Shorthand for `self.schema().supports(capability)`.
    #[must_use]
    pub fn supports(&self, capability: Capability) -> bool {
        self.schema.supports(capability)
    }

    /// Rows in file order.
    #[must_use]
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.trips.len()
    }

    /// `true` when the table has no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Distinct months present in the table, in calendar order.
    #[must_use]
    pub fn available_months(&self) -> Vec<Month> {
        let present: BTreeSet<u32> = self
            .trips
            .iter()
            .map(|t| t.month.number_from_month())
            .collect();
        present
            .into_iter()
            .filter_map(|n| u8::try_from(n).ok())
            .filter_map(|n| Month::try_from(n).ok())
            .collect()
    }

    /// Distinct weekdays present in the table, Monday first.
    #[must_use]
    pub fn available_weekdays(&self) -> Vec<Weekday> {
        let present: BTreeSet<u32> = self
            .trips
            .iter()
            .map(|t| t.weekday.num_days_from_monday())
            .collect();
        present
            .into_iter()
            .filter_map(|n| u8::try_from(n).ok())
            .filter_map(|n| Weekday::try_from(n).ok())
            .collect()
    }

    /// Returns a new table holding only the rows that pass `selection`.
    ///
    /// The schema is carried over unchanged, so capability checks on the
    /// filtered table still reflect the source file.
    #[must_use]
    pub fn filter(&self, selection: &FilterSelection) -> Self {
        if selection.is_all() {
            return self.clone();
        }

        let trips: Vec<Trip> = self
            .trips
            .iter()
            .filter(|t| selection.matches(t))
            .cloned()
            .collect();

        log::debug!(
            "Filter ({selection}) kept {} of {} rows",
            trips.len(),
            self.trips.len()
        );

        Self {
            schema: self.schema.clone(),
            trips,
        }
    }

    /// Rows `offset..offset + size`, clamped to the table length.
    #[must_use]
    pub fn page(&self, offset: usize, size: usize) -> &[Trip] {
        let start = offset.min(self.trips.len());
        let end = offset.saturating_add(size).min(self.trips.len());
        self.trips.get(start..end).unwrap_or_default()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use bikeshare_trips_models::{Trip, calendar_of};
    use chrono::NaiveDateTime;

    use super::{TableSchema, TripTable, columns};

    pub fn trip(start: &str, from: &str, to: &str, duration: f64) -> Trip {
        let start_time = NaiveDateTime::parse_from_str(start, "%Y-%m-%d %H:%M:%S").unwrap();
        let (month, weekday) = calendar_of(&start_time);
        Trip {
            row_id: None,
            start_time,
            end_time: None,
            trip_duration: duration,
            start_station: from.to_string(),
            end_station: to.to_string(),
            user_type: Some("Subscriber".to_string()),
            gender: None,
            birth_year: None,
            month,
            weekday,
        }
    }

    pub fn table(trips: Vec<Trip>) -> TripTable {
        TripTable::new(
            TableSchema::from_headers(columns::REQUIRED.iter().copied()),
            trips,
        )
    }

    /// Two June Fridays, one June Monday, one May Friday, one March Sunday.
    pub fn sample_table() -> TripTable {
        table(vec![
            trip("2017-06-23 08:00:00", "A", "B", 100.0),
            trip("2017-06-26 09:00:00", "B", "C", 200.0),
            trip("2017-05-26 08:30:00", "A", "C", 300.0),
            trip("2017-06-30 17:45:00", "C", "A", 400.0),
            trip("2017-03-05 12:00:00", "A", "B", 500.0),
        ])
    }
}
