//! CSV loading for city trip files.
//!
//! The whole file is materialized into a [`TripTable`]. The file handle is
//! owned by [`load_path`] and dropped before it returns, on success or error.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use bikeshare_trips_models::{Trip, calendar_of};
use serde::Deserialize;

use crate::TripsError;
use crate::parsing::{birth_year_from_f64, parse_trip_timestamp};
use crate::progress::ProgressCallback;
use crate::registry::CityRegistry;
use crate::table::{TableSchema, TripTable, columns};

/// One CSV row as it appears on disk, before timestamps are parsed.
///
/// Optional columns default to `None` when the file lacks them, and empty
/// cells deserialize to `None` as well.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "", default)]
    row_id: Option<String>,
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

impl RawTrip {
    fn into_trip(self, line: u64) -> Result<Trip, TripsError> {
        let start_time =
            parse_trip_timestamp(&self.start_time).ok_or_else(|| TripsError::InvalidTimestamp {
                line,
                value: self.start_time.clone(),
            })?;

        let end_time = match self.end_time {
            Some(raw) => Some(
                parse_trip_timestamp(&raw)
                    .ok_or(TripsError::InvalidTimestamp { line, value: raw })?,
            ),
            None => None,
        };

        let (month, weekday) = calendar_of(&start_time);

        Ok(Trip {
            row_id: self.row_id,
            start_time,
            end_time,
            trip_duration: self.trip_duration,
            start_station: self.start_station,
            end_station: self.end_station,
            user_type: non_blank(self.user_type),
            gender: non_blank(self.gender),
            birth_year: self.birth_year.and_then(birth_year_from_f64),
            month,
            weekday,
        })
    }
}

/// Treats whitespace-only cells as missing.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Loads the trip file of the city identified by `city_id`.
///
/// # Errors
///
/// Returns [`TripsError`] if the city is unknown, the file cannot be read,
/// or any row is malformed.
pub fn load_city(
    registry: &CityRegistry,
    city_id: &str,
    progress: &dyn ProgressCallback,
) -> Result<TripTable, TripsError> {
    let city = registry.get(city_id)?;
    let path = registry.path_for(city);
    log::debug!("Resolved city '{}' to {}", city.id, path.display());

    progress.set_message(format!("Loading {} trips", city.name));
    let start = Instant::now();

    let table = match load_path(&path, progress) {
        Ok(table) => table,
        Err(e) => {
            progress.finish_and_clear();
            return Err(e);
        }
    };

    progress.finish(format!("Loaded {} trips for {}", table.len(), city.name));
    log::info!(
        "Loaded {} trips for {} in {:.1}s",
        table.len(),
        city.name,
        start.elapsed().as_secs_f64()
    );

    Ok(table)
}

/// Opens `path` and reads every trip in it.
///
/// # Errors
///
/// Returns [`TripsError::Io`] if the file cannot be opened, or any error
/// from [`read_trips`].
pub fn load_path(path: &Path, progress: &dyn ProgressCallback) -> Result<TripTable, TripsError> {
    let file = File::open(path).map_err(|source| TripsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_trips(file, progress)
}

/// Reads a trip table from any CSV source.
///
/// # Errors
///
/// Returns [`TripsError::MissingColumn`] if a required header is absent,
/// [`TripsError::Csv`] if a row cannot be decoded, and
/// [`TripsError::InvalidTimestamp`] if a start or end time is unparseable.
pub fn read_trips<R: Read>(
    reader: R,
    progress: &dyn ProgressCallback,
) -> Result<TripTable, TripsError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);

    let headers = reader.headers()?.clone();
    let schema = TableSchema::from_headers(headers.iter());
    if let Some(column) = schema.missing_required() {
        return Err(TripsError::MissingColumn { column });
    }

    log::debug!(
        "Schema: gender={} birth_year={} end_time={}",
        schema.contains(columns::GENDER),
        schema.contains(columns::BIRTH_YEAR),
        schema.contains(columns::END_TIME),
    );

    let mut trips = Vec::new();
    for result in reader.deserialize::<RawTrip>() {
        let raw = result?;
        // Header is line 1, so the first record is line 2.
        let line = trips.len() as u64 + 2;
        trips.push(raw.into_trip(line)?);
        progress.inc(1);
    }

    Ok(TripTable::new(schema, trips))
}
