//! Timestamp and numeric field parsing shared by the loader.

use chrono::NaiveDateTime;

/// Parses a trip timestamp such as `"2017-06-23 15:09:32"`.
///
/// Fractional seconds (`"2017-06-23 15:09:32.123"`) and an ISO `T`
/// separator are also accepted.
#[must_use]
pub fn parse_trip_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Converts a birth year stored as a float (`1992.0`) to a whole year.
///
/// Returns `None` for non-finite values.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn birth_year_from_f64(value: f64) -> Option<i32> {
    if !value.is_finite() || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return None;
    }
    Some(value.trunc() as i32)
}
