//! The four report blocks: popular times, popular stations, trip duration
//! and user demographics.

use bikeshare_analytics_models::{
    Availability, BirthYearStats, Demographics, Distribution, PopularStations, PopularTimes,
    TripDurationStats, ValueCount,
};
use bikeshare_trips::table::{Capability, TripTable};
use bikeshare_trips_models::Trip;

use crate::frequency::{FrequencyTable, most_frequent};

/// Most frequent month, weekday and start hour.
///
/// Returns `None` for an empty table.
#[must_use]
pub fn popular_times(table: &TripTable) -> Option<PopularTimes> {
    let trips = table.trips();
    Some(PopularTimes {
        month: most_frequent(trips.iter().map(|t| t.month))?,
        weekday: most_frequent(trips.iter().map(|t| t.weekday))?,
        hour: most_frequent(trips.iter().map(Trip::hour))?,
    })
}

/// Most frequent start station, end station and trip.
///
/// Returns `None` for an empty table.
#[must_use]
pub fn popular_stations(table: &TripTable) -> Option<PopularStations> {
    let trips = table.trips();
    Some(PopularStations {
        start_station: most_frequent(trips.iter().map(|t| t.start_station.as_str()))
            .map(into_owned)?,
        end_station: most_frequent(trips.iter().map(|t| t.end_station.as_str())).map(into_owned)?,
        trip: most_frequent(trips.iter().map(Trip::trip_label))?,
    })
}

fn into_owned(vc: ValueCount<&str>) -> ValueCount<String> {
    ValueCount {
        value: vc.value.to_string(),
        count: vc.count,
    }
}

/// Total and mean trip duration.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn trip_duration(table: &TripTable) -> TripDurationStats {
    let total_seconds: f64 = table.trips().iter().map(|t| t.trip_duration).sum();
    let trip_count = table.len();
    let mean_seconds = (trip_count > 0).then(|| total_seconds / trip_count as f64);

    TripDurationStats {
        trip_count: trip_count as u64,
        total_seconds,
        mean_seconds,
    }
}

/// Breakdown of an optional categorical field.
fn distribution<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Distribution {
    let mut missing = 0u64;
    let mut table = FrequencyTable::new();
    for value in values {
        match value {
            Some(v) => table.add(v.to_string()),
            None => missing += 1,
        }
    }
    Distribution {
        counts: table.into_ranked(),
        missing,
    }
}

/// Earliest, most recent and most common birth year, ignoring missing
/// values. `None` when no row has a birth year.
fn birth_year_stats(trips: &[Trip]) -> Option<BirthYearStats> {
    let years = || trips.iter().filter_map(|t| t.birth_year);
    Some(BirthYearStats {
        earliest: years().min()?,
        most_recent: years().max()?,
        most_common: most_frequent(years())?,
    })
}

/// User type, gender and birth year breakdown.
///
/// Gender and birth year are reported only when the city's file has those
/// columns; otherwise they are [`Availability::Unavailable`].
#[must_use]
pub fn demographics(table: &TripTable) -> Demographics {
    let trips = table.trips();

    let user_types = distribution(trips.iter().map(|t| t.user_type.as_deref()));

    let gender = if table.supports(Capability::Gender) {
        Availability::Available(distribution(trips.iter().map(|t| t.gender.as_deref())))
    } else {
        log::debug!("Gender column absent; skipping gender breakdown");
        Availability::Unavailable
    };

    let birth_year = if table.supports(Capability::BirthYear) {
        Availability::Available(birth_year_stats(trips))
    } else {
        log::debug!("Birth Year column absent; skipping birth year stats");
        Availability::Unavailable
    };

    Demographics {
        user_types,
        gender,
        birth_year,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use bikeshare_trips::loader::load_city;
    use bikeshare_trips::progress::NullProgress;
    use bikeshare_trips::registry::CityRegistry;
    use bikeshare_trips::table::TableSchema;
    use bikeshare_trips_models::{FilterSelection, calendar_of};
    use chrono::{Month, NaiveDateTime, Weekday};

    use super::*;

    const BASE_COLUMNS: &[&str] = &[
        "Start Time",
        "Trip Duration",
        "Start Station",
        "End Station",
        "User Type",
    ];

    struct Row {
        start: &'static str,
        from: &'static str,
        to: &'static str,
        duration: f64,
        user_type: Option<&'static str>,
        gender: Option<&'static str>,
        birth_year: Option<i32>,
    }

    const fn row(start: &'static str, from: &'static str, to: &'static str, duration: f64) -> Row {
        Row {
            start,
            from,
            to,
            duration,
            user_type: Some("Subscriber"),
            gender: None,
            birth_year: None,
        }
    }

    fn trip(row: &Row) -> Trip {
        let start_time = NaiveDateTime::parse_from_str(row.start, "%Y-%m-%d %H:%M:%S").unwrap();
        let (month, weekday) = calendar_of(&start_time);
        Trip {
            row_id: None,
            start_time,
            end_time: None,
            trip_duration: row.duration,
            start_station: row.from.to_string(),
            end_station: row.to.to_string(),
            user_type: row.user_type.map(str::to_string),
            gender: row.gender.map(str::to_string),
            birth_year: row.birth_year,
            month,
            weekday,
        }
    }

    fn table(extra_columns: &[&str], rows: &[Row]) -> TripTable {
        let schema = TableSchema::from_headers(BASE_COLUMNS.iter().chain(extra_columns).copied());
        TripTable::new(schema, rows.iter().map(trip).collect())
    }

    fn chicago_like() -> TripTable {
        table(
            &["Gender", "Birth Year"],
            &[
                Row {
                    gender: Some("Male"),
                    birth_year: Some(1985),
                    ..row("2017-06-23 08:05:00", "Canal St", "Clinton St", 300.0)
                },
                Row {
                    gender: Some("Female"),
                    birth_year: Some(1992),
                    ..row("2017-06-23 08:40:00", "Canal St", "Clinton St", 600.0)
                },
                Row {
                    user_type: Some("Customer"),
                    ..row("2017-06-24 17:10:00", "Lake Shore Dr", "Canal St", 900.0)
                },
                Row {
                    gender: Some("Male"),
                    birth_year: Some(1992),
                    ..row("2017-05-26 08:00:00", "Wood St", "Canal St", 1200.0)
                },
                Row {
                    user_type: None,
                    birth_year: Some(1960),
                    ..row("2017-06-30 12:00:00", "Wood St", "Clinton St", 1500.0)
                },
            ],
        )
    }

    #[test]
    fn popular_times_reports_month_weekday_and_hour() {
        let times = popular_times(&chicago_like()).unwrap();
        assert_eq!(times.month, ValueCount { value: Month::June, count: 4 });
        assert_eq!(times.weekday, ValueCount { value: Weekday::Fri, count: 4 });
        assert_eq!(times.hour, ValueCount { value: 8, count: 3 });
    }

    #[test]
    fn popular_times_is_none_for_empty_table() {
        assert_eq!(popular_times(&table(&[], &[])), None);
    }

    #[test]
    fn popular_stations_counts_stations_and_trips() {
        let stations = popular_stations(&chicago_like()).unwrap();
        assert_eq!(stations.start_station.value, "Canal St");
        assert_eq!(stations.start_station.count, 2);
        assert_eq!(stations.end_station.value, "Clinton St");
        assert_eq!(stations.end_station.count, 3);
        assert_eq!(stations.trip.value, "Canal St to Clinton St");
        assert_eq!(stations.trip.count, 2);
    }

    #[test]
    fn popular_stations_breaks_ties_by_first_row() {
        let t = table(
            &[],
            &[
                row("2017-01-02 10:00:00", "B", "Y", 1.0),
                row("2017-01-02 10:00:00", "A", "X", 1.0),
                row("2017-01-02 10:00:00", "A", "X", 1.0),
                row("2017-01-02 10:00:00", "B", "Y", 1.0),
            ],
        );
        let first = popular_stations(&t).unwrap();
        assert_eq!(first.start_station.value, "B");
        assert_eq!(first.trip.value, "B to Y");
        assert_eq!(popular_stations(&t).unwrap(), first);
    }

    #[test]
    fn popular_stations_is_none_for_empty_table() {
        assert_eq!(popular_stations(&table(&[], &[])), None);
    }

    #[test]
    fn trip_duration_sums_and_averages() {
        let stats = trip_duration(&chicago_like());
        assert_eq!(stats.trip_count, 5);
        assert!((stats.total_seconds - 4500.0).abs() < f64::EPSILON);
        assert!((stats.mean_seconds.unwrap() - 900.0).abs() < f64::EPSILON);
    }

    #[test]
    fn trip_duration_of_empty_table_has_no_mean() {
        let stats = trip_duration(&table(&[], &[]));
        assert_eq!(stats.trip_count, 0);
        assert!(stats.total_seconds.abs() < f64::EPSILON);
        assert_eq!(stats.mean_seconds, None);
    }

    #[test]
    fn filtered_duration_matches_sum_over_same_rows() {
        let full = chicago_like();
        let selection = FilterSelection::new(Some(Month::June), Some(Weekday::Fri));
        let filtered = full.filter(&selection);
        let direct: f64 = full
            .trips()
            .iter()
            .filter(|t| selection.matches(t))
            .map(|t| t.trip_duration)
            .sum();
        assert!((trip_duration(&filtered).total_seconds - direct).abs() < f64::EPSILON);
    }

    #[test]
    fn demographics_reports_distributions_and_missing_counts() {
        let demo = demographics(&chicago_like());

        assert_eq!(
            demo.user_types.counts,
            [
                ValueCount { value: "Subscriber".to_string(), count: 3 },
                ValueCount { value: "Customer".to_string(), count: 1 },
            ]
        );
        assert_eq!(demo.user_types.missing, 1);

        let gender = demo.gender.as_available().unwrap();
        assert_eq!(
            gender.counts,
            [
                ValueCount { value: "Male".to_string(), count: 2 },
                ValueCount { value: "Female".to_string(), count: 1 },
            ]
        );
        assert_eq!(gender.missing, 2);

        let years = demo.birth_year.as_available().unwrap().as_ref().unwrap();
        assert_eq!(years.earliest, 1960);
        assert_eq!(years.most_recent, 1992);
        assert_eq!(years.most_common, ValueCount { value: 1992, count: 2 });
    }

    #[test]
    fn demographics_without_optional_columns_reports_unavailable() {
        let t = table(&[], &[row("2017-01-02 10:00:00", "A", "B", 60.0)]);
        let demo = demographics(&t);
        assert_eq!(demo.gender, Availability::Unavailable);
        assert_eq!(demo.birth_year, Availability::Unavailable);
        assert_eq!(demo.user_types.counts.len(), 1);
    }

    #[test]
    fn birth_year_column_with_no_values_is_available_but_empty() {
        let t = table(
            &["Gender", "Birth Year"],
            &[row("2017-01-02 10:00:00", "A", "B", 60.0)],
        );
        let demo = demographics(&t);
        assert_eq!(demo.birth_year, Availability::Available(None));
        assert_eq!(
            demo.gender,
            Availability::Available(Distribution {
                counts: Vec::new(),
                missing: 1,
            })
        );
    }

    #[test]
    fn demographics_of_empty_filtered_table_keeps_capabilities() {
        let empty = chicago_like().filter(&FilterSelection::new(Some(Month::January), None));
        let demo = demographics(&empty);
        assert_eq!(demo.user_types, Distribution::default());
        assert_eq!(demo.birth_year, Availability::Available(None));
        assert!(demo.gender.as_available().is_some());
    }

    #[test]
    fn load_then_report_leaves_the_file_untouched() {
        const CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0
9031,2017-01-04 08:27:49,2017-01-04 08:34:45,416,May St & Taylor St,Wood St & Taylor St,Subscriber,,
";
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chicago.csv");
        fs::write(&path, CSV).unwrap();
        let modified_before = fs::metadata(&path).unwrap().modified().unwrap();

        let registry = CityRegistry::embedded(dir.path());
        let table = load_city(&registry, "chicago", &NullProgress).unwrap();
        for selection in [
            FilterSelection::all(),
            FilterSelection::new(Some(Month::June), None),
        ] {
            let filtered = table.filter(&selection);
            assert!(popular_times(&filtered).is_some());
            assert!(popular_stations(&filtered).is_some());
            assert!(trip_duration(&filtered).mean_seconds.is_some());
            assert!(demographics(&filtered).gender.as_available().is_some());
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), CSV);
        assert_eq!(
            fs::metadata(&path).unwrap().modified().unwrap(),
            modified_before
        );
    }
}
