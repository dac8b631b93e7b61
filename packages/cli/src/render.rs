//! Plain-text rendering of the report blocks and raw-data pages.

use std::io::{self, Write};

use bikeshare_analytics_models::{
    Availability, BirthYearStats, Demographics, Distribution, PopularStations, PopularTimes,
    TripDurationStats,
};
use bikeshare_trips::table::{Capability, TripTable};
use bikeshare_trips_models::{Trip, month_name, weekday_name};

const NO_DATA: &str = "No data available for the selected filters.";

fn header<W: Write + ?Sized>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "{}", "*".repeat(30))?;
    writeln!(out, "{title}\n")
}

fn rule<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(30))
}

/// Formats seconds as `"1d 2h 3m 4s"`, dropping leading zero units.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn human_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return format!("{seconds}s");
    }
    let total = seconds.round() as u64;
    let (days, rem) = (total / 86_400, total % 86_400);
    let (hours, rem) = (rem / 3_600, rem % 3_600);
    let (minutes, secs) = (rem / 60, rem % 60);

    let parts = [(days, "d"), (hours, "h"), (minutes, "m")];
    let mut out = String::new();
    for (value, unit) in parts.iter().skip_while(|(v, _)| *v == 0) {
        out.push_str(&format!("{value}{unit} "));
    }
    out.push_str(&format!("{secs}s"));
    out
}

/// Writes the popular-times block.
///
/// # Errors
///
/// Returns an I/O error if `out` cannot be written.
pub fn popular_times<W: Write + ?Sized>(
    out: &mut W,
    report: Option<&PopularTimes>,
) -> io::Result<()> {
    header(out, "POPULAR TIMES OF TRAVEL")?;
    let Some(report) = report else {
        return writeln!(out, "{NO_DATA}\n");
    };
    writeln!(
        out,
        "Most frequent month: {} ({} trips)",
        month_name(report.month.value),
        report.month.count
    )?;
    rule(out)?;
    writeln!(
        out,
        "Most frequent day of the week: {} ({} trips)",
        weekday_name(report.weekday.value),
        report.weekday.count
    )?;
    rule(out)?;
    writeln!(
        out,
        "Most frequent start hour: {} ({} trips)\n",
        report.hour.value, report.hour.count
    )
}

/// Writes the popular-stations block.
///
/// # Errors
///
/// Returns an I/O error if `out` cannot be written.
pub fn popular_stations<W: Write + ?Sized>(
    out: &mut W,
    report: Option<&PopularStations>,
) -> io::Result<()> {
    header(out, "POPULAR STATIONS AND TRIP")?;
    let Some(report) = report else {
        return writeln!(out, "{NO_DATA}\n");
    };
    writeln!(out, "Most common start station: {}", report.start_station.value)?;
    writeln!(
        out,
        "Number of times as start station: {}",
        report.start_station.count
    )?;
    rule(out)?;
    writeln!(out, "Most common end station: {}", report.end_station.value)?;
    writeln!(
        out,
        "Number of times as end station: {}",
        report.end_station.count
    )?;
    rule(out)?;
    writeln!(out, "The most common trip is: {}", report.trip.value)?;
    writeln!(out, "which has been ridden {} times\n", report.trip.count)
}

/// Writes the trip-duration block.
///
/// # Errors
///
/// Returns an I/O error if `out` cannot be written.
pub fn trip_duration<W: Write + ?Sized>(out: &mut W, report: &TripDurationStats) -> io::Result<()> {
    header(out, "TRIP DURATION")?;
    writeln!(
        out,
        "Total travel time: {:.2} seconds ({})",
        report.total_seconds,
        human_duration(report.total_seconds)
    )?;
    rule(out)?;
    match report.mean_seconds {
        Some(mean) => writeln!(
            out,
            "Average travel time: {mean:.2} seconds ({})\n",
            human_duration(mean)
        ),
        None => writeln!(out, "Average travel time: no data\n"),
    }
}

fn distribution<W: Write + ?Sized>(
    out: &mut W,
    label: &str,
    dist: &Distribution,
) -> io::Result<()> {
    writeln!(out, "{label:<24} Amount:")?;
    for vc in &dist.counts {
        writeln!(out, "{:<24} {}", vc.value, vc.count)?;
    }
    writeln!(out, "\nNo {label} information in {} trips.", dist.missing)
}

fn birth_years<W: Write + ?Sized>(out: &mut W, stats: Option<&BirthYearStats>) -> io::Result<()> {
    writeln!(out, "\nBirth year information:\n")?;
    let Some(stats) = stats else {
        return writeln!(out, "Birth year information is not available for these trips.");
    };
    writeln!(out, "Earliest birth year: {}", stats.earliest)?;
    writeln!(out, "Most recent birth year: {}", stats.most_recent)?;
    writeln!(
        out,
        "Most common birth year: {} ({} trips)",
        stats.most_common.value, stats.most_common.count
    )
}

/// Writes the user-information block.
///
/// # Errors
///
/// Returns an I/O error if `out` cannot be written.
pub fn demographics<W: Write + ?Sized>(out: &mut W, report: &Demographics) -> io::Result<()> {
    header(out, "USER INFORMATION")?;
    distribution(out, "User type", &report.user_types)?;
    rule(out)?;

    match &report.gender {
        Availability::Available(dist) => {
            writeln!(out)?;
            distribution(out, "Gender", dist)?;
            rule(out)?;
        }
        Availability::Unavailable => {
            writeln!(out, "\n{} information is not available", Capability::Gender)?;
        }
    }

    match &report.birth_year {
        Availability::Available(stats) => {
            birth_years(out, stats.as_ref())?;
            rule(out)?;
        }
        Availability::Unavailable => {
            writeln!(
                out,
                "\n{} information is not available",
                Capability::BirthYear
            )?;
        }
    }
    writeln!(out)
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Writes one record of a raw-data page. `position` is the row's index in
/// the filtered table, shown when the file has no row identifier.
///
/// # Errors
///
/// Returns an I/O error if `out` cannot be written.
pub fn raw_trip<W: Write + ?Sized>(
    out: &mut W,
    table: &TripTable,
    position: usize,
    trip: &Trip,
) -> io::Result<()> {
    let id = trip
        .row_id
        .clone()
        .unwrap_or_else(|| format!("#{position}"));
    writeln!(out, "Trip {id}")?;
    writeln!(out, "  Start Time:     {}", trip.start_time)?;
    writeln!(out, "  End Time:       {}", optional(trip.end_time))?;
    writeln!(out, "  Trip Duration:  {} seconds", trip.trip_duration)?;
    writeln!(out, "  Start Station:  {}", trip.start_station)?;
    writeln!(out, "  End Station:    {}", trip.end_station)?;
    writeln!(out, "  User Type:      {}", optional(trip.user_type.as_deref()))?;
    if table.supports(Capability::Gender) {
        writeln!(out, "  Gender:         {}", optional(trip.gender.as_deref()))?;
    }
    if table.supports(Capability::BirthYear) {
        writeln!(out, "  Birth Year:     {}", optional(trip.birth_year))?;
    }
    writeln!(
        out,
        "  Month / Day:    {} / {}",
        trip.month_name(),
        trip.weekday_name()
    )
}
