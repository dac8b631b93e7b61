//! Validated prompts: city, filter mode, month, weekday and yes/no answers.
//!
//! Each prompt loops until the answer is valid. Invalid answers print a
//! short message and ask again; nothing else changes.

use std::io::Write;
use std::str::FromStr as _;

use bikeshare_trips::registry::{CityDefinition, CityRegistry};
use bikeshare_trips::table::TripTable;
use bikeshare_trips_models::{FilterMode, FilterSelection, month_name, weekday_name};
use chrono::{Month, Weekday};
use strum_macros::EnumString;

use crate::CliError;
use crate::input::LineSource;

/// A yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Answer {
    /// `y` or `yes`.
    #[strum(serialize = "y", serialize = "yes")]
    Yes,
    /// `n` or `no`.
    #[strum(serialize = "n", serialize = "no")]
    No,
}

/// Asks `prompt` until `parse` accepts the answer. `reject` builds the
/// message printed for an answer that was not accepted.
///
/// # Errors
///
/// Returns [`CliError`] if input is closed or output cannot be written.
pub fn ask_until<T, I, W>(
    input: &mut I,
    out: &mut W,
    prompt: &str,
    parse: impl Fn(&str) -> Option<T>,
    reject: impl Fn(&str) -> String,
) -> Result<T, CliError>
where
    I: LineSource + ?Sized,
    W: Write + ?Sized,
{
    loop {
        let answer = input.read_line(prompt)?;
        if let Some(value) = parse(&answer) {
            return Ok(value);
        }
        log::debug!("Rejected answer {answer:?} to prompt {prompt:?}");
        writeln!(out, "{}", reject(&answer))?;
    }
}

/// Asks a `(y) (n)` question until the answer is one of them.
///
/// # Errors
///
/// Returns [`CliError`] if input is closed or output cannot be written.
pub fn ask_yes_no<I, W>(input: &mut I, out: &mut W, prompt: &str) -> Result<Answer, CliError>
where
    I: LineSource + ?Sized,
    W: Write + ?Sized,
{
    ask_until(
        input,
        out,
        prompt,
        |a| Answer::from_str(a).ok(),
        |_| "Try again".to_string(),
    )
}

/// Asks for a city until the answer matches a registry identifier,
/// ignoring case. Echoes the selection.
///
/// # Errors
///
/// Returns [`CliError`] if input is closed or output cannot be written.
pub fn select_city<'r, I, W>(
    input: &mut I,
    out: &mut W,
    registry: &'r CityRegistry,
) -> Result<&'r CityDefinition, CliError>
where
    I: LineSource + ?Sized,
    W: Write + ?Sized,
{
    let prompt = format!("Please, select one city: {}", registry.prompt_list());
    let city = ask_until(
        input,
        out,
        &prompt,
        |a| registry.find(a),
        |a| format!("{a} is not a valid city. Try again."),
    )?;
    writeln!(out, "\nYou have selected: {}\n", city.name)?;
    Ok(city)
}

/// Finds the month in `available` whose name equals `answer`, ignoring case.
fn match_month(available: &[Month], answer: &str) -> Option<Month> {
    available
        .iter()
        .copied()
        .find(|m| month_name(*m).eq_ignore_ascii_case(answer))
}

/// Finds the weekday in `available` whose name equals `answer`, ignoring case.
fn match_weekday(available: &[Weekday], answer: &str) -> Option<Weekday> {
    available
        .iter()
        .copied()
        .find(|d| weekday_name(*d).eq_ignore_ascii_case(answer))
}

/// A table without rows offers nothing to pick, so the prompt that follows
/// can only be left by closing input.
fn warn_if_no_options<T, W: Write + ?Sized>(
    out: &mut W,
    available: &[T],
    what: &str,
) -> Result<(), CliError> {
    if available.is_empty() {
        log::warn!("No {what} values present in the loaded trips");
        writeln!(out, "This city has no trips, so there is no {what} to select.")?;
    }
    Ok(())
}

/// Asks for the filter mode and then, depending on it, a month and/or a
/// weekday drawn from the values present in `table`.
///
/// # Errors
///
/// Returns [`CliError`] if input is closed or output cannot be written.
pub fn select_filter<I, W>(
    input: &mut I,
    out: &mut W,
    table: &TripTable,
) -> Result<FilterSelection, CliError>
where
    I: LineSource + ?Sized,
    W: Write + ?Sized,
{
    let mode = ask_until(
        input,
        out,
        "Would you like to filter the data by month, day, both or none?",
        |a| FilterMode::from_str(a).ok(),
        |_| "Not a correct filter. Try again".to_string(),
    )?;

    let mut month = None;
    if mode.includes_month() {
        let available = table.available_months();
        warn_if_no_options(out, &available, "month")?;
        let names: Vec<&str> = available.iter().map(|m| month_name(*m)).collect();
        let chosen = ask_until(
            input,
            out,
            &format!("Select month: {}", names.join(", ")),
            |a| match_month(&available, a),
            |_| "Not a correct filter for month".to_string(),
        )?;
        writeln!(out, "\nSelected month: {}\n", month_name(chosen))?;
        month = Some(chosen);
    }

    let mut weekday = None;
    if mode.includes_day() {
        let available = table.available_weekdays();
        warn_if_no_options(out, &available, "day")?;
        let names: Vec<&str> = available.iter().map(|d| weekday_name(*d)).collect();
        let chosen = ask_until(
            input,
            out,
            &format!("Select day: {}", names.join(", ")),
            |a| match_weekday(&available, a),
            |_| "Not a correct filter for day".to_string(),
        )?;
        writeln!(out, "\nSelected day: {}\n", weekday_name(chosen))?;
        weekday = Some(chosen);
    }

    if mode == FilterMode::NoFilter {
        writeln!(out, "\nNo filter applied\n")?;
    }

    Ok(FilterSelection::new(month, weekday))
}
