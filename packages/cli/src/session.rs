//! One exploration session: city, filter, reports, raw data, restart.

use std::io::Write;
use std::time::Instant;

use bikeshare_analytics::reports;
use bikeshare_trips::loader::load_city;
use bikeshare_trips::progress::ProgressCallback;
use bikeshare_trips::registry::{CityDefinition, CityRegistry};
use bikeshare_trips::table::TripTable;

use crate::CliError;
use crate::input::LineSource;
use crate::pager::run_pager;
use crate::prompts::{Answer, ask_yes_no, select_city, select_filter};
use crate::render;

const RESTART_PROMPT: &str = "Restart and select city again? (y) (n)";

/// Builds the progress indicator shown while a city's file loads.
pub type ProgressFactory<'a> = dyn Fn(&CityDefinition) -> Box<dyn ProgressCallback> + 'a;

/// Runs exploration rounds until the user declines to restart.
///
/// # Errors
///
/// Returns [`CliError`] if input closes, output fails, or a city's file
/// cannot be loaded. A load failure ends the session.
pub fn run<I, W>(
    input: &mut I,
    out: &mut W,
    registry: &CityRegistry,
    progress: &ProgressFactory<'_>,
) -> Result<(), CliError>
where
    I: LineSource + ?Sized,
    W: Write + ?Sized,
{
    let mut round = 1u32;
    loop {
        log::debug!("Starting exploration round {round}");
        explore(input, out, registry, progress)?;
        if ask_yes_no(input, out, RESTART_PROMPT)? == Answer::No {
            break;
        }
        round += 1;
    }
    writeln!(out, "\nBye!")?;
    Ok(())
}

/// One round: pick a city and filter, print the reports, page raw rows.
fn explore<I, W>(
    input: &mut I,
    out: &mut W,
    registry: &CityRegistry,
    progress: &ProgressFactory<'_>,
) -> Result<(), CliError>
where
    I: LineSource + ?Sized,
    W: Write + ?Sized,
{
    writeln!(out, "{}", "*".repeat(30))?;
    writeln!(out, "EXPLORE US BIKESHARE DATA")?;
    writeln!(out, "{}\n", "*".repeat(30))?;

    let city = select_city(input, out, registry)?;
    let table = {
        let bar = progress(city);
        load_city(registry, &city.id, bar.as_ref())?
    };

    let selection = select_filter(input, out, &table)?;
    let filtered = table.filter(&selection);
    log::info!(
        "{} of {} trips match ({selection})",
        filtered.len(),
        table.len()
    );
    if filtered.is_empty() {
        log::warn!("No trips in {} match ({selection})", city.name);
    }
    writeln!(out, "Trips selected: {}\n", filtered.len())?;

    report(out, &filtered)?;
    run_pager(input, out, &filtered)?;
    Ok(())
}

fn report<W: Write + ?Sized>(out: &mut W, table: &TripTable) -> Result<(), CliError> {
    let start = Instant::now();
    render::popular_times(out, reports::popular_times(table).as_ref())?;
    render::popular_stations(out, reports::popular_stations(table).as_ref())?;
    render::trip_duration(out, &reports::trip_duration(table))?;
    render::demographics(out, &reports::demographics(table))?;
    log::debug!(
        "Computed reports in {:.3}s",
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use bikeshare_trips::TripsError;
    use bikeshare_trips::progress::NullProgress;

    use super::*;
    use crate::input::scripted::ScriptedInput;

    const CHICAGO_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0
9031,2017-01-04 08:27:49,2017-01-04 08:34:45,416,May St & Taylor St,Wood St & Taylor St,Subscriber,,
304487,2017-03-06 13:49:38,2017-03-06 13:55:28,350,Christiana Ave & Lawrence Ave,St. Louis Ave & Balmoral Ave,Customer,,
";

    const WASHINGTON_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
482740,2017-03-11 10:40:00,2017-03-11 10:46:00,402.549,Yuma St & Tenley Circle NW,Connecticut Ave & Yuma St NW,
";

    fn data_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("chicago.csv"), CHICAGO_CSV).unwrap();
        std::fs::write(dir.path().join("washington.csv"), WASHINGTON_CSV).unwrap();
        dir
    }

    fn null_progress(_: &CityDefinition) -> Box<dyn ProgressCallback> {
        Box::new(NullProgress)
    }

    fn session(dir: &Path, answers: &[&str]) -> (Result<(), CliError>, ScriptedInput, String) {
        let registry = CityRegistry::embedded(dir);
        let mut input = ScriptedInput::new(answers);
        let mut out: Vec<u8> = Vec::new();
        let result = run(&mut input, &mut out, &registry, &null_progress);
        (result, input, String::from_utf8(out).unwrap())
    }

    #[test]
    fn filtered_round_reports_and_pages_matching_rows() {
        let dir = data_dir();
        let (result, input, text) = session(dir.path(), &["Washington", "month", "june", "y", "n"]);

        result.unwrap();
        assert_eq!(input.remaining(), 0);
        assert!(text.contains("EXPLORE US BIKESHARE DATA"));
        assert!(text.contains("You have selected: Washington"));
        assert!(text.contains("Trips selected: 1"));
        assert!(text.contains("Most frequent month: June (1 trips)"));
        assert!(text.contains("Gender information is not available"));
        assert!(text.contains("Birth year information is not available"));
        assert!(text.contains("Trip 1621326"));
        assert!(!text.contains("Trip 482740"));
        assert!(text.contains("No more raw data to display."));
        assert_eq!(input.prompts[1], "Would you like to filter the data by month, day, both or none?");
        assert_eq!(input.prompts[2], "Select month: March, June");
        assert_eq!(input.prompts.last().map(String::as_str), Some(RESTART_PROMPT));
    }

    #[test]
    fn unfiltered_chicago_round_shows_gender_and_birth_years() {
        let dir = data_dir();
        let (result, input, text) = session(dir.path(), &["chicago", "none", "n", "n"]);

        result.unwrap();
        assert_eq!(input.remaining(), 0);
        assert!(text.contains("No filter applied"));
        assert!(text.contains("Trips selected: 4"));
        assert!(text.contains(&format!("{:<24} {}", "Subscriber", 3)));
        assert!(text.contains(&format!("{:<24} {}", "Male", 1)));
        assert!(text.contains(&format!("{:<24} {}", "Female", 1)));
        assert!(text.contains("No Gender information in 2 trips."));
        assert!(text.contains("Earliest birth year: 1992"));
        assert!(text.contains("Most recent birth year: 1992"));
        assert!(text.contains("Most common birth year: 1992 (2 trips)"));
        assert!(!text.contains("information is not available"));
    }

    #[test]
    fn empty_filter_result_reports_no_data() {
        let dir = data_dir();
        let (result, input, text) = session(dir.path(), &["chicago", "both", "may", "monday", "n"]);

        result.unwrap();
        assert_eq!(input.remaining(), 0);
        assert!(text.contains("Trips selected: 0"));
        assert!(text.contains("No data available for the selected filters."));
        assert!(text.contains("Average travel time: no data"));
        assert!(text.contains("Birth year information is not available for these trips."));
        assert!(text.contains("No more raw data to display."));
    }

    #[test]
    fn restart_runs_another_round() {
        let dir = data_dir();
        let (result, input, text) = session(
            dir.path(),
            &["chicago", "none", "n", "y", "washington", "none", "n", "n"],
        );

        result.unwrap();
        assert_eq!(input.remaining(), 0);
        assert_eq!(text.matches("EXPLORE US BIKESHARE DATA").count(), 2);
        assert!(text.contains("You have selected: Chicago"));
        assert!(text.contains("You have selected: Washington"));
        assert!(text.contains("Trips selected: 4"));
        assert!(text.contains("Trips selected: 2"));
        assert!(text.ends_with("Bye!\n"));
    }

    #[test]
    fn rejected_city_never_touches_the_filesystem() {
        let empty = tempfile::tempdir().unwrap();
        let (result, input, text) = session(empty.path(), &["Chicago "]);

        assert!(matches!(result, Err(CliError::InputClosed)));
        assert_eq!(input.prompts.len(), 2);
        assert!(text.contains("Chicago  is not a valid city. Try again."));
    }

    #[test]
    fn missing_city_file_ends_the_session() {
        let empty = tempfile::tempdir().unwrap();
        let (result, input, _) = session(empty.path(), &["new york city", "none"]);

        assert!(matches!(
            result,
            Err(CliError::Trips(TripsError::Io { .. }))
        ));
        assert_eq!(input.remaining(), 1);
    }
}
