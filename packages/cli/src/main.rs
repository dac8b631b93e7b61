#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Interactive explorer for US bike-share trip data.
//!
//! Asks for a city and an optional month/day filter, prints popular times,
//! popular stations, trip duration and user statistics for the matching
//! trips, then offers the raw rows five at a time.
//!
//! Uses `indicatif-log-bridge` (via [`bikeshare_cli_utils::init_logger`])
//! so that log lines and the loading spinner share the terminal. Set
//! `RUST_LOG` to see them and `BIKESHARE_DATA_DIR` to point at the CSVs.

mod input;
mod pager;
mod prompts;
mod render;
mod session;

use bikeshare_cli_utils::IndicatifProgress;
use bikeshare_trips::TripsError;
use bikeshare_trips::progress::ProgressCallback;
use bikeshare_trips::registry::{CityDefinition, CityRegistry, data_dir_from_env};

use crate::input::TerminalInput;

/// Errors that end an interactive session.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The terminal prompt failed.
    #[error("Prompt failed: {0}")]
    Terminal(#[from] dialoguer::Error),

    /// Reading stdin or writing stdout failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stdin reached end of file while an answer was expected.
    #[error("Input closed before an answer was given")]
    InputClosed,

    /// The selected city's trips could not be loaded.
    #[error(transparent)]
    Trips(#[from] TripsError),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = bikeshare_cli_utils::init_logger();

    let registry = CityRegistry::embedded(data_dir_from_env());
    log::debug!("Reading city files from {}", registry.data_dir().display());

    let progress = |city: &CityDefinition| -> Box<dyn ProgressCallback> {
        Box::new(IndicatifProgress::records_spinner(
            &multi,
            &format!("Loading {}", city.name),
        ))
    };

    let mut input = TerminalInput::new();
    let mut out = std::io::stdout();

    if let Err(e) = session::run(&mut input, &mut out, &registry, &progress) {
        log::error!("Session ended: {e}");
        return Err(e.into());
    }

    Ok(())
}
