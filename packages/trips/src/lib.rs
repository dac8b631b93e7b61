#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! City registry, CSV loading and filtering for bike-share trip tables.
//!
//! A city's file is read in full into a [`table::TripTable`], which records
//! the columns the file actually has so that optional data (gender, birth
//! year) can be detected per city instead of assumed.

pub mod loader;
pub mod parsing;
pub mod progress;
pub mod registry;
pub mod table;

use std::path::PathBuf;

/// Errors that can occur while resolving or loading a city's trips.
#[derive(Debug, thiserror::Error)]
pub enum TripsError {
    /// The city identifier is not in the registry.
    #[error("Unknown city: {id}")]
    UnknownCity {
        /// Identifier that failed to resolve.
        id: String,
    },

    /// The backing file could not be opened or read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// CSV framing or field conversion failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A column every city file must have is missing from the header row.
    #[error("Missing required column '{column}'")]
    MissingColumn {
        /// Header name that was expected.
        column: &'static str,
    },

    /// A start or end time could not be parsed.
    #[error("Invalid timestamp '{value}' on line {line}")]
    InvalidTimestamp {
        /// 1-based line number in the file (header is line 1).
        line: u64,
        /// Raw field value.
        value: String,
    },
}
