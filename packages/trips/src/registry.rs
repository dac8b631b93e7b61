//! City registry: maps city identifiers to their trip files.
//!
//! Each `.toml` file in `packages/trips/cities/` is baked into the binary at
//! compile time via [`include_str!`]. The data directory the files live in is
//! supplied at runtime so that the registry can point at test fixtures.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::TripsError;

/// Environment variable that overrides the directory holding the city files.
pub const DATA_DIR_ENV: &str = "BIKESHARE_DATA_DIR";

/// TOML configs embedded at compile time.
const CITY_TOMLS: &[(&str, &str)] = &[
    ("chicago", include_str!("../cities/chicago.toml")),
    ("new_york_city", include_str!("../cities/new_york_city.toml")),
    ("washington", include_str!("../cities/washington.toml")),
];

/// Total number of configured cities (used in tests).
#[cfg(test)]
const EXPECTED_CITY_COUNT: usize = 3;

/// A city whose trips can be explored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CityDefinition {
    /// Identifier the user types at the city prompt (e.g., `"new york city"`).
    pub id: String,
    /// Human-readable name (e.g., `"New York City"`).
    pub name: String,
    /// File name of the city's CSV, relative to the data directory.
    pub file: String,
}

/// Parses a single city definition from TOML.
///
/// # Errors
///
/// Returns [`toml::de::Error`] if the TOML is malformed or a field is missing.
pub fn parse_city_toml(toml_str: &str) -> Result<CityDefinition, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns all embedded city definitions.
///
/// # Panics
///
/// Panics if any embedded TOML file fails to parse. Since these are
/// compile-time constants, parse failures indicate a development error
/// and are caught by the tests below.
#[must_use]
pub fn all_cities() -> Vec<CityDefinition> {
    CITY_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            parse_city_toml(toml_str).unwrap_or_else(|e| panic!("Failed to parse {name}.toml: {e}"))
        })
        .collect()
}

/// Resolves the data directory from [`DATA_DIR_ENV`], falling back to the
/// current working directory.
#[must_use]
pub fn data_dir_from_env() -> PathBuf {
    std::env::var_os(DATA_DIR_ENV).map_or_else(|| PathBuf::from("."), PathBuf::from)
}

/// The fixed set of known cities plus the directory their files live in.
#[derive(Debug, Clone)]
pub struct CityRegistry {
    cities: Vec<CityDefinition>,
    data_dir: PathBuf,
}

impl CityRegistry {
    /// Builds a registry from the embedded city definitions.
    #[must_use]
    pub fn embedded(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(all_cities(), data_dir)
    }

    /// Builds a registry from explicit definitions.
    #[must_use]
    pub fn new(cities: Vec<CityDefinition>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            cities,
            data_dir: data_dir.into(),
        }
    }

    /// Directory the city files are resolved against.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Finds the city whose identifier equals `input`, ignoring ASCII case.
    ///
    /// Surrounding whitespace is significant: `"Chicago "` does not match.
    #[must_use]
    pub fn find(&self, input: &str) -> Option<&CityDefinition> {
        self.cities
            .iter()
            .find(|city| city.id.eq_ignore_ascii_case(input))
    }

    /// Looks up a city by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TripsError::UnknownCity`] if no city matches.
    pub fn get(&self, id: &str) -> Result<&CityDefinition, TripsError> {
        self.find(id).ok_or_else(|| TripsError::UnknownCity {
            id: id.to_string(),
        })
    }

    /// Full path of a city's trip file.
    #[must_use]
    pub fn path_for(&self, city: &CityDefinition) -> PathBuf {
        self.data_dir.join(&city.file)
    }

    /// Identifiers joined for display in a prompt (`"chicago, new york city or washington"`).
    #[must_use]
    pub fn prompt_list(&self) -> String {
        let ids: Vec<&str> = self.cities.iter().map(|c| c.id.as_str()).collect();
        match ids.split_last() {
            None => String::new(),
            Some((last, [])) => (*last).to_string(),
            Some((last, rest)) => format!("{} or {last}", rest.join(", ")),
        }
    }
}
