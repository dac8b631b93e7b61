#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregate reports over a (filtered) trip table.
//!
//! Each public function in [`reports`] corresponds to one report block the
//! CLI prints. They are pure and infallible: an empty table yields `None`
//! or zeroed figures instead of an error.

pub mod frequency;
pub mod reports;
