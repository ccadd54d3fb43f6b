//! Enrollment statistics for Calgary high schools.
//!
//! The dataset is a year × school × grade array of enrollment counts. A school
//! is picked by name or code, then per-school and dataset-wide figures are
//! reported. Missing cells are `NaN` and are skipped by every reduction.

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod stats;
pub mod ui;
