//! Report configuration.
//!
//! Built once in `main` and passed by reference to the report builders.
//! `Default` reproduces the standard console report.

use serde::{Deserialize, Serialize};

/// Enrollment count a cell must strictly exceed to enter the median.
pub const DEFAULT_THRESHOLD: f64 = 500.0;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Cells strictly above this count feed the per-school median.
    pub threshold: f64,

    /// Calendar years whose mean enrollment the general section reports.
    /// `None` means the first and last year of the dataset.
    pub mean_years: Option<Vec<i32>>,

    /// Calendar year whose graduating class is totalled.
    /// `None` means the last year of the dataset.
    pub graduating_year: Option<i32>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            threshold: DEFAULT_THRESHOLD,
            mean_years: None,
            graduating_year: None,
        }
    }
}

impl ReportConfig {
    /// Years for the general-section means, resolved against a dataset span.
    pub fn mean_years_for(&self, first_year: i32, last_year: i32) -> Vec<i32> {
        match &self.mean_years {
            Some(years) => years.clone(),
            None if first_year == last_year => vec![first_year],
            None => vec![first_year, last_year],
        }
    }

    pub fn graduating_year_for(&self, last_year: i32) -> i32 {
        self.graduating_year.unwrap_or(last_year)
    }
}
