use std::fmt;

use crate::config::ReportConfig;
use crate::data::model::{EnrollmentDataset, Grade};
use crate::data::resolver::ResolvedSchool;
use crate::error::StatsError;
use crate::stats::StatisticsEngine;
use crate::stats::reduce::truncate;

// ---------------------------------------------------------------------------
// Dataset header
// ---------------------------------------------------------------------------

/// Shape and dimensionality lines printed before the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSummary {
    pub shape: (usize, usize, usize),
    pub ndim: usize,
}

impl DatasetSummary {
    pub fn of(dataset: &EnrollmentDataset) -> Self {
        DatasetSummary {
            shape: dataset.shape(),
            ndim: dataset.ndim(),
        }
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (years, schools, grades) = self.shape;
        writeln!(f, "Shape of full data array: ({years}, {schools}, {grades})")?;
        writeln!(f, "Dimensions of full data array: {}", self.ndim)
    }
}

// ---------------------------------------------------------------------------
// Requested school
// ---------------------------------------------------------------------------

/// Figures for one resolved school, truncated for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SchoolReport {
    pub name: String,
    pub code: String,
    pub grade_means: Vec<(Grade, i64)>,
    pub max_single_grade: i64,
    pub min_single_grade: i64,
    pub yearly_totals: Vec<(i32, i64)>,
    pub total: i64,
    pub mean_total: i64,
    pub num_years: usize,
    pub threshold: f64,
    /// `None` when no cell exceeds `threshold`.
    pub median_above_threshold: Option<i64>,
}

impl SchoolReport {
    pub fn build(
        engine: &StatisticsEngine<'_>,
        school: &ResolvedSchool,
        config: &ReportConfig,
    ) -> Result<Self, StatsError> {
        let i = school.index;

        let grade_means = Grade::ALL
            .into_iter()
            .map(|g| -> Result<(Grade, i64), StatsError> {
                Ok((g, truncate(engine.mean_by_grade(i, g)?)))
            })
            .collect::<Result<Vec<_>, StatsError>>()?;

        let yearly_totals = engine
            .totals_by_year(i)?
            .into_iter()
            .map(|(year, total)| (year, truncate(total)))
            .collect();

        Ok(SchoolReport {
            name: school.name.clone(),
            code: school.code.clone(),
            grade_means,
            max_single_grade: truncate(engine.max_single_grade(i)?),
            min_single_grade: truncate(engine.min_single_grade(i)?),
            yearly_totals,
            total: truncate(engine.total_ten_year(i)?),
            mean_total: truncate(engine.mean_total_over_years(i)?),
            num_years: engine.dataset().num_years(),
            threshold: config.threshold,
            median_above_threshold: engine
                .median_above_threshold(i, config.threshold)?
                .map(truncate),
        })
    }
}

impl fmt::Display for SchoolReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n***Requested School Statistics***\n")?;
        writeln!(f, "School Name: {}, School Code: {}", self.name, self.code)?;

        for (grade, mean) in &self.grade_means {
            writeln!(f, "Mean enrollment for {grade}: {mean}")?;
        }
        writeln!(f, "Highest enrollment for a single grade: {}", self.max_single_grade)?;
        writeln!(f, "Lowest enrollment for a single grade: {}", self.min_single_grade)?;

        for (year, total) in &self.yearly_totals {
            writeln!(f, "Total enrollment for {year} : {total}")?;
        }
        writeln!(f, "Total ten year enrollment: {}", self.total)?;
        writeln!(
            f,
            "Mean total enrollment over {} years: {}",
            self.num_years, self.mean_total
        )?;

        match self.median_above_threshold {
            Some(median) => writeln!(
                f,
                "For all enrollments over {}, the median value was: {median}",
                self.threshold
            ),
            None => writeln!(f, "No enrollments over {}.", self.threshold),
        }
    }
}

// ---------------------------------------------------------------------------
// All schools
// ---------------------------------------------------------------------------

/// Dataset-wide figures, truncated for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralReport {
    pub year_means: Vec<(i32, i64)>,
    pub graduating_year: i32,
    pub graduating_total: i64,
    pub max_single_grade: i64,
    pub min_single_grade: i64,
}

impl GeneralReport {
    pub fn build(engine: &StatisticsEngine<'_>, config: &ReportConfig) -> Result<Self, StatsError> {
        let dataset = engine.dataset();

        let year_means = config
            .mean_years_for(dataset.first_year(), dataset.last_year())
            .into_iter()
            .map(|year| -> Result<(i32, i64), StatsError> {
                let offset = engine.year_offset(year)?;
                Ok((year, truncate(engine.mean_for_year(offset)?)))
            })
            .collect::<Result<Vec<_>, StatsError>>()?;

        let graduating_year = config.graduating_year_for(dataset.last_year());
        let graduating_total =
            engine.total_graduating_class_for_year(engine.year_offset(graduating_year)?)?;

        Ok(GeneralReport {
            year_means,
            graduating_year,
            graduating_total: truncate(graduating_total),
            max_single_grade: truncate(engine.global_max()?),
            min_single_grade: truncate(engine.global_min()?),
        })
    }
}

impl fmt::Display for GeneralReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n***General Statistics for All Schools***\n")?;
        for (year, mean) in &self.year_means {
            writeln!(f, "Mean enrollment in {year}: {mean}")?;
        }
        writeln!(
            f,
            "Total graduating class of {}: {}",
            self.graduating_year, self.graduating_total
        )?;
        writeln!(f, "Highest enrollment for a single grade: {}", self.max_single_grade)?;
        writeln!(f, "Lowest enrollment for a single grade: {} \n", self.min_single_grade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn dataset() -> EnrollmentDataset {
        // Ten years, one school: grades 100/200/300 every year.
        let values = Array3::from_shape_fn((10, 1, 3), |(_, _, g)| 100.0 * (g as f64 + 1.0));
        EnrollmentDataset::new(values, 2013).unwrap()
    }

    fn school() -> ResolvedSchool {
        ResolvedSchool {
            name: "Test High".into(),
            code: "1234".into(),
            index: 0,
        }
    }

    #[test]
    fn test_summary_lines() {
        let text = DatasetSummary::of(&dataset()).to_string();
        assert_eq!(
            text,
            "Shape of full data array: (10, 1, 3)\nDimensions of full data array: 3\n"
        );
    }

    #[test]
    fn test_school_report_without_qualifying_entries() {
        let ds = dataset();
        let engine = StatisticsEngine::new(&ds);
        let report = SchoolReport::build(&engine, &school(), &ReportConfig::default()).unwrap();

        assert_eq!(report.total, 6000);
        assert_eq!(report.mean_total, 600);
        assert_eq!(report.median_above_threshold, None);

        let text = report.to_string();
        assert!(text.starts_with("\n***Requested School Statistics***\n\nSchool Name: Test High, School Code: 1234\n"));
        assert!(text.contains("Mean enrollment for Grade 11: 200\n"));
        assert!(text.contains("Total enrollment for 2013 : 600\n"));
        assert!(text.contains("Total enrollment for 2022 : 600\n"));
        assert!(text.contains("Mean total enrollment over 10 years: 600\n"));
        assert!(text.ends_with("No enrollments over 500.\n"));
    }

    #[test]
    fn test_school_report_with_lower_threshold() {
        let ds = dataset();
        let engine = StatisticsEngine::new(&ds);
        let config = ReportConfig {
            threshold: 150.0,
            ..ReportConfig::default()
        };
        let report = SchoolReport::build(&engine, &school(), &config).unwrap();
        // Ten 200s and ten 300s.
        assert_eq!(report.median_above_threshold, Some(250));
        assert!(report
            .to_string()
            .ends_with("For all enrollments over 150, the median value was: 250\n"));
    }

    #[test]
    fn test_general_report() {
        let ds = dataset();
        let engine = StatisticsEngine::new(&ds);
        let report = GeneralReport::build(&engine, &ReportConfig::default()).unwrap();
        assert_eq!(report.year_means, vec![(2013, 200), (2022, 200)]);
        assert_eq!(report.graduating_total, 300);

        let text = report.to_string();
        assert!(text.contains("Mean enrollment in 2022: 200\n"));
        assert!(text.contains("Total graduating class of 2022: 300\n"));
        assert!(text.ends_with("Lowest enrollment for a single grade: 100 \n\n"));
    }

    #[test]
    fn test_general_report_rejects_year_outside_span() {
        let ds = dataset();
        let engine = StatisticsEngine::new(&ds);
        let config = ReportConfig {
            graduating_year: Some(2030),
            ..ReportConfig::default()
        };
        assert!(matches!(
            GeneralReport::build(&engine, &config),
            Err(StatsError::YearOutOfRange { year: 2030, .. })
        ));
    }
}
