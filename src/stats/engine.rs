use ndarray::{ArrayView2, Axis};

use crate::data::model::{EnrollmentDataset, Grade};
use crate::error::StatsError;

use super::reduce::{nan_max, nan_mean, nan_median, nan_min, nan_sum};

/// Zero-based position on the dataset's year axis.
pub type YearOffset = usize;

// ---------------------------------------------------------------------------
// StatisticsEngine
// ---------------------------------------------------------------------------

/// Reductions over an [`EnrollmentDataset`], per school or across all schools.
///
/// Missing cells are excluded from every reduction. Results are raw `f64`;
/// truncation for display happens in the report layer.
#[derive(Debug, Clone, Copy)]
pub struct StatisticsEngine<'a> {
    dataset: &'a EnrollmentDataset,
}

impl<'a> StatisticsEngine<'a> {
    pub fn new(dataset: &'a EnrollmentDataset) -> Self {
        StatisticsEngine { dataset }
    }

    pub fn dataset(&self) -> &'a EnrollmentDataset {
        self.dataset
    }

    /// Convert a calendar year to a year offset.
    pub fn year_offset(&self, calendar_year: i32) -> Result<YearOffset, StatsError> {
        let first = self.dataset.first_year();
        let last = self.dataset.last_year();
        if calendar_year < first || calendar_year > last {
            return Err(StatsError::YearOutOfRange {
                year: calendar_year as i64,
                first,
                last,
            });
        }
        Ok((calendar_year - first) as usize)
    }

    // -- Per-school --

    /// Mean of `data[:, school, grade]` over all years.
    pub fn mean_by_grade(&self, school: usize, grade: Grade) -> Result<f64, StatsError> {
        self.check_school(school)?;
        nan_mean(self.dataset.grade_series(school, grade).iter().copied())
    }

    /// Highest single-grade count across all years for one school.
    pub fn max_single_grade(&self, school: usize) -> Result<f64, StatsError> {
        nan_max(self.school(school)?.iter().copied())
    }

    /// Lowest single-grade count across all years for one school.
    pub fn min_single_grade(&self, school: usize) -> Result<f64, StatsError> {
        nan_min(self.school(school)?.iter().copied())
    }

    /// Sum over the three grades of one school in one year.
    pub fn total_for_year(&self, school: usize, year: YearOffset) -> Result<f64, StatsError> {
        let slice = self.school(school)?;
        self.check_year(year)?;
        Ok(nan_sum(slice.row(year).iter().copied()))
    }

    /// `(calendar year, total)` for every year in the dataset.
    pub fn totals_by_year(&self, school: usize) -> Result<Vec<(i32, f64)>, StatsError> {
        let slice = self.school(school)?;
        Ok(self
            .dataset
            .years()
            .zip(slice.axis_iter(Axis(0)))
            .map(|(year, row)| (year, nan_sum(row.iter().copied())))
            .collect())
    }

    /// Sum of every cell of one school.
    pub fn total_ten_year(&self, school: usize) -> Result<f64, StatsError> {
        Ok(nan_sum(self.school(school)?.iter().copied()))
    }

    /// The school's total divided by the number of years.
    ///
    /// The divisor is the year count even when cells are missing; this is
    /// not the missing-aware mean used elsewhere.
    pub fn mean_total_over_years(&self, school: usize) -> Result<f64, StatsError> {
        let total = self.total_ten_year(school)?;
        Ok(total / self.dataset.num_years() as f64)
    }

    /// Median of the school's cells strictly above `threshold`, or `None`
    /// when no cell qualifies.
    pub fn median_above_threshold(
        &self,
        school: usize,
        threshold: f64,
    ) -> Result<Option<f64>, StatsError> {
        let above: Vec<f64> = self
            .school(school)?
            .iter()
            .copied()
            .filter(|&v| v > threshold)
            .collect();

        if above.is_empty() {
            return Ok(None);
        }
        nan_median(above).map(Some)
    }

    // -- Aggregate --

    /// Mean over all schools and grades in one year.
    pub fn mean_for_year(&self, year: YearOffset) -> Result<f64, StatsError> {
        self.check_year(year)?;
        nan_mean(self.dataset.year_slice(year).iter().copied())
    }

    /// Sum of the grade-12 column across all schools in one year.
    pub fn total_graduating_class_for_year(&self, year: YearOffset) -> Result<f64, StatsError> {
        self.check_year(year)?;
        let column = self
            .dataset
            .year_slice(year)
            .index_axis_move(Axis(1), Grade::Twelve.index());
        Ok(nan_sum(column.iter().copied()))
    }

    pub fn global_max(&self) -> Result<f64, StatsError> {
        nan_max(self.dataset.values().iter().copied())
    }

    pub fn global_min(&self) -> Result<f64, StatsError> {
        nan_min(self.dataset.values().iter().copied())
    }

    // -- Bounds --

    fn school(&self, school: usize) -> Result<ArrayView2<'a, f64>, StatsError> {
        self.check_school(school)?;
        Ok(self.dataset.school_slice(school))
    }

    fn check_school(&self, school: usize) -> Result<(), StatsError> {
        let schools = self.dataset.num_schools();
        if school >= schools {
            return Err(StatsError::IndexOutOfRange {
                index: school,
                schools,
            });
        }
        Ok(())
    }

    fn check_year(&self, year: YearOffset) -> Result<(), StatsError> {
        if year >= self.dataset.num_years() {
            return Err(StatsError::YearOutOfRange {
                year: self.dataset.first_year() as i64 + year as i64,
                first: self.dataset.first_year(),
                last: self.dataset.last_year(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_builtin;
    use crate::stats::reduce::truncate;
    use ndarray::Array3;

    const NAN: f64 = f64::NAN;

    /// Two years, two schools. School 1 never exceeds 500.
    fn small_dataset() -> EnrollmentDataset {
        let values = Array3::from_shape_vec(
            (2, 2, 3),
            vec![
                // 2020
                600.0, 510.0, NAN, //
                100.0, 200.0, 300.0, //
                // 2021
                700.0, 520.0, 480.0, //
                150.0, NAN, 350.0,
            ],
        )
        .unwrap();
        EnrollmentDataset::new(values, 2020).unwrap()
    }

    #[test]
    fn test_mean_by_grade_skips_missing() {
        let ds = small_dataset();
        let engine = StatisticsEngine::new(&ds);
        assert_eq!(engine.mean_by_grade(0, Grade::Ten).unwrap(), 650.0);
        // Only the 2021 value is present.
        assert_eq!(engine.mean_by_grade(0, Grade::Twelve).unwrap(), 480.0);
        assert_eq!(engine.mean_by_grade(1, Grade::Eleven).unwrap(), 200.0);
    }

    #[test]
    fn test_extrema_and_totals() {
        let ds = small_dataset();
        let engine = StatisticsEngine::new(&ds);
        assert_eq!(engine.max_single_grade(0).unwrap(), 700.0);
        assert_eq!(engine.min_single_grade(1).unwrap(), 100.0);
        assert_eq!(engine.total_for_year(0, 0).unwrap(), 1110.0);
        assert_eq!(engine.total_for_year(1, 1).unwrap(), 500.0);
        assert_eq!(
            engine.totals_by_year(0).unwrap(),
            vec![(2020, 1110.0), (2021, 1700.0)]
        );
        assert_eq!(engine.total_ten_year(0).unwrap(), 2810.0);
        assert_eq!(engine.mean_total_over_years(0).unwrap(), 1405.0);
    }

    #[test]
    fn test_mean_total_divides_by_year_count() {
        let ds = small_dataset();
        let engine = StatisticsEngine::new(&ds);
        // School 1 has a missing cell; the divisor is still 2 years.
        assert_eq!(engine.total_ten_year(1).unwrap(), 1100.0);
        assert_eq!(engine.mean_total_over_years(1).unwrap(), 550.0);
    }

    #[test]
    fn test_median_above_threshold() {
        let ds = small_dataset();
        let engine = StatisticsEngine::new(&ds);
        // 600, 510, 700, 520 → (520 + 600) / 2
        assert_eq!(engine.median_above_threshold(0, 500.0).unwrap(), Some(560.0));
        assert_eq!(engine.median_above_threshold(1, 500.0).unwrap(), None);
        // Strictly greater: a cell equal to the threshold does not qualify.
        assert_eq!(engine.median_above_threshold(1, 350.0).unwrap(), None);
    }

    #[test]
    fn test_aggregates() {
        let ds = small_dataset();
        let engine = StatisticsEngine::new(&ds);
        assert_eq!(engine.mean_for_year(0).unwrap(), 1710.0 / 5.0);
        assert_eq!(engine.total_graduating_class_for_year(0).unwrap(), 300.0);
        assert_eq!(engine.total_graduating_class_for_year(1).unwrap(), 830.0);
        assert_eq!(engine.global_max().unwrap(), 700.0);
        assert_eq!(engine.global_min().unwrap(), 100.0);
    }

    #[test]
    fn test_bounds_are_checked() {
        let ds = small_dataset();
        let engine = StatisticsEngine::new(&ds);
        assert_eq!(
            engine.total_ten_year(2),
            Err(StatsError::IndexOutOfRange { index: 2, schools: 2 })
        );
        assert!(engine.mean_for_year(2).is_err());
        assert!(engine.total_for_year(0, 5).is_err());
        assert_eq!(engine.year_offset(2021).unwrap(), 1);
        assert!(engine.year_offset(2019).is_err());
        assert!(engine.year_offset(2022).is_err());
    }

    #[test]
    fn test_all_missing_slice_is_an_empty_reduction() {
        let values = Array3::from_elem((2, 1, 3), NAN);
        let ds = EnrollmentDataset::new(values, 2013).unwrap();
        let engine = StatisticsEngine::new(&ds);
        assert_eq!(
            engine.mean_by_grade(0, Grade::Ten),
            Err(StatsError::EmptyReduction("mean"))
        );
        assert!(engine.max_single_grade(0).is_err());
        assert_eq!(engine.total_ten_year(0).unwrap(), 0.0);
    }

    #[test]
    fn test_six_thousand_over_ten_years() {
        // 200 per grade → 600 per year → 6000 over ten years.
        let ds = EnrollmentDataset::new(Array3::from_elem((10, 1, 3), 200.0), 2013).unwrap();
        let engine = StatisticsEngine::new(&ds);
        assert_eq!(truncate(engine.total_ten_year(0).unwrap()), 6000);
        assert_eq!(truncate(engine.mean_total_over_years(0).unwrap()), 600);
        assert_eq!(engine.median_above_threshold(0, 500.0).unwrap(), None);
    }

    #[test]
    fn test_builtin_properties_hold_for_every_school() {
        let (dir, ds) = load_builtin().unwrap();
        let engine = StatisticsEngine::new(&ds);
        let global_max = engine.global_max().unwrap();
        let global_min = engine.global_min().unwrap();

        for i in 0..dir.len() {
            let total = engine.total_ten_year(i).unwrap();
            let by_year: f64 = (0..ds.num_years())
                .map(|y| engine.total_for_year(i, y).unwrap())
                .sum();
            assert_eq!(total, by_year);

            assert!(global_max >= engine.max_single_grade(i).unwrap());
            assert!(global_min <= engine.min_single_grade(i).unwrap());

            assert_eq!(
                truncate(engine.mean_total_over_years(i).unwrap()),
                truncate(total / 10.0)
            );

            let any_above = ds.school_slice(i).iter().any(|&v| v > 500.0);
            assert_eq!(
                engine.median_above_threshold(i, 500.0).unwrap().is_some(),
                any_above
            );
        }
    }
}
