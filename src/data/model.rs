use std::collections::BTreeSet;
use std::fmt;

use ndarray::{Array3, ArrayView1, ArrayView2, Axis};
use serde::Deserialize;

use crate::error::DataError;

/// Number of grades recorded per school (10, 11, 12).
pub const GRADE_COUNT: usize = 3;

// ---------------------------------------------------------------------------
// Grade – the third dataset axis
// ---------------------------------------------------------------------------

/// A high-school grade. The discriminant order matches the dataset's third axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    Ten,
    Eleven,
    Twelve,
}

impl Grade {
    pub const ALL: [Grade; GRADE_COUNT] = [Grade::Ten, Grade::Eleven, Grade::Twelve];

    /// Position on the dataset's grade axis.
    pub fn index(self) -> usize {
        match self {
            Grade::Ten => 0,
            Grade::Eleven => 1,
            Grade::Twelve => 2,
        }
    }

    /// The grade number as printed (10, 11, 12).
    pub fn number(self) -> u8 {
        10 + self.index() as u8
    }

    pub fn from_number(number: u8) -> Option<Grade> {
        match number {
            10 => Some(Grade::Ten),
            11 => Some(Grade::Eleven),
            12 => Some(Grade::Twelve),
            _ => None,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grade {}", self.number())
    }
}

// ---------------------------------------------------------------------------
// School / SchoolDirectory
// ---------------------------------------------------------------------------

/// One directory entry as stored in `data/schools.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct School {
    pub name: String,
    pub code: String,
}

impl School {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        School {
            name: name.into(),
            code: code.into(),
        }
    }
}

/// Ordered name → code table. Entry order is the school axis of the dataset.
#[derive(Debug, Clone)]
pub struct SchoolDirectory {
    entries: Vec<School>,
}

impl SchoolDirectory {
    /// Validate and wrap the entries.
    ///
    /// Names and codes must each be unique, and every code must be a
    /// 4-digit numeric string.
    pub fn new(entries: Vec<School>) -> Result<Self, DataError> {
        let mut names = BTreeSet::new();
        let mut codes = BTreeSet::new();

        for school in &entries {
            if school.code.len() != 4 || !school.code.bytes().all(|b| b.is_ascii_digit()) {
                return Err(DataError::InvalidCode(school.code.clone()));
            }
            if !names.insert(school.name.as_str()) {
                return Err(DataError::DuplicateName(school.name.clone()));
            }
            if !codes.insert(school.code.as_str()) {
                return Err(DataError::DuplicateCode(school.code.clone()));
            }
        }

        Ok(SchoolDirectory { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, School> {
        self.entries.iter()
    }

    /// Entry at a school index.
    pub fn get(&self, index: usize) -> Option<&School> {
        self.entries.get(index)
    }

    /// Code for an exact school name.
    pub fn code_for_name(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.code.as_str())
    }

    /// Name for an exact school code (first match in directory order).
    pub fn name_for_code(&self, code: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|s| s.code == code)
            .map(|s| s.name.as_str())
    }

    /// Position of `code` among all codes, i.e. the school index.
    pub fn index_of_code(&self, code: &str) -> Option<usize> {
        self.entries.iter().position(|s| s.code == code)
    }
}

// ---------------------------------------------------------------------------
// EnrollmentDataset – year × school × grade
// ---------------------------------------------------------------------------

/// Immutable enrollment counts. `NaN` marks a missing cell.
#[derive(Debug, Clone)]
pub struct EnrollmentDataset {
    values: Array3<f64>,
    /// Calendar year of offset 0 on the year axis.
    first_year: i32,
}

impl EnrollmentDataset {
    pub fn new(values: Array3<f64>, first_year: i32) -> Result<Self, DataError> {
        let (years, schools, grades) = values.dim();
        if years == 0 || schools == 0 {
            return Err(DataError::Shape(format!(
                "expected at least one year and one school, got ({years}, {schools}, {grades})"
            )));
        }
        if grades != GRADE_COUNT {
            return Err(DataError::Shape(format!(
                "expected {GRADE_COUNT} grades, got {grades}"
            )));
        }
        Ok(EnrollmentDataset { values, first_year })
    }

    pub fn values(&self) -> &Array3<f64> {
        &self.values
    }

    /// `(years, schools, grades)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        self.values.dim()
    }

    pub fn ndim(&self) -> usize {
        self.values.ndim()
    }

    pub fn num_years(&self) -> usize {
        self.values.len_of(Axis(0))
    }

    pub fn num_schools(&self) -> usize {
        self.values.len_of(Axis(1))
    }

    pub fn first_year(&self) -> i32 {
        self.first_year
    }

    pub fn last_year(&self) -> i32 {
        self.first_year + self.num_years() as i32 - 1
    }

    /// Calendar years in axis order.
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.first_year..=self.last_year()
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }

    /// `data[:, school, :]` – the (years × grades) slice for one school.
    pub(crate) fn school_slice(&self, school: usize) -> ArrayView2<'_, f64> {
        self.values.index_axis(Axis(1), school)
    }

    /// `data[year, :, :]` – the (schools × grades) slice for one year.
    pub(crate) fn year_slice(&self, year: usize) -> ArrayView2<'_, f64> {
        self.values.index_axis(Axis(0), year)
    }

    /// `data[:, school, grade]`.
    pub(crate) fn grade_series(&self, school: usize, grade: Grade) -> ArrayView1<'_, f64> {
        self.school_slice(school).index_axis_move(Axis(1), grade.index())
    }
}
