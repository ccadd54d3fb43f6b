use anyhow::{Context, Result, bail};
use ndarray::Array3;
use serde::Deserialize;

use super::model::{EnrollmentDataset, GRADE_COUNT, School, SchoolDirectory};

/// Directory table shipped with the binary.
const SCHOOLS_JSON: &str = include_str!("../../data/schools.json");

/// Enrollment counts shipped with the binary.
const ENROLLMENT_CSV: &str = include_str!("../../data/enrollment.csv");

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Build the directory and dataset from the embedded source files.
pub fn load_builtin() -> Result<(SchoolDirectory, EnrollmentDataset)> {
    let directory = load_directory_json(SCHOOLS_JSON).context("loading school directory")?;
    let dataset =
        load_enrollment_csv(ENROLLMENT_CSV, &directory).context("loading enrollment data")?;

    log::info!(
        "Loaded {} schools, dataset shape {:?} ({} missing cells)",
        directory.len(),
        dataset.shape(),
        dataset.missing_count()
    );
    Ok((directory, dataset))
}

// ---------------------------------------------------------------------------
// JSON directory
// ---------------------------------------------------------------------------

/// Expected JSON schema, in directory order:
///
/// ```json
/// [
///   { "name": "Centennial High School", "code": "1224" },
///   ...
/// ]
/// ```
pub fn load_directory_json(text: &str) -> Result<SchoolDirectory> {
    let entries: Vec<School> = serde_json::from_str(text).context("parsing JSON")?;
    if entries.is_empty() {
        bail!("School directory is empty");
    }
    Ok(SchoolDirectory::new(entries)?)
}

// ---------------------------------------------------------------------------
// CSV enrollment
// ---------------------------------------------------------------------------

/// One CSV row: a single school in a single year.
#[derive(Debug, Deserialize)]
struct EnrollmentRow {
    year: i32,
    school_code: String,
    grade_10: Option<f64>,
    grade_11: Option<f64>,
    grade_12: Option<f64>,
}

impl EnrollmentRow {
    fn grades(&self) -> [Option<f64>; GRADE_COUNT] {
        [self.grade_10, self.grade_11, self.grade_12]
    }
}

/// CSV layout: header `year,school_code,grade_10,grade_11,grade_12`.
///
/// Rows for one year are contiguous, years ascend by one, and within a year
/// schools appear in directory order. An empty grade cell is a missing value.
/// Each year therefore contributes `schools × 3` values, reshaped into the
/// school × grade plane of the dataset.
pub fn load_enrollment_csv(text: &str, directory: &SchoolDirectory) -> Result<EnrollmentDataset> {
    if directory.is_empty() {
        bail!("School directory is empty");
    }
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let schools = directory.len();

    let mut flat: Vec<f64> = Vec::new();
    let mut first_year: Option<i32> = None;

    for (row_no, result) in reader.deserialize::<EnrollmentRow>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let position = row_no % schools;
        let year_offset = (row_no / schools) as i32;
        let base_year = *first_year.get_or_insert(row.year);

        let expected_year = base_year + year_offset;
        if row.year != expected_year {
            bail!(
                "CSV row {row_no}: expected year {expected_year}, found {}",
                row.year
            );
        }

        // Position within the year is the school index.
        let expected = directory
            .get(position)
            .context("directory shorter than expected")?;
        if row.school_code != expected.code {
            bail!(
                "CSV row {row_no}: expected school code {} ({}), found {}",
                expected.code,
                expected.name,
                row.school_code
            );
        }

        for (g, cell) in row.grades().into_iter().enumerate() {
            let value = match cell {
                Some(v) if v.is_finite() && v >= 0.0 => v,
                Some(v) => bail!("CSV row {row_no}, grade_{}: invalid count {v}", 10 + g),
                None => f64::NAN,
            };
            flat.push(value);
        }
    }

    let first_year = first_year.context("CSV contains no rows")?;
    let per_year = schools * GRADE_COUNT;
    if flat.len() % per_year != 0 {
        bail!(
            "CSV ends mid-year: {} values is not a multiple of {per_year}",
            flat.len()
        );
    }
    let years = flat.len() / per_year;
    log::debug!("Parsed {years} years of {schools} schools starting {first_year}");

    let values = Array3::from_shape_vec((years, schools, GRADE_COUNT), flat)
        .context("reshaping enrollment values")?;
    Ok(EnrollmentDataset::new(values, first_year)?)
}
