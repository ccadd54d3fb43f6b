use thiserror::Error;

// ---------------------------------------------------------------------------
// Resolver errors
// ---------------------------------------------------------------------------

/// The only user-facing failure: input is neither a known name nor a code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("'{0}' is not a valid school name or code")]
    InvalidIdentifier(String),
}

// ---------------------------------------------------------------------------
// Statistics errors
// ---------------------------------------------------------------------------

/// Contract violations raised by the statistics engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("school index {index} out of range (dataset has {schools} schools)")]
    IndexOutOfRange { index: usize, schools: usize },

    #[error("year {year} outside dataset span {first}..={last}")]
    YearOutOfRange { year: i64, first: i32, last: i32 },

    /// Every value in the reduced slice was missing.
    #[error("cannot compute {0} of an empty or all-missing slice")]
    EmptyReduction(&'static str),
}

// ---------------------------------------------------------------------------
// Data model errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("duplicate school name: {0}")]
    DuplicateName(String),

    #[error("duplicate school code: {0}")]
    DuplicateCode(String),

    #[error("school code '{0}' is not a 4-digit number")]
    InvalidCode(String),

    #[error("dataset shape mismatch: {0}")]
    Shape(String),
}
