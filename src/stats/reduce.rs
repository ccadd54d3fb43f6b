//! Missing-value-aware reductions.
//!
//! `NaN` marks a missing cell. Every reduction here skips such cells instead
//! of treating them as zero, and every one but [`nan_sum`] fails with
//! [`StatsError::EmptyReduction`] when nothing is left.

use crate::error::StatsError;

/// Sum of non-missing values. An all-missing input sums to `0.0`.
pub fn nan_sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().filter(|v| !v.is_nan()).sum()
}

/// Arithmetic mean of non-missing values.
pub fn nan_mean<I>(values: I) -> Result<f64, StatsError>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        return Err(StatsError::EmptyReduction("mean"));
    }
    Ok(sum / count as f64)
}

pub fn nan_max<I>(values: I) -> Result<f64, StatsError>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .reduce(f64::max)
        .ok_or(StatsError::EmptyReduction("max"))
}

pub fn nan_min<I>(values: I) -> Result<f64, StatsError>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .reduce(f64::min)
        .ok_or(StatsError::EmptyReduction("min"))
}

/// Median of non-missing values; the mean of the two middle values when the
/// count is even.
pub fn nan_median<I>(values: I) -> Result<f64, StatsError>
where
    I: IntoIterator<Item = f64>,
{
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return Err(StatsError::EmptyReduction("median"));
    }
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// Truncate toward zero for display.
pub fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}
