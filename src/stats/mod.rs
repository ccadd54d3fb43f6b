/// Statistics layer.
///
/// * `reduce` – reductions over `f64` iterators that skip missing (`NaN`) cells
/// * `engine` – per-school and dataset-wide rollups built on those reductions

pub mod engine;
pub mod reduce;

pub use engine::{StatisticsEngine, YearOffset};
