/// Data layer: core types, loading, and school lookup.
///
/// Architecture:
/// ```text
///  schools.json        enrollment.csv
///        │                   │
///        ▼                   ▼
///   ┌─────────────────────────────┐
///   │  loader                      │  parse → SchoolDirectory, EnrollmentDataset
///   └─────────────────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ resolver │  name or code → ResolvedSchool { name, code, index }
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod resolver;
