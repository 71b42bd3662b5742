/// Data layer: core types, loading, aggregation and filtering.
///
/// Architecture:
/// ```text
///   .csv path / uploaded bytes
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → Dataset (or LoadError)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  header + Vec<JobRecord>
///   └──────────┘
///      │      │
///      ▼      ▼
///   ┌──────────┐  ┌──────────┐
///   │ aggregate│  │  filter   │  criteria → FilteredView → CSV export
///   └──────────┘  └──────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
