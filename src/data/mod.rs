/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchTable (once, at startup)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ LaunchTable  │  Vec<LaunchRecord>, sites, payload bounds
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site / payload predicates → TableView (row indices)
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;

pub use loader::{load_file, LoadError};
pub use model::{
    Controls, LaunchRecord, LaunchTable, OutcomeClass, PayloadBounds, PayloadRange, SiteSelection,
    TableView, ALL_SITES,
};
