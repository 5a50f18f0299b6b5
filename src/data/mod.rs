/// Data layer: schema, loading, cleaning, filtering and aggregation.
///
/// Architecture:
/// ```text
///  payroll export (.csv, Latin-1)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode + skip preamble + resolve schema → Vec<RawRow>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  forward-fill teacher columns, drop blank rows,
///   └───────────┘  full name, hours → f64
///        │
///        ▼
///   ┌──────────┐
///   │ Workload  │  immutable snapshot, shared through `cache`
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  query + shift selection → visible row indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  group by teacher id → Vec<TeacherSummary>
///   └───────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod schema;
