/// Data layer: core types, loading, and the dataset store.
///
/// Architecture:
/// ```text
///  real.csv / ctgan_synthetic.parquet / ... .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → TrafficTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ DatasetStore  │  4 labelled tables + Capabilities (schema)
///   └──────────────┘
///        │
///        ▼
///   engine / game  (borrow the store, never mutate it)
/// ```

pub mod loader;
pub mod model;
pub mod schema;
pub mod store;
