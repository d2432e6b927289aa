/// Data layer: core types, loading, and metadata extraction.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → BenchmarkTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │BenchmarkTable│  raw `single` / `multi` cells
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ extract   │  metadata tail → MetadataBlock, leading rows → samples
///   └──────────┘
/// ```

pub mod extract;
pub mod loader;
pub mod model;
