//! Composite processor ranking from repeated benchmark runs.
//!
//! Each processor is described by one table with a `single` and a `multi`
//! column: repeated single-thread and multi-thread benchmark results followed
//! by six rows of fixed metadata (caches, core/thread counts, TDP, release
//! year). The pipeline strips the metadata, averages the samples without
//! their best and worst run, folds in TDP and L3 cache, and ranks the result.
//!
//! ```
//! use cpu_rank::data::model::BenchmarkTable;
//! use cpu_rank::pipeline::run;
//! use cpu_rank::score::ScoreWeights;
//!
//! let table = BenchmarkTable::from_numbers(
//!     "example",
//!     &[50.0, 60.0, 70.0, 0.0, 0.0, 0.0, 4.0, 4.0, 60.0],
//!     &[40.0, 55.0, 65.0, 0.0, 0.0, 0.0, 8.0, 8.0, 2021.0],
//! );
//! let report = run(vec![Ok(table)], &ScoreWeights::default()).unwrap();
//! assert_eq!(report.rankings[0].rank, 1);
//! assert_eq!(report.rankings[0].single, 60.0);
//! ```

pub mod data;
pub mod error;
pub mod pipeline;
pub mod rank;
pub mod report;
pub mod score;
pub mod stats;
