//! Batch driver: load every table, score it, rank the survivors.
//!
//! Each table is processed on its own; a failure is recorded as a
//! [`Skipped`] entry and never touches any other table's result.

use std::path::{Path, PathBuf};

use anyhow::Context;
use log::{debug, warn};
use rayon::prelude::*;

use crate::data::extract::{extract, numeric_column};
use crate::data::loader::{self, MULTI_COLUMN, SINGLE_COLUMN};
use crate::data::model::{BenchmarkTable, RankedProcessor, ScoredProcessor};
use crate::error::{PipelineError, ProcessingError};
use crate::rank::rank;
use crate::score::ScoreWeights;
use crate::stats::trimmed_mean;

/// A table that did not make it into the ranking, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct Skipped {
    /// Processor label, or the file path when the file could not be loaded.
    pub source: String,
    pub error: ProcessingError,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Ranked processors, best first.
    pub rankings: Vec<RankedProcessor>,
    /// Tables excluded from the ranking, in input order.
    pub skipped: Vec<Skipped>,
}

/// Extract, average and score a single table.
pub fn process_table(
    table: &BenchmarkTable,
    weights: &ScoreWeights,
) -> Result<ScoredProcessor, ProcessingError> {
    let extracted = extract(table)?;

    let single = numeric_column(&extracted.single, SINGLE_COLUMN)?;
    let multi = numeric_column(&extracted.multi, MULTI_COLUMN)?;

    let single_avg = trimmed_mean(&single, SINGLE_COLUMN)?;
    let multi_avg = trimmed_mean(&multi, MULTI_COLUMN)?;

    let md = extracted.metadata;
    let combined_score = weights.combined_score(single_avg, multi_avg, md.tdp, md.l3_cache);

    Ok(ScoredProcessor {
        name: table.name.clone(),
        metadata: md,
        single_avg,
        multi_avg,
        combined_score,
    })
}

/// Load each file, keeping load failures as [`Skipped`] entries.
///
/// The result is in the same order as `paths`.
pub fn load_tables(paths: &[PathBuf]) -> Vec<Result<BenchmarkTable, Skipped>> {
    paths
        .par_iter()
        .map(|path| {
            debug!("Loading {}", path.display());
            loader::load_file(path).map_err(|e| Skipped {
                source: path.display().to_string(),
                error: ProcessingError::Load(format!("{e:#}")),
            })
        })
        .collect()
}

/// Score every loaded table and rank the ones that succeed.
///
/// Fails with [`PipelineError::EmptyResult`] when nothing could be scored.
pub fn run(
    tables: Vec<Result<BenchmarkTable, Skipped>>,
    weights: &ScoreWeights,
) -> Result<RunReport, PipelineError> {
    let outcomes: Vec<Result<ScoredProcessor, Skipped>> = tables
        .into_par_iter()
        .map(|table| {
            let table = table?;
            process_table(&table, weights).map_err(|error| Skipped {
                source: table.name.clone(),
                error,
            })
        })
        .collect();

    let mut scored = Vec::with_capacity(outcomes.len());
    let mut skipped = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(sp) => {
                debug!(
                    "{}: single={:.2} multi={:.2} score={:.2}",
                    sp.name, sp.single_avg, sp.multi_avg, sp.combined_score
                );
                scored.push(sp);
            }
            Err(skip) => {
                warn!("Skipping {}: {} ({})", skip.source, skip.error, skip.error.kind());
                skipped.push(skip);
            }
        }
    }

    if scored.is_empty() {
        return Err(PipelineError::EmptyResult {
            skipped: skipped.len(),
        });
    }

    Ok(RunReport {
        rankings: rank(scored),
        skipped,
    })
}

/// List, load, score and rank every table in `dir`.
pub fn rank_directory(dir: &Path, weights: &ScoreWeights) -> anyhow::Result<RunReport> {
    let paths = loader::list_table_files(dir)?;
    debug!("Found {} table file(s) in {}", paths.len(), dir.display());
    for name in loader::duplicate_processor_names(&paths) {
        warn!("Several files in {} are named '{name}'; their rows will share that name", dir.display());
    }
    let tables = load_tables(&paths);
    run(tables, weights).with_context(|| format!("ranking tables in {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Cell;

    fn scenario_a() -> BenchmarkTable {
        BenchmarkTable::from_numbers(
            "scenario-a",
            &[50.0, 60.0, 70.0, 0.0, 0.0, 0.0, 4.0, 4.0, 60.0],
            &[40.0, 55.0, 65.0, 0.0, 0.0, 0.0, 8.0, 8.0, 2021.0],
        )
    }

    #[test]
    fn scenario_a_scores() {
        let sp = process_table(&scenario_a(), &ScoreWeights::default()).unwrap();
        assert_eq!(sp.single_avg, 60.0);
        assert_eq!(sp.multi_avg, 55.0);
        assert_eq!(sp.metadata.tdp, 60.0);
        assert_eq!(sp.metadata.l3_cache, 8.0);
        assert_eq!(sp.metadata.release_year, 2021.0);
        assert!((sp.combined_score - -10.66).abs() < 1e-9);
    }

    #[test]
    fn two_samples_is_insufficient() {
        let t = BenchmarkTable::from_numbers(
            "short",
            &[50.0, 60.0, 0.0, 0.0, 0.0, 4.0, 4.0, 60.0],
            &[40.0, 55.0, 0.0, 0.0, 0.0, 8.0, 8.0, 2021.0],
        );
        let err = process_table(&t, &ScoreWeights::default()).unwrap_err();
        assert!(matches!(err, ProcessingError::InsufficientSamples { got: 2, .. }));
    }

    #[test]
    fn bad_sample_is_numeric_error() {
        let mut t = scenario_a();
        if let Some(multi) = t.multi.as_mut() {
            multi[0] = Cell::Null;
        }
        let err = process_table(&t, &ScoreWeights::default()).unwrap_err();
        assert!(matches!(err, ProcessingError::Numeric { column: "multi", row: 0, .. }));
    }

    #[test]
    fn nan_text_sample_is_numeric_error() {
        let cells = |v: &[&str]| Some(v.iter().map(|s| Cell::parse(s)).collect::<Vec<_>>());
        let t = BenchmarkTable {
            name: "pandas-nan".into(),
            single: cells(&["50", "60", "70", "NaN", "", "", "", "4", "4", "60"]),
            multi: cells(&["40", "55", "65", "60", "", "", "", "8", "8", "2021"]),
        };
        let err = process_table(&t, &ScoreWeights::default()).unwrap_err();
        assert_eq!(
            err,
            ProcessingError::Numeric {
                column: "single",
                row: 3,
                value: "NaN".into()
            }
        );
    }

    #[test]
    fn failures_are_isolated() {
        let short = BenchmarkTable::from_numbers("short", &[1.0; 8], &[1.0; 8]);
        let load_failure = Skipped {
            source: "broken.csv".into(),
            error: ProcessingError::Load("bad header".into()),
        };
        let report = run(
            vec![Ok(short), Err(load_failure.clone()), Ok(scenario_a())],
            &ScoreWeights::default(),
        )
        .unwrap();

        assert_eq!(report.rankings.len(), 1);
        assert_eq!(report.rankings[0].processor, "scenario-a");
        assert_eq!(report.rankings[0].rank, 1);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].source, "short");
        assert_eq!(report.skipped[1], load_failure);
    }

    #[test]
    fn nothing_to_rank() {
        let err = run(Vec::new(), &ScoreWeights::default()).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyResult { skipped: 0 }));

        let bad = BenchmarkTable::from_numbers("bad", &[1.0; 5], &[1.0; 5]);
        let err = run(vec![Ok(bad)], &ScoreWeights::default()).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyResult { skipped: 1 }));
    }

    #[test]
    fn custom_weights_change_order() {
        // "hot" is faster but draws far more power.
        let hot = BenchmarkTable::from_numbers(
            "hot",
            &[200.0, 200.0, 200.0, 0.0, 0.0, 0.0, 1.0, 8.0, 250.0],
            &[200.0, 200.0, 200.0, 0.0, 0.0, 0.0, 8.0, 16.0, 2022.0],
        );
        let cool = BenchmarkTable::from_numbers(
            "cool",
            &[150.0, 150.0, 150.0, 0.0, 0.0, 0.0, 1.0, 8.0, 35.0],
            &[150.0, 150.0, 150.0, 0.0, 0.0, 0.0, 8.0, 16.0, 2022.0],
        );

        let no_penalty = ScoreWeights {
            tdp_penalty_factor: 0.0,
            ..ScoreWeights::default()
        };
        let report = run(vec![Ok(hot.clone()), Ok(cool.clone())], &no_penalty).unwrap();
        assert_eq!(report.rankings[0].processor, "hot");

        let report = run(vec![Ok(hot), Ok(cool)], &ScoreWeights::default()).unwrap();
        assert_eq!(report.rankings[0].processor, "cool");
    }
}
