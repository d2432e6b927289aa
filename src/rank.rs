//! Ordering processors by combined score.

use std::cmp::Ordering;

use crate::data::model::{RankedProcessor, ScoredProcessor};

/// Sort by descending combined score and number the result from 1.
///
/// The sort is stable, so processors with equal scores keep their input
/// order and still receive distinct, consecutive ranks. NaN scores sort
/// after every other score.
pub fn rank(mut scored: Vec<ScoredProcessor>) -> Vec<RankedProcessor> {
    scored.sort_by(|a, b| descending(a.combined_score, b.combined_score));
    scored
        .into_iter()
        .enumerate()
        .map(|(i, sp)| RankedProcessor::new(sp, i + 1))
        .collect()
}

fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}
