//! Outlier-resistant averaging of benchmark samples.

use crate::error::ProcessingError;

/// Fewest samples that still leave one value after dropping both extremes.
pub const MIN_SAMPLES: usize = 3;

/// Mean of `samples` after discarding the lowest and the highest value.
///
/// Exactly one element is dropped at each end of the sorted order, even if
/// the extreme value occurs more than once. Sorting uses [`f64::total_cmp`],
/// so NaN samples sort to the top and are dropped first.
///
/// `column` is only used to label the error.
///
/// # Examples
///
/// ```
/// use cpu_rank::stats::trimmed_mean;
///
/// let avg = trimmed_mean(&[70.0, 50.0, 60.0], "single").unwrap();
/// assert_eq!(avg, 60.0);
/// ```
pub fn trimmed_mean(samples: &[f64], column: &'static str) -> Result<f64, ProcessingError> {
    if samples.len() < MIN_SAMPLES {
        return Err(ProcessingError::InsufficientSamples {
            column,
            got: samples.len(),
            need: MIN_SAMPLES,
        });
    }

    let mut sorted = samples.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);

    let kept = &sorted[1..sorted.len() - 1];
    Ok(kept.iter().sum::<f64>() / kept.len() as f64)
}
