//! Combined ranking score.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Coefficients of the combined score.
///
/// Any field missing from a weights file keeps its default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreWeights {
    pub weight_single: f64,
    pub weight_multi: f64,
    pub tdp_penalty_factor: f64,
    pub l3_cache_bonus_factor: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            weight_single: 0.66,
            weight_multi: 0.34,
            tdp_penalty_factor: 1.24,
            l3_cache_bonus_factor: 0.68,
        }
    }
}

impl ScoreWeights {
    /// Load weights from a JSON file such as `{ "tdp_penalty_factor": 2.0 }`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading weights file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing weights file {}", path.display()))
    }

    /// Parse weights from a JSON string.
    pub fn from_json(s: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Weighted performance minus the TDP penalty plus the L3 cache bonus.
    ///
    /// Non-finite inputs are not guarded against and propagate to the result.
    pub fn combined_score(&self, single_avg: f64, multi_avg: f64, tdp: f64, l3_cache: f64) -> f64 {
        self.weight_single * single_avg + self.weight_multi * multi_avg
            - self.tdp_penalty_factor * tdp
            + self.l3_cache_bonus_factor * l3_cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_formula() {
        let w = ScoreWeights::default();
        let score = w.combined_score(60.0, 55.0, 60.0, 8.0);
        assert!((score - -10.66).abs() < 1e-9, "score = {score}");
    }

    #[test]
    fn each_term_moves_score_the_right_way() {
        let w = ScoreWeights::default();
        let base = w.combined_score(100.0, 100.0, 50.0, 16.0);
        assert!(w.combined_score(101.0, 100.0, 50.0, 16.0) > base);
        assert!(w.combined_score(100.0, 101.0, 50.0, 16.0) > base);
        assert!(w.combined_score(100.0, 100.0, 51.0, 16.0) < base);
        assert!(w.combined_score(100.0, 100.0, 50.0, 17.0) > base);
    }

    #[test]
    fn nan_propagates() {
        let w = ScoreWeights::default();
        assert!(w.combined_score(f64::NAN, 1.0, 1.0, 1.0).is_nan());
        assert_eq!(w.combined_score(1.0, 1.0, f64::NEG_INFINITY, 1.0), f64::INFINITY);
    }

    #[test]
    fn partial_weights_file_keeps_defaults() {
        let w = ScoreWeights::from_json(r#"{ "tdp_penalty_factor": 2.0 }"#).unwrap();
        assert_eq!(w.tdp_penalty_factor, 2.0);
        assert_eq!(w.weight_single, 0.66);
        assert_eq!(w.l3_cache_bonus_factor, 0.68);
    }

    #[test]
    fn unknown_weight_is_rejected() {
        assert!(ScoreWeights::from_json(r#"{ "weight_gpu": 1.0 }"#).is_err());
    }

    #[test]
    fn weights_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weights.json");
        std::fs::write(&path, r#"{ "weight_single": 0.5, "weight_multi": 0.5 }"#).unwrap();
        let w = ScoreWeights::from_file(&path).unwrap();
        assert_eq!(w.weight_single, 0.5);
        assert_eq!(w.weight_multi, 0.5);
        assert!(ScoreWeights::from_file(dir.path().join("missing.json")).is_err());
    }

    proptest! {
        #[test]
        fn deterministic(
            s in -1.0e6f64..1.0e6,
            m in -1.0e6f64..1.0e6,
            tdp in 0.0f64..500.0,
            l3 in 0.0f64..512.0,
        ) {
            let w = ScoreWeights::default();
            prop_assert_eq!(
                w.combined_score(s, m, tdp, l3).to_bits(),
                w.combined_score(s, m, tdp, l3).to_bits()
            );
        }
    }
}
