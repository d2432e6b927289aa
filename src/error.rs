//! Error types for the ranking pipeline.
//!
//! Per-table failures are [`ProcessingError`]s: the driver records them and
//! moves on to the next table. A [`PipelineError`] ends the run.

use thiserror::Error;

/// Why a single benchmark table was skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessingError {
    /// Columns missing, of different length, or too short for the metadata tail.
    #[error("schema error: {0}")]
    Schema(String),

    /// Not enough samples left to drop the extremes and still average something.
    #[error("insufficient samples in '{column}': got {got}, need at least {need}")]
    InsufficientSamples {
        column: &'static str,
        got: usize,
        need: usize,
    },

    /// A cell that must be a number is not.
    #[error("non-numeric value {value:?} in '{column}' at row {row}")]
    Numeric {
        column: &'static str,
        row: usize,
        value: String,
    },

    /// The source could not be read or parsed at all.
    #[error("failed to load table: {0}")]
    Load(String),
}

impl ProcessingError {
    /// Short kind label used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProcessingError::Schema(_) => "SchemaError",
            ProcessingError::InsufficientSamples { .. } => "InsufficientSamplesError",
            ProcessingError::Numeric { .. } => "NumericError",
            ProcessingError::Load(_) => "LoadError",
        }
    }
}

/// Run-level failures.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Every table was skipped (or there were none to begin with).
    #[error("no valid results to rank ({skipped} table(s) skipped)")]
    EmptyResult { skipped: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_labels() {
        assert_eq!(ProcessingError::Schema("x".into()).kind(), "SchemaError");
        assert_eq!(
            ProcessingError::InsufficientSamples {
                column: "single",
                got: 2,
                need: 3
            }
            .kind(),
            "InsufficientSamplesError"
        );
        assert_eq!(ProcessingError::Load("x".into()).kind(), "LoadError");
    }

    #[test]
    fn numeric_message_names_cell() {
        let err = ProcessingError::Numeric {
            column: "multi",
            row: 4,
            value: "n/a".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("multi"));
        assert!(msg.contains("row 4"));
        assert!(msg.contains("\"n/a\""));
    }

    #[test]
    fn empty_result_message() {
        let err = PipelineError::EmptyResult { skipped: 3 };
        assert_eq!(err.to_string(), "no valid results to rank (3 table(s) skipped)");
    }
}
