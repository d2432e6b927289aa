//! Positional metadata layout of a benchmark table.
//!
//! The last [`METADATA_ROWS`] rows of both columns hold processor attributes
//! instead of samples. Only the final three rows carry values:
//!
//! ```text
//!   row          single      multi
//!   len - 3      L2 cache    L3 cache
//!   len - 2      cores       threads
//!   len - 1      TDP         release year
//! ```

use crate::error::ProcessingError;

use super::model::{BenchmarkTable, Cell, MetadataBlock};

/// Number of trailing rows reserved for metadata.
pub const METADATA_ROWS: usize = 6;

const CACHE_OFFSET: usize = 3;
const COUNT_OFFSET: usize = 2;
const LAST_OFFSET: usize = 1;

/// A table split into its metadata and sample parts.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedTable {
    pub metadata: MetadataBlock,
    pub single: Vec<Cell>,
    pub multi: Vec<Cell>,
}

/// Split `table` into its metadata block and the leading sample rows.
pub fn extract(table: &BenchmarkTable) -> Result<ExtractedTable, ProcessingError> {
    let single = table
        .single
        .as_ref()
        .ok_or_else(|| ProcessingError::Schema("missing 'single' column".into()))?;
    let multi = table
        .multi
        .as_ref()
        .ok_or_else(|| ProcessingError::Schema("missing 'multi' column".into()))?;

    if single.len() != multi.len() {
        return Err(ProcessingError::Schema(format!(
            "'single' has {} rows but 'multi' has {}",
            single.len(),
            multi.len()
        )));
    }
    let len = single.len();
    if len < METADATA_ROWS {
        return Err(ProcessingError::Schema(format!(
            "{len} rows, need at least {METADATA_ROWS} for the metadata tail"
        )));
    }

    let metadata = MetadataBlock {
        l2_cache: tail_value(single, "single", CACHE_OFFSET)?,
        l3_cache: tail_value(multi, "multi", CACHE_OFFSET)?,
        cores: tail_value(single, "single", COUNT_OFFSET)?,
        threads: tail_value(multi, "multi", COUNT_OFFSET)?,
        tdp: tail_value(single, "single", LAST_OFFSET)?,
        release_year: tail_value(multi, "multi", LAST_OFFSET)?,
    };

    let samples = len - METADATA_ROWS;
    Ok(ExtractedTable {
        metadata,
        single: single[..samples].to_vec(),
        multi: multi[..samples].to_vec(),
    })
}

fn tail_value(
    column: &[Cell],
    name: &'static str,
    offset_from_end: usize,
) -> Result<f64, ProcessingError> {
    let row = column.len() - offset_from_end;
    numeric(&column[row], name, row)
}

/// Coerce a cell to `f64`, reporting where the bad value sits.
pub fn numeric(cell: &Cell, column: &'static str, row: usize) -> Result<f64, ProcessingError> {
    cell.as_f64().ok_or_else(|| ProcessingError::Numeric {
        column,
        row,
        value: cell.to_string(),
    })
}

/// Coerce a whole sample column to `f64`.
pub fn numeric_column(cells: &[Cell], column: &'static str) -> Result<Vec<f64>, ProcessingError> {
    cells
        .iter()
        .enumerate()
        .map(|(row, cell)| numeric(cell, column, row))
        .collect()
}
