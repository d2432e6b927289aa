use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{BenchmarkTable, Cell};

pub const SINGLE_COLUMN: &str = "single";
pub const MULTI_COLUMN: &str = "multi";

const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "json", "parquet", "pq"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// List the table files in `dir`, sorted by path.
///
/// Files with an unsupported extension are ignored; subdirectories are not
/// descended into.
pub fn list_table_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("reading input directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("listing {}", dir.display()))?
            .path();
        if path.is_file() && is_supported(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load one benchmark table.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `single` and `multi` columns
/// * `.json`    – `{ "single": [...], "multi": [...] }`
/// * `.parquet` – numeric `single` and `multi` columns
pub fn load_file(path: &Path) -> Result<BenchmarkTable> {
    let name = processor_name(path);
    let (single, multi) = match extension(path).as_str() {
        "parquet" | "pq" => load_parquet(path)?,
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };
    Ok(BenchmarkTable {
        name,
        single,
        multi,
    })
}

/// Processor label for a source file: the file name without its extension.
pub fn processor_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Processor names produced by more than one file, e.g. `cpu.csv` and `cpu.json`.
pub fn duplicate_processor_names(paths: &[PathBuf]) -> Vec<String> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for path in paths {
        *counts.entry(processor_name(path)).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(name, _)| name)
        .collect()
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

fn is_supported(path: &Path) -> bool {
    SUPPORTED_EXTENSIONS.contains(&extension(path).as_str())
}

type Columns = (Option<Vec<Cell>>, Option<Vec<Cell>>);

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one sample (or metadata) per row.
/// Columns other than `single` and `multi` are ignored.
fn load_csv(path: &Path) -> Result<Columns> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    let single_idx = headers.iter().position(|h| h == SINGLE_COLUMN);
    let multi_idx = headers.iter().position(|h| h == MULTI_COLUMN);

    let mut single = single_idx.map(|_| Vec::new());
    let mut multi = multi_idx.map(|_| Vec::new());

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if let (Some(idx), Some(col)) = (single_idx, single.as_mut()) {
            col.push(Cell::parse(record.get(idx).unwrap_or("")));
        }
        if let (Some(idx), Some(col)) = (multi_idx, multi.as_mut()) {
            col.push(Cell::parse(record.get(idx).unwrap_or("")));
        }
    }

    Ok((single, multi))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (column-oriented, `df.to_dict(orient='list')`):
///
/// ```json
/// { "single": [1510, 1498, ..., 4, 4, 65], "multi": [5900, 6010, ..., 8, 8, 2021] }
/// ```
fn load_json(path: &Path) -> Result<Columns> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let obj = root
        .as_object()
        .context("Expected top-level JSON object")?;

    let column = |name: &str| -> Result<Option<Vec<Cell>>> {
        match obj.get(name) {
            None => Ok(None),
            Some(val) => {
                let arr = val
                    .as_array()
                    .with_context(|| format!("'{name}' is not an array"))?;
                Ok(Some(arr.iter().map(json_to_cell).collect()))
            }
        }
    };

    Ok((column(SINGLE_COLUMN)?, column(MULTI_COLUMN)?))
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Null),
        JsonValue::String(s) => Cell::parse(s),
        JsonValue::Null => Cell::Null,
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one row per sample.
///
/// `single` and `multi` may be any integer, float or decimal type, or Utf8.
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Columns> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;

    let schema = builder.schema().clone();
    let single_idx = schema.index_of(SINGLE_COLUMN).ok();
    let multi_idx = schema.index_of(MULTI_COLUMN).ok();

    let reader = builder.build().context("building parquet reader")?;

    let mut single = single_idx.map(|_| Vec::new());
    let mut multi = multi_idx.map(|_| Vec::new());

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        if let (Some(idx), Some(col)) = (single_idx, single.as_mut()) {
            extend_cells(col, batch.column(idx)).context("reading 'single'")?;
        }
        if let (Some(idx), Some(col)) = (multi_idx, multi.as_mut()) {
            extend_cells(col, batch.column(idx)).context("reading 'multi'")?;
        }
    }

    Ok((single, multi))
}

// -- Parquet / Arrow helpers --

/// Append every value of a scalar Arrow column as a [`Cell`].
///
/// Any numeric type (signed, unsigned, half-precision, decimal) is cast to
/// Float64 once per batch; nulls and non-finite floats become [`Cell::Null`].
fn extend_cells(out: &mut Vec<Cell>, col: &ArrayRef) -> Result<()> {
    out.reserve(col.len());
    match col.data_type() {
        DataType::Utf8 => {
            out.extend(col.as_string::<i32>().iter().map(|v| v.map_or(Cell::Null, Cell::parse)));
        }
        DataType::LargeUtf8 => {
            out.extend(col.as_string::<i64>().iter().map(|v| v.map_or(Cell::Null, Cell::parse)));
        }
        dt if dt.is_numeric() => {
            let floats = cast(col, &DataType::Float64)
                .with_context(|| format!("casting {dt:?} column to Float64"))?;
            out.extend(floats.as_primitive::<Float64Type>().iter().map(|v| match v {
                Some(v) if v.is_finite() => Cell::Number(v),
                _ => Cell::Null,
            }));
        }
        other => bail!("Expected a numeric or string column, got {other:?}"),
    }
    Ok(())
}
