use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Cell – a single value in a benchmark column
// ---------------------------------------------------------------------------

/// A raw table cell as read from the source file.
///
/// Numbers are not validated at load time; a `Text` or `Null` cell only
/// becomes an error when something tries to read it as a number.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Null,
}

impl Cell {
    /// Interpret a textual cell the way the CSV reader sees it.
    ///
    /// Only finite numbers become `Number`; `NaN` and `inf` spellings stay
    /// text so they are reported instead of reaching the averages.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            return Cell::Null;
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Cell::Number(v),
            _ => Cell::Text(s.to_string()),
        }
    }

    /// The numeric value, if the cell holds one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Null => write!(f, "<empty>"),
        }
    }
}

// ---------------------------------------------------------------------------
// BenchmarkTable – one processor's source table
// ---------------------------------------------------------------------------

/// One processor's benchmark table: sample rows followed by the metadata tail.
///
/// A column is `None` when the source did not contain it at all.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkTable {
    /// Opaque processor label (usually the file stem).
    pub name: String,
    pub single: Option<Vec<Cell>>,
    pub multi: Option<Vec<Cell>>,
}

impl BenchmarkTable {
    /// Build a table from plain numeric columns.
    pub fn from_numbers(name: impl Into<String>, single: &[f64], multi: &[f64]) -> Self {
        BenchmarkTable {
            name: name.into(),
            single: Some(single.iter().copied().map(Cell::from).collect()),
            multi: Some(multi.iter().copied().map(Cell::from).collect()),
        }
    }
}

// ---------------------------------------------------------------------------
// MetadataBlock – fixed attributes stored in the table tail
// ---------------------------------------------------------------------------

/// Processor attributes read from the trailing rows of a table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetadataBlock {
    pub l2_cache: f64,
    pub l3_cache: f64,
    pub cores: f64,
    pub threads: f64,
    pub tdp: f64,
    pub release_year: f64,
}

// ---------------------------------------------------------------------------
// Processor records
// ---------------------------------------------------------------------------

/// A processor that has been averaged and scored but not yet ranked.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredProcessor {
    pub name: String,
    pub metadata: MetadataBlock,
    pub single_avg: f64,
    pub multi_avg: f64,
    pub combined_score: f64,
}

/// One row of the final ranking, in output column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedProcessor {
    #[serde(rename = "Processor")]
    pub processor: String,
    #[serde(rename = "Cores")]
    pub cores: f64,
    #[serde(rename = "Threads")]
    pub threads: f64,
    #[serde(rename = "L2_Cache")]
    pub l2_cache: f64,
    #[serde(rename = "L3_Cache")]
    pub l3_cache: f64,
    #[serde(rename = "TDP")]
    pub tdp: f64,
    #[serde(rename = "Release_Year")]
    pub release_year: f64,
    #[serde(rename = "Single")]
    pub single: f64,
    #[serde(rename = "Multi")]
    pub multi: f64,
    #[serde(rename = "Combined_Score")]
    pub combined_score: f64,
    #[serde(rename = "Rank")]
    pub rank: usize,
}

impl RankedProcessor {
    /// Attach a rank to a scored processor.
    pub fn new(scored: ScoredProcessor, rank: usize) -> Self {
        let ScoredProcessor {
            name,
            metadata,
            single_avg,
            multi_avg,
            combined_score,
        } = scored;
        RankedProcessor {
            processor: name,
            cores: metadata.cores,
            threads: metadata.threads,
            l2_cache: metadata.l2_cache,
            l3_cache: metadata.l3_cache,
            tdp: metadata.tdp,
            release_year: metadata.release_year,
            single: single_avg,
            multi: multi_avg,
            combined_score,
            rank,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cells() {
        assert_eq!(Cell::parse("42"), Cell::Number(42.0));
        assert_eq!(Cell::parse(" 3.5 "), Cell::Number(3.5));
        assert_eq!(Cell::parse(""), Cell::Null);
        assert_eq!(Cell::parse("n/a"), Cell::Text("n/a".into()));
    }

    #[test]
    fn non_finite_text_is_not_a_number() {
        for s in ["NaN", "nan", "inf", "-inf", "Infinity"] {
            assert_eq!(Cell::parse(s), Cell::Text(s.into()), "{s}");
            assert_eq!(Cell::parse(s).as_f64(), None);
        }
    }

    #[test]
    fn as_f64_only_for_numbers() {
        assert_eq!(Cell::Number(1.5).as_f64(), Some(1.5));
        assert_eq!(Cell::Text("1.5x".into()).as_f64(), None);
        assert_eq!(Cell::Null.as_f64(), None);
    }

    #[test]
    fn ranked_copies_metadata() {
        let scored = ScoredProcessor {
            name: "cpu".into(),
            metadata: MetadataBlock {
                l2_cache: 4.0,
                l3_cache: 8.0,
                cores: 4.0,
                threads: 8.0,
                tdp: 60.0,
                release_year: 2021.0,
            },
            single_avg: 60.0,
            multi_avg: 55.0,
            combined_score: -10.66,
        };
        let ranked = RankedProcessor::new(scored, 1);
        assert_eq!(ranked.processor, "cpu");
        assert_eq!(ranked.l3_cache, 8.0);
        assert_eq!(ranked.threads, 8.0);
        assert_eq!(ranked.release_year, 2021.0);
        assert_eq!(ranked.single, 60.0);
        assert_eq!(ranked.rank, 1);
    }
}
