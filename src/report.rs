//! Writing the ranking table and the console summary.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use log::info;

use crate::data::model::RankedProcessor;
use crate::pipeline::RunReport;

/// File format of the ranking table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    /// Guess the format from the output file extension, defaulting to CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Csv,
        }
    }
}

/// Write the ranking table to `path`, creating parent directories as needed.
pub fn write_rankings(path: &Path, rankings: &[RankedProcessor], format: OutputFormat) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {}", parent.display()))?;
            info!("Created directory: {}", parent.display());
        }
    }

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    match format {
        OutputFormat::Csv => write_csv(&mut out, rankings)?,
        OutputFormat::Json => write_json(&mut out, rankings)?,
    }
    out.flush().with_context(|| format!("writing {}", path.display()))?;

    info!("Rankings saved to '{}'", path.display());
    Ok(())
}

/// CSV with a header row; columns follow [`RankedProcessor`]'s field order.
pub fn write_csv<W: Write>(out: W, rankings: &[RankedProcessor]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rankings {
        writer.serialize(row).context("serializing ranking row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

/// JSON array of records, one object per processor.
pub fn write_json<W: Write>(mut out: W, rankings: &[RankedProcessor]) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, rankings).context("serializing rankings")?;
    writeln!(out)?;
    Ok(())
}

/// Human-readable ranking table plus the list of skipped tables.
pub fn format_summary(report: &RunReport) -> Result<String> {
    let mut output = String::new();

    let name_width = report
        .rankings
        .iter()
        .map(|r| r.processor.chars().count())
        .max()
        .unwrap_or(0)
        .max("Processor".len());

    writeln!(
        output,
        "{:>4}  {:<name_width$}  {:>10}  {:>10}  {:>6}  {:>8}",
        "Rank", "Processor", "Single", "Multi", "TDP", "Score"
    )?;
    writeln!(output, "{}", "─".repeat(name_width + 48))?;
    for r in &report.rankings {
        writeln!(
            output,
            "{:>4}  {:<name_width$}  {:>10.2}  {:>10.2}  {:>6}  {:>8.2}",
            r.rank, r.processor, r.single, r.multi, r.tdp, r.combined_score
        )?;
    }

    if !report.skipped.is_empty() {
        writeln!(output)?;
        writeln!(output, "Skipped {} table(s):", report.skipped.len())?;
        for skip in &report.skipped {
            writeln!(output, "  • {}: {}", skip.source, skip.error)?;
        }
    }

    Ok(output)
}
