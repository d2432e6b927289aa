use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;

use cpu_rank::pipeline::rank_directory;
use cpu_rank::report::{OutputFormat, format_summary, write_rankings};
use cpu_rank::score::ScoreWeights;

/// Rank processors by trimmed benchmark averages, TDP and L3 cache.
#[derive(Debug, Parser)]
#[command(version, verbatim_doc_comment)]
struct Opts {
    /// Directory of per-processor tables (.csv, .json, .parquet).
    #[clap(short, long, default_value = "CPUs")]
    input: PathBuf,

    /// Where to write the ranking table.
    #[clap(short, long, default_value = "Out/processor_rankings.csv")]
    output: PathBuf,

    /// Output format. Guessed from the output extension when omitted.
    #[clap(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// JSON file with score weights; missing fields keep their defaults.
    #[clap(short, long, env = "CPU_RANK_WEIGHTS")]
    weights: Option<PathBuf>,

    /// Override the single-thread weight.
    #[clap(long)]
    weight_single: Option<f64>,

    /// Override the multi-thread weight.
    #[clap(long)]
    weight_multi: Option<f64>,

    /// Override the per-watt TDP penalty.
    #[clap(long)]
    tdp_penalty: Option<f64>,

    /// Override the per-MB L3 cache bonus.
    #[clap(long)]
    l3_bonus: Option<f64>,

    /// Do not print the ranking summary.
    #[clap(short, long, action = clap::ArgAction::SetTrue)]
    quiet: bool,

    /// Increase log verbosity. Specify multiple times for more detail.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Opts {
    fn score_weights(&self) -> Result<ScoreWeights> {
        let mut weights = match &self.weights {
            Some(path) => ScoreWeights::from_file(path)?,
            None => ScoreWeights::default(),
        };
        if let Some(v) = self.weight_single {
            weights.weight_single = v;
        }
        if let Some(v) = self.weight_multi {
            weights.weight_multi = v;
        }
        if let Some(v) = self.tdp_penalty {
            weights.tdp_penalty_factor = v;
        }
        if let Some(v) = self.l3_bonus {
            weights.l3_cache_bonus_factor = v;
        }
        Ok(weights)
    }
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let level = match opts.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let weights = opts.score_weights()?;
    info!("Ranking tables in {}", opts.input.display());

    let report = rank_directory(&opts.input, &weights)?;

    let format = opts
        .format
        .unwrap_or_else(|| OutputFormat::from_path(&opts.output));
    write_rankings(&opts.output, &report.rankings, format)?;

    if !opts.quiet {
        print!("{}", format_summary(&report)?);
    }
    Ok(())
}
