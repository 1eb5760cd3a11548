use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use dvwarp_dtw::{Direction, Norm, Strain, Warp};
use dvwarp_dvv::{Broadband, DvvConfig, FrequencyBand};
use dvwarp_io::{ExperimentName, ResultWriter, TracePair, TraceReader};

#[derive(Parser)]
#[command(name = "dvwarp")]
#[command(about = "Strain-limited dynamic warping of seismic traces and dv/v estimation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel computation (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

/// Input, output and warping parameters shared by every subcommand.
#[derive(Args, Debug, Clone)]
struct WarpArgs {
    /// Path to the input CSV file (columns: time, reference, current)
    #[arg(long)]
    data: PathBuf,

    /// Experiment name for output files (must match [a-zA-Z0-9_-]+)
    #[arg(long)]
    experiment: String,

    /// Output directory for result files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Largest lag searched, in samples
    #[arg(long)]
    max_lag: usize,

    /// Minimum number of samples between lag changes
    #[arg(long, default_value_t = 1)]
    strain: usize,

    /// Accumulation direction: "forward", "backward" or "symmetric"
    #[arg(long, default_value = "forward")]
    direction: String,

    /// Misfit norm: "l2" or "l1"
    #[arg(long, default_value = "l2")]
    norm: String,

    /// Start of the measurement window, in seconds (defaults to the first sample)
    #[arg(long)]
    tmin: Option<f64>,

    /// End of the measurement window, in seconds (defaults to the last sample)
    #[arg(long)]
    tmax: Option<f64>,
}

#[derive(Subcommand)]
enum Command {
    /// Recover the lag between the reference and current traces
    Warp {
        #[command(flatten)]
        args: WarpArgs,
    },

    /// Estimate the relative velocity change in one or more frequency bands
    Dvv {
        #[command(flatten)]
        args: WarpArgs,

        /// Frequency band as "low:high" in Hz (repeatable; defaults to the full band)
        #[arg(long = "band")]
        bands: Vec<String>,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct WarpOutput {
    experiment: String,
    n_samples: usize,
    fit_error: f64,
    min_lag: isize,
    max_lag: isize,
    mean_time_shift: f64,
    artifact: PathBuf,
}

#[derive(Serialize)]
struct DvvOutput {
    experiment: String,
    n_samples: usize,
    bands: Vec<BandOutput>,
    artifact: PathBuf,
}

#[derive(Serialize)]
struct BandOutput {
    low: f64,
    high: f64,
    dvv: f64,
    dvv_err: f64,
}

fn build_warp(args: &WarpArgs) -> Result<Warp> {
    let direction: Direction = args.direction.parse()?;
    let norm: Norm = args.norm.parse()?;
    let warp = Warp::new(args.max_lag)?
        .with_strain(Strain::new(args.strain)?)
        .with_direction(direction)
        .with_norm(norm);
    Ok(warp)
}

fn parse_band(s: &str) -> Result<FrequencyBand> {
    let (low, high) = s
        .split_once(':')
        .with_context(|| format!("band \"{s}\" must be written low:high"))?;
    let low: f64 = low.trim().parse().with_context(|| format!("bad lower frequency in \"{s}\""))?;
    let high: f64 = high.trim().parse().with_context(|| format!("bad upper frequency in \"{s}\""))?;
    Ok(FrequencyBand::new(low, high)?)
}

/// Everything resolvable from the record: lowest non-zero frequency to Nyquist.
fn full_band(pair: &TracePair) -> Result<FrequencyBand> {
    let low = pair.sampling_rate / pair.len() as f64;
    let high = pair.sampling_rate / 2.0;
    FrequencyBand::new(low, high).context("record too short for a default band")
}

fn read_pair(args: &WarpArgs) -> Result<TracePair> {
    let pair = TraceReader::new(&args.data)
        .read()
        .context("failed to read input CSV")?;
    info!(n_samples = pair.len(), sampling_rate = pair.sampling_rate, "traces loaded");
    Ok(pair)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Configure Rayon thread pool
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Warp { args } => {
            let warp = build_warp(&args)?;
            let experiment_name = ExperimentName::new(args.experiment.clone())?;
            let pair = read_pair(&args)?;
            let window = pair.window(args.tmin, args.tmax)?;

            let result = warp
                .warp(
                    pair.reference.as_view(),
                    pair.current.as_view(),
                    &pair.time,
                    &window,
                    pair.sampling_rate,
                )
                .context("warping failed")?;

            let writer = ResultWriter::new(&args.output_dir, experiment_name)?;
            let artifact = writer.write_warp(&warp, pair.sampling_rate, &result)?;

            let lags = result.lags.lags();
            let output = WarpOutput {
                experiment: args.experiment,
                n_samples: lags.len(),
                fit_error: result.fit_error.value(),
                min_lag: lags.iter().copied().min().unwrap_or(0),
                max_lag: lags.iter().copied().max().unwrap_or(0),
                mean_time_shift: result.time_shift.iter().sum::<f64>() / lags.len() as f64,
                artifact,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Dvv { args, bands } => {
            let warp = build_warp(&args)?;
            let experiment_name = ExperimentName::new(args.experiment.clone())?;
            let pair = read_pair(&args)?;
            let window = pair.window(args.tmin, args.tmax)?;

            let bands = if bands.is_empty() {
                vec![full_band(&pair)?]
            } else {
                bands.iter().map(|b| parse_band(b)).collect::<Result<Vec<_>>>()?
            };

            let config = DvvConfig::new(warp, bands)?;
            let result = config
                .estimate(
                    pair.reference.as_view(),
                    pair.current.as_view(),
                    &pair.time,
                    &window,
                    pair.sampling_rate,
                    &Broadband,
                )
                .context("dv/v estimation failed")?;

            let writer = ResultWriter::new(&args.output_dir, experiment_name)?;
            let artifact = writer.write_dvv(&warp, pair.sampling_rate, &result)?;

            let output = DvvOutput {
                experiment: args.experiment,
                n_samples: window.len(),
                bands: result
                    .bands
                    .iter()
                    .map(|b| BandOutput {
                        low: b.band.low(),
                        high: b.band.high(),
                        dvv: b.dvv,
                        dvv_err: b.dvv_err,
                    })
                    .collect(),
                artifact,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
