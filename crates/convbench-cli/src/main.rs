//! `convbench`: apply a 2D kernel to a 24-bit BMP and measure throughput.

mod harness;

use std::path::{Path, PathBuf};

use clap::Parser;
use log::{debug, info, LevelFilter};
use serde::Serialize;

use convbench_bmp::{read_bmp, write_bmp, BmpError};
use convbench_core::{init_with_level, Kernel, KernelError, ParallelOptions, TimingStats};

use harness::{run_benchmark, BenchConfig};

#[derive(Parser, Debug)]
#[command(
    name = "convbench",
    version,
    about = "Convolve a 24-bit uncompressed BMP with a kernel and benchmark the engine"
)]
struct Args {
    /// Input BMP path (24-bit uncompressed)
    input: PathBuf,

    /// Output BMP path
    output: PathBuf,

    /// Kernel row count (default: 3x3 identity kernel)
    #[arg(long, requires = "cols", requires = "weights")]
    rows: Option<usize>,

    /// Kernel column count
    #[arg(long, requires = "rows")]
    cols: Option<usize>,

    /// Flattened row-major kernel weights, comma separated
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, requires = "rows")]
    weights: Option<Vec<f32>>,

    /// Warmup iterations, executed and discarded
    #[arg(long, default_value_t = 100)]
    warmup: usize,

    /// Measured iterations
    #[arg(long, default_value_t = 100)]
    runs: usize,

    /// Worker thread count (default: RAYON_NUM_THREADS or all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Write the timing report as pretty JSON
    #[arg(long)]
    stats_json: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("{path}: {source}")]
    Bmp {
        path: PathBuf,
        #[source]
        source: BmpError,
    },

    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error("kernel ({rows}x{cols}) exceeds image extent ({height}x{width})")]
    KernelExceedsImage {
        rows: usize,
        cols: usize,
        height: usize,
        width: usize,
    },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to write stats to {path}: {source}")]
    StatsWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize stats: {0}")]
    StatsSerialize(#[from] serde_json::Error),
}

/// Timing report serialized by `--stats-json`.
#[derive(Serialize)]
struct BenchReport<'a> {
    input: &'a Path,
    width: usize,
    height: usize,
    out_width: usize,
    out_height: usize,
    kernel_rows: usize,
    kernel_cols: usize,
    warmup_iterations: usize,
    threads: usize,
    #[serde(flatten)]
    stats: TimingStats,
}

fn kernel_from_args(args: &Args) -> Result<Kernel, CliError> {
    match (args.rows, args.cols, &args.weights) {
        (Some(rows), Some(cols), Some(weights)) => {
            Ok(Kernel::new(rows, cols, weights.clone())?)
        }
        _ => Ok(Kernel::identity()),
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = init_with_level(level);

    let kernel = kernel_from_args(&args)?;
    debug!(
        "kernel: {}x{}, weights {:?}",
        kernel.rows(),
        kernel.cols(),
        kernel.weights()
    );

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    let planes = read_bmp(&args.input).map_err(|source| CliError::Bmp {
        path: args.input.clone(),
        source,
    })?;
    let (width, height) = (planes.width(), planes.height());
    info!("loaded {} ({width}x{height})", args.input.display());

    if kernel.cols() > width || kernel.rows() > height {
        return Err(CliError::KernelExceedsImage {
            rows: kernel.rows(),
            cols: kernel.cols(),
            height,
            width,
        });
    }

    let config = BenchConfig {
        warmup: args.warmup,
        runs: args.runs,
    };
    let (out_planes, stats) = run_benchmark(&planes, &kernel, config, ParallelOptions::default());
    info!(
        "convolved to {}x{} over {} threads",
        out_planes.width(),
        out_planes.height(),
        rayon::current_num_threads()
    );

    if let Some(stats) = &stats {
        println!("Average time: {:.1} microseconds", stats.mean_us);
        println!("Variance: {:.1} microseconds^2", stats.variance_us2);
        println!("Std Dev: {:.1} microseconds", stats.std_dev_us);

        if let Some(json_path) = &args.stats_json {
            let report = BenchReport {
                input: &args.input,
                width,
                height,
                out_width: out_planes.width(),
                out_height: out_planes.height(),
                kernel_rows: kernel.rows(),
                kernel_cols: kernel.cols(),
                warmup_iterations: args.warmup,
                threads: rayon::current_num_threads(),
                stats: *stats,
            };
            let json = serde_json::to_string_pretty(&report)?;
            std::fs::write(json_path, json).map_err(|source| CliError::StatsWrite {
                path: json_path.clone(),
                source,
            })?;
            info!("wrote stats to {}", json_path.display());
        }
    }

    write_bmp(&args.output, &out_planes).map_err(|source| CliError::Bmp {
        path: args.output.clone(),
        source,
    })?;
    info!("wrote {}", args.output.display());

    Ok(())
}
