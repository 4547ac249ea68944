//! dppkernel Command Line Interface
//!
//! Builds L-ensemble kernels from JSON problem descriptions and inspects
//! saved kernels.

use clap::{Args, Parser, Subcommand};
use dppkernel::persistence::{KernelInput, SerializableKernel};
use dppkernel::{DppError, KernelStats, Result};
use env_logger::Env;
use log::{error, info, warn};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "dppkernel")]
#[command(about = "Build DPP kernels for scheduling transmitter/receiver pairs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a kernel from a JSON problem description
    Build(BuildArgs),
    /// Display information about a saved kernel
    Info(InfoArgs),
}

#[derive(Args)]
struct BuildArgs {
    /// Input document with coordinates, similarity matrix and theta
    #[arg(short, long)]
    input: PathBuf,

    /// Output kernel file
    #[arg(short, long)]
    output: PathBuf,

    /// Override the feature count from the input document
    #[arg(short, long)]
    feature_count: Option<usize>,

    /// Override the quality exponent p in |v|^p
    #[arg(short, long)]
    power: Option<f64>,
}

#[derive(Args)]
struct InfoArgs {
    /// Kernel file
    kernel: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Build(args) => build_command(args),
        Commands::Info(args) => info_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn build_command(args: BuildArgs) -> Result<()> {
    info!("Loading problem from: {:?}", args.input);
    let mut input = KernelInput::load_from_file(&args.input)?;

    if let Some(feature_count) = args.feature_count {
        input.feature_count = feature_count;
    }
    if let Some(power) = args.power {
        input.power = Some(power);
    }

    info!(
        "Pairs: {}, theta: {:?}, feature count: {}",
        input.transmitters.len(),
        input.theta,
        input.feature_count
    );

    let result = input.build()?;
    let quality = input.quality()?;

    let stats = KernelStats::compute(result.kernel(), result.quality());
    info!("Resolved feature mode: {:?}", result.mode());
    info!("Kernel trace: {:.6}", stats.trace);
    if stats.max_asymmetry > 1e-9 {
        warn!(
            "Kernel is not symmetric (max asymmetry {:.3e}); check the similarity matrix",
            stats.max_asymmetry
        );
    }

    let description = format!("|v|^{}", quality.power());
    let serializable = SerializableKernel::from_pair_kernel(&result, &input.theta, &description);
    serializable.save_to_file(&args.output)?;
    info!("Kernel saved to: {:?}", args.output);

    Ok(())
}

fn info_command(args: InfoArgs) -> Result<()> {
    info!("Loading kernel from: {:?}", args.kernel);
    if !args.kernel.exists() {
        return Err(DppError::InvalidParameter(format!(
            "Kernel file not found: {:?}",
            args.kernel
        )));
    }

    let kernel = SerializableKernel::load_from_file(&args.kernel)?;
    kernel.print_summary()
}
