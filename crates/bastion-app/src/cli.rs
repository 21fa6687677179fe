//! Command-line arguments for the headless runner.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Headless BASTION lane-defense match runner", long_about = None)]
pub struct Args {
    /// Match configuration JSON. Defaults to the starter match.
    #[arg(value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Stop after this many ticks (50 per simulated second).
    #[arg(
        long,
        value_name = "N",
        default_value_t = 1500,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub ticks: u64,

    /// RNG seed. Same seed and config give the same match.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Pacing multiplier for the loop (1.0 = real time).
    #[arg(long, value_name = "SCALE", default_value_t = 1.0)]
    pub time_scale: f64,

    /// Run ticks back to back instead of at the tick rate.
    #[arg(long)]
    pub unpaced: bool,

    /// Write the final snapshot as JSON to this path.
    #[arg(long, value_name = "PATH")]
    pub snapshot_out: Option<PathBuf>,

    /// Debug-level logging (RUST_LOG still wins).
    #[arg(short, long)]
    pub verbose: bool,
}
