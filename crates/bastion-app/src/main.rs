use anyhow::Context;
use clap::Parser;

use bastion_app::cli::Args;
use bastion_app::logging::{self, TracingConfig};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        logging::init_tracing(&TracingConfig::verbose());
    } else {
        logging::init_tracing_default();
    }

    let summary = bastion_app::run(&args).context("match run failed")?;
    println!(
        "{:?} after {} ticks ({:?}); energy {}, {} units standing",
        summary.phase, summary.ticks, summary.exit, summary.energy, summary.live_units
    );
    Ok(())
}
