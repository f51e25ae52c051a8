//! Generates the synthetic cyclist dataset.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pelotype::dataset;

#[derive(Parser)]
#[command(version, about = "Generate a synthetic cyclist climb/descent dataset")]
struct Opts {
    /// Cyclists to generate per archetype
    #[arg(short, long, default_value_t = 100)]
    count: usize,

    /// RNG seed for a reproducible dataset
    #[arg(short, long)]
    seed: Option<u64>,

    /// Destination CSV file
    #[arg(short, long, default_value = "data/cyclists.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let opts = Opts::parse();

    let records = dataset::generate_peloton(opts.count, &dataset::canonical_params(), opts.seed)?;
    dataset::store_records(&opts.output, &records)?;

    tracing::info!(
        rows = records.len(),
        path = %opts.output.display(),
        "dataset written"
    );
    Ok(())
}
