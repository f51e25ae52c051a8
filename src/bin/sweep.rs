//! Sweeps the cluster-count hyperparameter and records the quality scores
//! of every run.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pelotype::cluster::KMeans;
use pelotype::metrics::{self, ClusterScores};
use pelotype::{dataset, preprocessing, quiet};

#[derive(Parser)]
#[command(version, about = "Sweep the cluster count K and record quality scores")]
struct Opts {
    /// Input dataset (id;tp;tb;tt;tipus)
    #[arg(short, long, default_value = "data/cyclists.csv")]
    input: PathBuf,

    /// Destination for one JSON line per run
    #[arg(short, long, default_value = "runs/k_sweep.jsonl")]
    runs_file: PathBuf,
}

const RANDOM_STATE: u64 = 42;

#[derive(Serialize)]
struct SweepRun {
    k: usize,
    #[serde(flatten)]
    scores: ClusterScores,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let opts = Opts::parse();

    let records = dataset::load_records(&opts.input)
        .with_context(|| format!("loading dataset from {}", opts.input.display()))?;
    let features = preprocessing::clean(&dataset::numeric_table(&records));
    let truth = dataset::true_labels(&records);

    if let Some(parent) = opts.runs_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut out = BufWriter::new(File::create(&opts.runs_file)?);

    for k in 2..=8 {
        let mut model = KMeans::new(k).random_state(RANDOM_STATE);
        quiet::muted(|| model.fit(&features.data))?;

        let labels = model.labels.clone().context("fitted model has no labels")?;
        let scores = metrics::score_clustering(&truth, &labels)?;
        tracing::info!(
            k,
            homogeneity = scores.homogeneity,
            completeness = scores.completeness,
            v_measure = scores.v_measure,
            "sweep run"
        );

        let run = SweepRun { k, scores };
        writeln!(out, "{}", serde_json::to_string(&run)?)?;
    }
    out.flush()?;

    tracing::info!(path = %opts.runs_file.display(), "sweep runs recorded");
    Ok(())
}
