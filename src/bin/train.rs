//! Runs the full pipeline: load, clean, fit, score, associate, report and
//! classify a batch of new cyclists.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pelotype::cluster::KMeans;
use pelotype::dataset::{self, CyclistRecord};
use pelotype::{archetype, metrics, predict, preprocessing, quiet, report, storage};

#[derive(Parser)]
#[command(version, about = "Cluster cyclists into behavioral archetypes")]
struct Opts {
    /// Input dataset (id;tp;tb;tt;tipus)
    #[arg(short, long, default_value = "data/cyclists.csv")]
    input: PathBuf,

    /// Directory for the persisted training artifacts
    #[arg(short, long, default_value = "model")]
    model_dir: PathBuf,

    /// Directory for the per-archetype membership reports
    #[arg(short, long, default_value = report::DEFAULT_REPORTS_DIR)]
    reports_dir: PathBuf,
}

const CLUSTER_COUNT: usize = 4;
const RANDOM_STATE: u64 = 42;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let opts = Opts::parse();

    let records = dataset::load_records(&opts.input)
        .with_context(|| format!("loading dataset from {}", opts.input.display()))?;
    tracing::info!(rows = records.len(), "dataset loaded");

    let table = dataset::numeric_table(&records);
    tracing::debug!(rows = table.n_rows(), columns = ?table.columns, "numeric table");

    let features = preprocessing::clean(&table);
    let truth = dataset::true_labels(&records);

    let mut model = KMeans::new(CLUSTER_COUNT).random_state(RANDOM_STATE);
    quiet::muted(|| model.fit(&features.data))?;
    tracing::info!("clustering model trained");

    let labels = model.labels.clone().context("fitted model has no labels")?;
    let scores = metrics::score_clustering(&truth, &labels)?;
    tracing::info!(
        homogeneity = scores.homogeneity,
        completeness = scores.completeness,
        v_measure = scores.v_measure,
        "cluster quality"
    );

    let centers = model
        .cluster_centers
        .clone()
        .context("fitted model has no centroids")?;
    let assignment = archetype::associate(&centers)?;
    for (archetype, cluster) in assignment.iter() {
        tracing::info!(%archetype, cluster, "association");
    }

    storage::store(opts.model_dir.join(storage::MODEL_FILE), &model)?;
    storage::store(opts.model_dir.join(storage::SCORES_FILE), &scores)?;
    storage::store(opts.model_dir.join(storage::ASSIGNMENT_FILE), &assignment)?;
    tracing::info!(dir = %opts.model_dir.display(), "training artifacts stored");

    report::write_reports(&opts.reports_dir, &records, &labels, &assignment)?;

    let newcomers = vec![
        CyclistRecord::new(500, 3230, 1430, None),
        CyclistRecord::new(501, 3300, 2120, None),
        CyclistRecord::new(502, 4010, 1510, None),
        CyclistRecord::new(503, 4350, 2200, None),
    ];
    for prediction in predict::classify(&model, &assignment, &newcomers)? {
        tracing::info!(
            id = prediction.id,
            cluster = prediction.cluster,
            archetype = %prediction.archetype,
            "classified new cyclist"
        );
    }

    Ok(())
}
