use std::io;

/// Errors surfaced by the clustering pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("model not fitted, call fit() first")]
    NotFitted,

    #[error("input has {found} feature columns, model was trained on {expected}")]
    FeatureMismatch { expected: usize, found: usize },

    #[error("no archetype associated with cluster {0}")]
    UnknownCluster(usize),

    #[error("label slices must have the same length ({0} vs {1})")]
    LabelLength(usize, usize),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("model artifact error: {0}")]
    Artifact(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
