//! Clustering of cyclists' climb/descent times into behavioral archetypes.
//!
//! The pipeline: generate (or load) a labeled dataset, drop the non-feature
//! columns, fit a k-means model over the two time features, associate the
//! discovered clusters with the four named archetypes, write per-archetype
//! membership reports and classify new cyclists against the fitted model.

pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod archetype;
pub mod cluster;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod predict;
pub mod preprocessing;
pub mod quiet;
pub mod report;
pub mod storage;

pub use archetype::{Archetype, ClusterAssignment, associate};
pub use cluster::KMeans;
pub use dataset::{CyclistRecord, NumericTable};
pub use error::{Error, Result};

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;
