//! Classification of new cyclists against a previously fitted model.

use crate::archetype::{Archetype, ClusterAssignment};
use crate::cluster::KMeans;
use crate::dataset::{self, CyclistRecord};
use crate::error::Result;
use crate::preprocessing;

/// One classified record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub id: u32,
    pub cluster: usize,
    pub archetype: Archetype,
}

/// Cleans the records the same way the training data was cleaned and asks
/// the fitted model for a cluster index per record. Does not retrain; a
/// supplied total time is ignored.
pub fn predict_clusters(model: &KMeans, records: &[CyclistRecord]) -> Result<Vec<usize>> {
    let features = preprocessing::clean(&dataset::numeric_table(records));
    model.predict(&features.data)
}

/// [`predict_clusters`] plus archetype resolution through the stored
/// association. A cluster index missing from the association surfaces as a
/// lookup error; the bare indices remain available via `predict_clusters`.
pub fn classify(
    model: &KMeans,
    assignment: &ClusterAssignment,
    records: &[CyclistRecord],
) -> Result<Vec<Prediction>> {
    let clusters = predict_clusters(model, records)?;
    records
        .iter()
        .zip(clusters)
        .map(|(record, cluster)| {
            Ok(Prediction {
                id: record.id,
                cluster,
                archetype: assignment.archetype_of(cluster)?,
            })
        })
        .collect()
}
