//! Behavioral archetypes and their association with discovered clusters.
//!
//! K-means hands back arbitrary cluster indices; [`associate`] resolves which
//! index means which archetype by ranking the fitted centroids.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Matrix;
use crate::error::{Error, Result};

/// One of the four behavioral categories a cyclist can fall into, the
/// combination of climbing ability and descending ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Archetype {
    /// Steady climber, steady descender.
    SteadySteady,
    /// Steady climber, weak descender.
    SteadyWeak,
    /// Weak climber, steady descender.
    WeakSteady,
    /// Weak climber, weak descender.
    WeakWeak,
}

impl Archetype {
    /// All archetypes in canonical order.
    pub const ALL: [Archetype; 4] = [
        Archetype::SteadySteady,
        Archetype::SteadyWeak,
        Archetype::WeakSteady,
        Archetype::WeakWeak,
    ];

    /// Stable string label, also used for manifest file names.
    pub fn label(&self) -> &'static str {
        match self {
            Archetype::SteadySteady => "steady-steady",
            Archetype::SteadyWeak => "steady-weak",
            Archetype::WeakSteady => "weak-steady",
            Archetype::WeakWeak => "weak-weak",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Bijective archetype-to-cluster table produced once per training run.
///
/// Immutable after construction; retraining replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterAssignment {
    // Slot i holds the cluster index of Archetype::ALL[i].
    clusters: [usize; 4],
}

impl ClusterAssignment {
    /// Cluster index the given archetype was associated with.
    pub fn cluster_of(&self, archetype: Archetype) -> usize {
        self.clusters[archetype as usize]
    }

    /// Archetype associated with the given cluster index.
    pub fn archetype_of(&self, cluster: usize) -> Result<Archetype> {
        Archetype::ALL
            .into_iter()
            .find(|a| self.clusters[*a as usize] == cluster)
            .ok_or(Error::UnknownCluster(cluster))
    }

    /// (archetype, cluster) pairs in canonical archetype order.
    pub fn iter(&self) -> impl Iterator<Item = (Archetype, usize)> + '_ {
        Archetype::ALL.into_iter().map(|a| (a, self.clusters[a as usize]))
    }
}

const CLIMB: usize = 0;
const DESCENT: usize = 1;

/// Associates each archetype with one cluster, given the fitted centroids
/// (one row per cluster, columns: climb time, descent time).
///
/// The centroid with the lowest rounded climb+descent sum is the
/// steady/steady cluster, the one with the highest is weak/weak; of the
/// remaining two, the smaller climb time is steady/weak and the larger is
/// weak/steady. When two centroids share the min or max sum the first-seen
/// one keeps the slot; ties are not disambiguated further.
///
/// Requires exactly 4 centroids with 2 coordinates each, anything else is a
/// configuration error.
pub fn associate(centroids: &Matrix) -> Result<ClusterAssignment> {
    if centroids.nrows() != 4 {
        return Err(Error::Config(format!(
            "archetype association requires exactly 4 centroids, got {}",
            centroids.nrows()
        )));
    }
    if centroids.ncols() != 2 {
        return Err(Error::Config(format!(
            "centroids must have 2 coordinates (climb, descent), got {}",
            centroids.ncols()
        )));
    }

    let round1 = |v: f64| (v * 10.0).round() / 10.0;

    let mut min_sum = f64::INFINITY;
    let mut max_sum = f64::NEG_INFINITY;
    let mut fastest = 0;
    let mut slowest = 0;

    for (j, center) in centroids.outer_iter().enumerate() {
        let sum = round1(center[CLIMB]) + round1(center[DESCENT]);
        tracing::debug!(
            cluster = j,
            climb = center[CLIMB],
            descent = center[DESCENT],
            "centroid"
        );
        // Strict comparisons: the first centroid seen with an equal sum wins.
        if sum < min_sum {
            min_sum = sum;
            fastest = j;
        }
        if sum > max_sum {
            max_sum = sum;
            slowest = j;
        }
    }

    if fastest == slowest {
        return Err(Error::Config(
            "degenerate centroids: all climb+descent sums are equal".to_string(),
        ));
    }

    let rest: Vec<usize> = (0..4).filter(|j| *j != fastest && *j != slowest).collect();
    let (steady_weak, weak_steady) = if centroids[[rest[0], CLIMB]] < centroids[[rest[1], CLIMB]] {
        (rest[0], rest[1])
    } else {
        (rest[1], rest[0])
    };

    Ok(ClusterAssignment {
        clusters: [fastest, steady_weak, weak_steady, slowest],
    })
}
