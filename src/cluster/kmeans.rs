use ndarray::ArrayView1;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::Matrix;
use crate::error::{Error, Result};

/// Centroid-based partitioning of numeric features into `n_clusters` groups,
/// minimizing within-cluster squared distance.
///
/// A fixed `random_state` makes repeated fits over identical input assign
/// identical labels to identical rows; which cluster index means what is
/// arbitrary and resolved separately by the archetype association.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KMeans {
    pub cluster_centers: Option<Matrix>,
    pub labels: Option<Vec<usize>>,
    pub inertia: Option<f64>,
    n_clusters: usize,
    max_iter: usize,
    tolerance: f64,
    n_init: usize,
    random_state: Option<u64>,
}

impl KMeans {
    pub fn new(n_clusters: usize) -> Self {
        Self {
            cluster_centers: None,
            labels: None,
            inertia: None,
            n_clusters,
            max_iter: 300,
            tolerance: 1e-4,
            n_init: 10,
            random_state: None,
        }
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Number of restarts with fresh centroid seeds; the run with the lowest
    /// inertia wins.
    pub fn n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init.max(1);
        self
    }

    pub fn random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    pub fn fit(&mut self, x: &Matrix) -> Result<()> {
        if self.n_clusters == 0 {
            return Err(Error::Config("n_clusters must be > 0".to_string()));
        }
        if x.nrows() == 0 || x.ncols() == 0 {
            return Err(Error::Config(
                "input must have at least one sample and one feature".to_string(),
            ));
        }
        if x.nrows() < self.n_clusters {
            return Err(Error::Config(format!(
                "n_samples={} should be >= n_clusters={}",
                x.nrows(),
                self.n_clusters
            )));
        }

        let mut best: Option<(f64, Matrix, Vec<usize>)> = None;
        for run in 0..self.n_init {
            // Run r of seed s uses seed s + r, so the whole fit is
            // reproducible for a fixed random_state.
            let mut rng = match self.random_state {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(run as u64)),
                None => StdRng::from_entropy(),
            };

            let (centroids, labels, inertia) = self.run_lloyd(x, &mut rng);
            tracing::debug!(run, inertia, "k-means restart converged");

            if best.as_ref().map_or(true, |(b, _, _)| inertia < *b) {
                best = Some((inertia, centroids, labels));
            }
        }

        let (inertia, centroids, labels) = best.ok_or(Error::NotFitted)?;
        self.cluster_centers = Some(centroids);
        self.labels = Some(labels);
        self.inertia = Some(inertia);
        Ok(())
    }

    /// Assigns each row of `x` to the nearest fitted centroid. Does not
    /// retrain.
    pub fn predict(&self, x: &Matrix) -> Result<Vec<usize>> {
        let centroids = self.cluster_centers.as_ref().ok_or(Error::NotFitted)?;

        if x.ncols() != centroids.ncols() {
            return Err(Error::FeatureMismatch {
                expected: centroids.ncols(),
                found: x.ncols(),
            });
        }

        Ok(x.outer_iter()
            .map(|row| nearest_centroid(&row, centroids).0)
            .collect())
    }

    pub fn fit_predict(&mut self, x: &Matrix) -> Result<Vec<usize>> {
        self.fit(x)?;
        self.labels.clone().ok_or(Error::NotFitted)
    }

    /// One full Lloyd run from a fresh k-means++ initialization.
    fn run_lloyd(&self, x: &Matrix, rng: &mut StdRng) -> (Matrix, Vec<usize>, f64) {
        let mut centroids = self.plus_plus_init(x, rng);
        let mut labels = vec![0usize; x.nrows()];

        for _ in 0..self.max_iter {
            for (i, row) in x.outer_iter().enumerate() {
                labels[i] = nearest_centroid(&row, &centroids).0;
            }

            let mut new_centroids = Matrix::zeros((self.n_clusters, x.ncols()));
            let mut counts = vec![0usize; self.n_clusters];
            for (i, row) in x.outer_iter().enumerate() {
                let mut center = new_centroids.row_mut(labels[i]);
                center += &row;
                counts[labels[i]] += 1;
            }
            for k in 0..self.n_clusters {
                if counts[k] > 0 {
                    let mut center = new_centroids.row_mut(k);
                    center /= counts[k] as f64;
                } else {
                    // Re-seed an emptied cluster from the data.
                    let idx = rng.gen_range(0..x.nrows());
                    new_centroids.row_mut(k).assign(&x.row(idx));
                }
            }

            let shift = max_centroid_shift(&centroids, &new_centroids);
            centroids = new_centroids;
            if shift < self.tolerance {
                break;
            }
        }

        let mut inertia = 0.0;
        for (i, row) in x.outer_iter().enumerate() {
            let (label, distance) = nearest_centroid(&row, &centroids);
            labels[i] = label;
            inertia += distance * distance;
        }

        (centroids, labels, inertia)
    }

    /// k-means++ seeding: each next centroid is drawn with probability
    /// proportional to its squared distance from the nearest chosen one.
    fn plus_plus_init(&self, x: &Matrix, rng: &mut StdRng) -> Matrix {
        let n = x.nrows();
        let mut centroids = Matrix::zeros((self.n_clusters, x.ncols()));
        centroids.row_mut(0).assign(&x.row(rng.gen_range(0..n)));

        let mut dist_sq = vec![f64::INFINITY; n];
        for k in 1..self.n_clusters {
            for (i, row) in x.outer_iter().enumerate() {
                let d = euclidean_distance(&row, &centroids.row(k - 1));
                if d * d < dist_sq[i] {
                    dist_sq[i] = d * d;
                }
            }

            let total: f64 = dist_sq.iter().sum();
            let idx = if total > 0.0 {
                let target = rng.gen_range(0.0..total);
                let mut cumulative = 0.0;
                let mut chosen = n - 1;
                for (i, d) in dist_sq.iter().enumerate() {
                    cumulative += d;
                    if cumulative >= target {
                        chosen = i;
                        break;
                    }
                }
                chosen
            } else {
                // All points coincide with a centroid already.
                rng.gen_range(0..n)
            };
            centroids.row_mut(k).assign(&x.row(idx));
        }

        centroids
    }
}

fn nearest_centroid(row: &ArrayView1<f64>, centroids: &Matrix) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (k, center) in centroids.outer_iter().enumerate() {
        let distance = euclidean_distance(row, &center);
        if distance < best.1 {
            best = (k, distance);
        }
    }
    best
}

fn euclidean_distance(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

fn max_centroid_shift(old: &Matrix, new: &Matrix) -> f64 {
    old.outer_iter()
        .zip(new.outer_iter())
        .map(|(a, b)| euclidean_distance(&a, &b))
        .fold(0.0, f64::max)
}
