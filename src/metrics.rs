//! Cluster-quality scores comparing a predicted grouping against
//! ground-truth labels.

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The three scores evaluated after every training run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterScores {
    pub homogeneity: f64,
    pub completeness: f64,
    pub v_measure: f64,
}

/// 1.0 when every cluster contains only members of a single class.
pub fn homogeneity_score<C, K>(labels_true: &[C], labels_pred: &[K]) -> Result<f64>
where
    C: Eq + Hash,
    K: Eq + Hash,
{
    let e = entropies(labels_true, labels_pred)?;
    Ok(e.homogeneity())
}

/// 1.0 when all members of a class end up in the same cluster.
pub fn completeness_score<C, K>(labels_true: &[C], labels_pred: &[K]) -> Result<f64>
where
    C: Eq + Hash,
    K: Eq + Hash,
{
    let e = entropies(labels_true, labels_pred)?;
    Ok(e.completeness())
}

/// Harmonic mean of homogeneity and completeness.
pub fn v_measure_score<C, K>(labels_true: &[C], labels_pred: &[K]) -> Result<f64>
where
    C: Eq + Hash,
    K: Eq + Hash,
{
    let e = entropies(labels_true, labels_pred)?;
    Ok(v_measure(e.homogeneity(), e.completeness()))
}

/// All three scores from a single pass over the labels.
pub fn score_clustering<C, K>(labels_true: &[C], labels_pred: &[K]) -> Result<ClusterScores>
where
    C: Eq + Hash,
    K: Eq + Hash,
{
    let e = entropies(labels_true, labels_pred)?;
    let homogeneity = e.homogeneity();
    let completeness = e.completeness();
    Ok(ClusterScores {
        homogeneity,
        completeness,
        v_measure: v_measure(homogeneity, completeness),
    })
}

fn v_measure(homogeneity: f64, completeness: f64) -> f64 {
    if homogeneity + completeness == 0.0 {
        0.0
    } else {
        2.0 * homogeneity * completeness / (homogeneity + completeness)
    }
}

struct Entropies {
    class: f64,
    cluster: f64,
    class_given_cluster: f64,
    cluster_given_class: f64,
}

impl Entropies {
    fn homogeneity(&self) -> f64 {
        if self.class == 0.0 {
            1.0
        } else {
            1.0 - self.class_given_cluster / self.class
        }
    }

    fn completeness(&self) -> f64 {
        if self.cluster == 0.0 {
            1.0
        } else {
            1.0 - self.cluster_given_class / self.cluster
        }
    }
}

fn entropies<C, K>(labels_true: &[C], labels_pred: &[K]) -> Result<Entropies>
where
    C: Eq + Hash,
    K: Eq + Hash,
{
    if labels_true.len() != labels_pred.len() {
        return Err(Error::LabelLength(labels_true.len(), labels_pred.len()));
    }

    let n = labels_true.len() as f64;
    if labels_true.is_empty() {
        return Ok(Entropies {
            class: 0.0,
            cluster: 0.0,
            class_given_cluster: 0.0,
            cluster_given_class: 0.0,
        });
    }

    let mut class_counts: HashMap<&C, f64> = HashMap::new();
    let mut cluster_counts: HashMap<&K, f64> = HashMap::new();
    let mut joint: HashMap<(&C, &K), f64> = HashMap::new();
    for (class, cluster) in labels_true.iter().zip(labels_pred) {
        *class_counts.entry(class).or_insert(0.0) += 1.0;
        *cluster_counts.entry(cluster).or_insert(0.0) += 1.0;
        *joint.entry((class, cluster)).or_insert(0.0) += 1.0;
    }

    let mut class_given_cluster = 0.0;
    let mut cluster_given_class = 0.0;
    for ((class, cluster), count) in &joint {
        class_given_cluster -= (count / n) * (count / cluster_counts[cluster]).ln();
        cluster_given_class -= (count / n) * (count / class_counts[class]).ln();
    }

    Ok(Entropies {
        class: entropy(&class_counts, n),
        cluster: entropy(&cluster_counts, n),
        class_given_cluster,
        cluster_given_class,
    })
}

fn entropy<T>(counts: &HashMap<T, f64>, n: f64) -> f64 {
    -counts
        .values()
        .map(|count| (count / n) * (count / n).ln())
        .sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perfect_clustering_scores_one() {
        let truth = ["a", "a", "b", "b"];
        // Cluster indices are arbitrary, only the grouping matters.
        let pred = [1usize, 1, 0, 0];

        let scores = score_clustering(&truth, &pred).unwrap();
        assert_relative_eq!(scores.homogeneity, 1.0);
        assert_relative_eq!(scores.completeness, 1.0);
        assert_relative_eq!(scores.v_measure, 1.0);
    }

    #[test]
    fn test_single_cluster_is_complete_but_not_homogeneous() {
        let truth = ["a", "a", "b", "b"];
        let pred = [0usize, 0, 0, 0];

        assert_relative_eq!(homogeneity_score(&truth, &pred).unwrap(), 0.0);
        assert_relative_eq!(completeness_score(&truth, &pred).unwrap(), 1.0);
        assert_relative_eq!(v_measure_score(&truth, &pred).unwrap(), 0.0);
    }

    #[test]
    fn test_over_split_clustering() {
        // Homogeneous (each cluster is pure) but incomplete (classes split
        // over two clusters): c = 1 - ln2/ln4 = 0.5, v = 2/3.
        let truth = ["a", "a", "b", "b"];
        let pred = [0usize, 1, 2, 3];

        let scores = score_clustering(&truth, &pred).unwrap();
        assert_relative_eq!(scores.homogeneity, 1.0);
        assert_relative_eq!(scores.completeness, 0.5, epsilon = 1e-12);
        assert_relative_eq!(scores.v_measure, 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_independent_labels_score_zero() {
        let truth = ["a", "a", "b", "b"];
        let pred = [0usize, 1, 0, 1];

        let scores = score_clustering(&truth, &pred).unwrap();
        assert_relative_eq!(scores.homogeneity, 0.0, epsilon = 1e-12);
        assert_relative_eq!(scores.completeness, 0.0, epsilon = 1e-12);
        assert_relative_eq!(scores.v_measure, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_class_truth() {
        let truth = ["a", "a", "a"];
        let pred = [0usize, 1, 2];

        assert_relative_eq!(homogeneity_score(&truth, &pred).unwrap(), 1.0);
        assert_relative_eq!(completeness_score(&truth, &pred).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let truth = ["a", "b"];
        let pred = [0usize];
        assert!(matches!(
            score_clustering(&truth, &pred),
            Err(Error::LabelLength(2, 1))
        ));
    }
}
