//! Clustering of the two time features into a fixed number of groups.
//!
//! # Example
//!
//! ```rust
//! use pelotype::KMeans;
//! use ndarray::array;
//!
//! let x = array![
//!     [1.0, 1.0],
//!     [1.2, 0.8],
//!     [8.0, 8.0],
//!     [8.2, 7.9]
//! ];
//!
//! let mut kmeans = KMeans::new(2).random_state(7);
//! let labels = kmeans.fit_predict(&x).unwrap();
//! assert_eq!(labels.len(), 4);
//!
//! // One centroid per cluster
//! let centers = kmeans.cluster_centers.as_ref().unwrap();
//! assert_eq!(centers.nrows(), 2);
//! ```

mod kmeans;

pub use kmeans::KMeans;
