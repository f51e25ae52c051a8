//! Synthetic cyclist dataset: generation, delimited-file storage and the
//! numeric view handed to the clustering stages.

use std::fs;
use std::path::Path;

use ndarray_rand::rand_distr::{Distribution, Normal};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::Matrix;
use crate::archetype::Archetype;
use crate::error::{Error, Result};

/// Mean climb time in seconds for a steady climber.
pub const STEADY_CLIMB_MEAN: f64 = 3240.0;
/// Mean climb time in seconds for a weak climber.
pub const WEAK_CLIMB_MEAN: f64 = 4268.0;
/// Mean descent time in seconds for a steady descender.
pub const STEADY_DESCENT_MEAN: f64 = 1440.0;
/// Mean descent time in seconds for a weak descender.
pub const WEAK_DESCENT_MEAN: f64 = 2160.0;
/// Shared standard deviation of both times, in seconds.
pub const TIME_STD_DEV: f64 = 240.0;

/// One cyclist's climb/descent run over the course.
///
/// Serialized column names follow the dataset wire format
/// `id;tp;tb;tt;tipus`. Generated records carry a ground-truth archetype;
/// records submitted for prediction do not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyclistRecord {
    pub id: u32,
    #[serde(rename = "tp")]
    pub climb: i64,
    #[serde(rename = "tb")]
    pub descent: i64,
    #[serde(rename = "tt")]
    pub total: i64,
    #[serde(rename = "tipus")]
    pub archetype: Option<Archetype>,
}

impl CyclistRecord {
    pub fn new(id: u32, climb: i64, descent: i64, archetype: Option<Archetype>) -> Self {
        Self {
            id,
            climb,
            descent,
            total: climb + descent,
            archetype,
        }
    }
}

/// Sampling parameters for one archetype, used only at generation time.
#[derive(Debug, Clone, Copy)]
pub struct ArchetypeParams {
    pub archetype: Archetype,
    pub mean_climb: f64,
    pub mean_descent: f64,
    pub std_dev: f64,
}

/// The four canonical archetype parameter sets.
pub fn canonical_params() -> [ArchetypeParams; 4] {
    [
        ArchetypeParams {
            archetype: Archetype::SteadySteady,
            mean_climb: STEADY_CLIMB_MEAN,
            mean_descent: STEADY_DESCENT_MEAN,
            std_dev: TIME_STD_DEV,
        },
        ArchetypeParams {
            archetype: Archetype::SteadyWeak,
            mean_climb: STEADY_CLIMB_MEAN,
            mean_descent: WEAK_DESCENT_MEAN,
            std_dev: TIME_STD_DEV,
        },
        ArchetypeParams {
            archetype: Archetype::WeakSteady,
            mean_climb: WEAK_CLIMB_MEAN,
            mean_descent: STEADY_DESCENT_MEAN,
            std_dev: TIME_STD_DEV,
        },
        ArchetypeParams {
            archetype: Archetype::WeakWeak,
            mean_climb: WEAK_CLIMB_MEAN,
            mean_descent: WEAK_DESCENT_MEAN,
            std_dev: TIME_STD_DEV,
        },
    ]
}

/// Draws `count` records for one archetype, ids assigned sequentially from
/// `start_id + 1`. Times are sampled from Normal(mean, std_dev) and
/// truncated toward zero to whole seconds.
pub fn generate_archetype(
    count: usize,
    start_id: u32,
    params: &ArchetypeParams,
    rng: &mut impl Rng,
) -> Result<Vec<CyclistRecord>> {
    let climb = Normal::new(params.mean_climb, params.std_dev)
        .map_err(|e| Error::Config(format!("invalid climb distribution: {e}")))?;
    let descent = Normal::new(params.mean_descent, params.std_dev)
        .map_err(|e| Error::Config(format!("invalid descent distribution: {e}")))?;

    Ok((0..count)
        .map(|i| {
            CyclistRecord::new(
                start_id + i as u32 + 1,
                climb.sample(rng) as i64,
                descent.sample(rng) as i64,
                Some(params.archetype),
            )
        })
        .collect())
}

/// Generates `count_per_archetype` records for every parameter set and
/// returns them sorted ascending by total time (stable, so equal totals keep
/// generation order). A fixed seed reproduces the exact same dataset.
pub fn generate_peloton(
    count_per_archetype: usize,
    params: &[ArchetypeParams],
    seed: Option<u64>,
) -> Result<Vec<CyclistRecord>> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut records = Vec::with_capacity(count_per_archetype * params.len());
    for (slot, archetype_params) in params.iter().enumerate() {
        let start_id = (slot * count_per_archetype) as u32;
        records.extend(generate_archetype(
            count_per_archetype,
            start_id,
            archetype_params,
            &mut rng,
        )?);
    }

    records.sort_by_key(|r| r.total);
    Ok(records)
}

/// Writes records as `;`-delimited UTF-8 with the `id;tp;tb;tt;tipus`
/// header, creating the parent directory if missing.
pub fn store_records<P: AsRef<Path>>(path: P, records: &[CyclistRecord]) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_path(&path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a `;`-delimited dataset written by [`store_records`].
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<CyclistRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .from_path(path)?;

    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}

/// A numeric table with named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericTable {
    pub columns: Vec<String>,
    pub data: Matrix,
}

impl NumericTable {
    pub fn new(columns: Vec<String>, data: Matrix) -> Result<Self> {
        if columns.len() != data.ncols() {
            return Err(Error::Config(format!(
                "table has {} column names for {} data columns",
                columns.len(),
                data.ncols()
            )));
        }
        Ok(Self { columns, data })
    }

    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    /// Index of the named column, if present.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Numeric view of the records (columns id, tp, tb, tt); the label column is
/// not numeric and stays behind on the records.
pub fn numeric_table(records: &[CyclistRecord]) -> NumericTable {
    let mut data = Matrix::zeros((records.len(), 4));
    for (i, record) in records.iter().enumerate() {
        data[[i, 0]] = record.id as f64;
        data[[i, 1]] = record.climb as f64;
        data[[i, 2]] = record.descent as f64;
        data[[i, 3]] = record.total as f64;
    }
    NumericTable {
        columns: ["id", "tp", "tb", "tt"].map(String::from).to_vec(),
        data,
    }
}

/// Ground-truth archetypes of the labeled records, in table order.
pub fn true_labels(records: &[CyclistRecord]) -> Vec<Archetype> {
    records.iter().filter_map(|r| r.archetype).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_counts_and_labels() {
        let records = generate_peloton(25, &canonical_params(), Some(7)).unwrap();
        assert_eq!(records.len(), 100);

        for archetype in Archetype::ALL {
            let count = records
                .iter()
                .filter(|r| r.archetype == Some(archetype))
                .count();
            assert_eq!(count, 25);
        }

        // Ids are unique across archetypes.
        let mut ids: Vec<u32> = records.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_generate_sorted_by_total_time() {
        let records = generate_peloton(50, &canonical_params(), Some(7)).unwrap();
        for pair in records.windows(2) {
            assert!(pair[0].total <= pair[1].total);
        }
        for record in &records {
            assert_eq!(record.total, record.climb + record.descent);
        }
    }

    #[test]
    fn test_generate_is_reproducible() {
        let a = generate_peloton(30, &canonical_params(), Some(42)).unwrap();
        let b = generate_peloton(30, &canonical_params(), Some(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_means_converge() {
        let records = generate_peloton(2000, &canonical_params(), Some(42)).unwrap();

        for params in canonical_params() {
            let times: Vec<(i64, i64)> = records
                .iter()
                .filter(|r| r.archetype == Some(params.archetype))
                .map(|r| (r.climb, r.descent))
                .collect();
            let n = times.len() as f64;
            let climb_mean = times.iter().map(|(c, _)| *c as f64).sum::<f64>() / n;
            let descent_mean = times.iter().map(|(_, d)| *d as f64).sum::<f64>() / n;

            // Statistical property: std error ~5.4s at n=2000, sigma=240.
            assert!((climb_mean - params.mean_climb).abs() < 25.0);
            assert!((descent_mean - params.mean_descent).abs() < 25.0);
        }
    }

    #[test]
    fn test_equal_totals_keep_generation_order() {
        // Zero spread makes every total identical within an archetype and
        // equal across these two, so the sort must preserve input order.
        let params = [
            ArchetypeParams {
                archetype: Archetype::SteadySteady,
                mean_climb: 100.0,
                mean_descent: 200.0,
                std_dev: 0.0,
            },
            ArchetypeParams {
                archetype: Archetype::WeakWeak,
                mean_climb: 200.0,
                mean_descent: 100.0,
                std_dev: 0.0,
            },
        ];

        let records = generate_peloton(3, &params, Some(1)).unwrap();
        let labels: Vec<Option<Archetype>> = records.iter().map(|r| r.archetype).collect();
        assert_eq!(
            labels,
            vec![
                Some(Archetype::SteadySteady),
                Some(Archetype::SteadySteady),
                Some(Archetype::SteadySteady),
                Some(Archetype::WeakWeak),
                Some(Archetype::WeakWeak),
                Some(Archetype::WeakWeak),
            ]
        );
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("cyclists.csv");

        let records = generate_peloton(10, &canonical_params(), Some(3)).unwrap();
        store_records(&path, &records).unwrap();

        let header = std::fs::read_to_string(&path).unwrap();
        assert!(header.starts_with("id;tp;tb;tt;tipus\n"));

        let loaded = load_records(&path).unwrap();
        assert_eq!(records, loaded);
    }

    #[test]
    fn test_store_into_existing_directory_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cyclists.csv");

        let records = generate_peloton(2, &canonical_params(), Some(3)).unwrap();
        store_records(&path, &records).unwrap();
        store_records(&path, &records).unwrap();
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(load_records("no/such/file.csv").is_err());
    }

    #[test]
    fn test_numeric_table_shape() {
        let records = vec![
            CyclistRecord::new(1, 3000, 1500, Some(Archetype::SteadySteady)),
            CyclistRecord::new(2, 4200, 2100, Some(Archetype::WeakWeak)),
        ];

        let table = numeric_table(&records);
        assert_eq!(table.columns, vec!["id", "tp", "tb", "tt"]);
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.data[[0, 1]], 3000.0);
        assert_eq!(table.data[[1, 3]], 6300.0);
        assert_eq!(table.column("tb"), Some(2));
        assert_eq!(table.column("tipus"), None);
    }

    #[test]
    fn test_numeric_table_validates_column_count() {
        let result = NumericTable::new(vec!["a".to_string()], Matrix::zeros((2, 2)));
        assert!(result.is_err());
    }

    #[test]
    fn test_true_labels_preserve_order() {
        let records = vec![
            CyclistRecord::new(1, 3000, 1500, Some(Archetype::WeakSteady)),
            CyclistRecord::new(2, 3100, 1600, None),
            CyclistRecord::new(3, 4200, 2100, Some(Archetype::WeakWeak)),
        ];

        assert_eq!(
            true_labels(&records),
            vec![Archetype::WeakSteady, Archetype::WeakWeak]
        );
    }
}
