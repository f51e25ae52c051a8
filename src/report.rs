//! Per-archetype membership manifests.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::archetype::{Archetype, ClusterAssignment};
use crate::dataset::CyclistRecord;
use crate::error::{Error, Result};

pub const DEFAULT_REPORTS_DIR: &str = "informes";

/// Writes one `<label>.txt` manifest per archetype into `dir`, listing the
/// ids of the records whose cluster the archetype was associated with, one
/// per line in table order. Creates `dir` if missing; an existing directory
/// is fine. Returns the written paths in canonical archetype order.
pub fn write_reports<P: AsRef<Path>>(
    dir: P,
    records: &[CyclistRecord],
    labels: &[usize],
    assignment: &ClusterAssignment,
) -> Result<Vec<PathBuf>> {
    if records.len() != labels.len() {
        return Err(Error::LabelLength(records.len(), labels.len()));
    }

    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(Archetype::ALL.len());
    for archetype in Archetype::ALL {
        let cluster = assignment.cluster_of(archetype);
        let path = dir.join(format!("{}.txt", archetype.label()));

        let mut out = BufWriter::new(File::create(&path)?);
        for (record, _) in records
            .iter()
            .zip(labels)
            .filter(|(_, label)| **label == cluster)
        {
            writeln!(out, "{}", record.id)?;
        }
        out.flush()?;

        written.push(path);
    }

    tracing::info!(dir = %dir.display(), "wrote archetype membership reports");
    Ok(written)
}
