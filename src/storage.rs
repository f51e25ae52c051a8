//! Opaque binary persistence of training artifacts.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

pub const MODEL_FILE: &str = "clustering_model.bin";
pub const SCORES_FILE: &str = "scores.bin";
pub const ASSIGNMENT_FILE: &str = "assignment.bin";

/// Serializes `value` to `path` as an opaque bincode blob, creating the
/// parent directory if missing.
pub fn store<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(writer, value)?;
    Ok(())
}

/// Reads back a value written by [`store`].
pub fn load<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let reader = BufReader::new(File::open(path)?);
    Ok(bincode::deserialize_from(reader)?)
}
