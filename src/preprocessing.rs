use ndarray::Axis;

use crate::dataset::NumericTable;

// The identifier carries no distance information and the total is a linear
// combination of the two feature columns; both would bias the clustering.
const EXCLUDED_COLUMNS: [&str; 2] = ["id", "tt"];

/// Drops the non-feature columns from a table, keeping the rest in order.
///
/// Pure and idempotent: a table without excluded columns comes back
/// unchanged.
pub fn clean(table: &NumericTable) -> NumericTable {
    let kept: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .filter(|(_, name)| !EXCLUDED_COLUMNS.contains(&name.as_str()))
        .map(|(i, _)| i)
        .collect();

    NumericTable {
        columns: kept.iter().map(|&i| table.columns[i].clone()).collect(),
        data: table.data.select(Axis(1), &kept),
    }
}
