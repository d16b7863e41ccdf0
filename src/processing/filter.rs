use crate::data::dataset::TabularDataset;

/// Rows of `dataset` where any cell contains `query` (case-sensitive, plain substring).
///
/// May return a dataset with no rows; the caller decides what to do with that.
pub fn apply(dataset: &TabularDataset, query: &str) -> TabularDataset {
    let rows = dataset
        .rows()
        .iter()
        .filter(|row| row.iter().any(|cell| cell.contains(query)))
        .cloned()
        .collect();
    dataset.with_rows(rows)
}

/// A fresh copy of the load-time snapshot.
pub fn reset(original: &TabularDataset) -> TabularDataset {
    original.snapshot()
}
