use crate::error::DriftError;
use drift_types::{BucketEdgeTable, FeatureFrequencyMaps, FrequencyMap};
use ndarray::ArrayView1;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Bucket edge tables for every column, built once per invocation and shared
/// read-only with all workers of a classification pass.
pub type BroadcastEdgeTables = Arc<HashMap<String, BucketEdgeTable>>;

pub fn broadcast_edge_tables(maps: &FeatureFrequencyMaps) -> BroadcastEdgeTables {
    Arc::new(
        maps.features
            .iter()
            .map(|map| (map.feature.clone(), map.edge_table()))
            .collect(),
    )
}

/// Name of the bucket containing `value`.
///
/// A value belongs to a bucket when `low <= value < high`. The final bucket
/// also accepts `value == high`. Returns `None` when no bucket matches.
pub fn classify(value: f64, table: &BucketEdgeTable) -> Option<&str> {
    let last = table.buckets.len().checked_sub(1)?;

    table
        .buckets
        .iter()
        .enumerate()
        .find(|(i, bucket)| {
            (value >= bucket.low && value < bucket.high) || (*i == last && value == bucket.high)
        })
        .map(|(_, bucket)| bucket.name.as_str())
}

pub fn classify_column(values: &ArrayView1<f64>, table: &BucketEdgeTable) -> Vec<Option<String>> {
    values
        .as_slice()
        .map(|slice| {
            slice
                .par_iter()
                .map(|v| classify(*v, table).map(str::to_string))
                .collect()
        })
        .unwrap_or_else(|| {
            values
                .iter()
                .map(|v| classify(*v, table).map(str::to_string))
                .collect()
        })
}

/// Distribution of classified production values over the reference buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedDistribution {
    pub probabilities: Vec<f64>,
    pub unmatched: usize,
}

/// Classify `values` with `table` and express the bucket counts as
/// proportions of `total_count`, aligned to the bucket order of `reference`.
pub fn observed_distribution(
    feature: &str,
    values: &ArrayView1<f64>,
    table: &BucketEdgeTable,
    reference: &FrequencyMap,
    total_count: usize,
) -> Result<ObservedDistribution, DriftError> {
    if total_count == 0 {
        return Err(DriftError::EmptyDatasetError(feature.to_string()));
    }

    let positions: HashMap<&str, usize> = reference
        .buckets
        .iter()
        .enumerate()
        .map(|(i, bucket)| (bucket.name.as_str(), i))
        .collect();

    let mut counts = vec![0_u64; reference.buckets.len()];
    let mut unmatched = 0_usize;

    for label in classify_column(values, table) {
        match label {
            Some(name) => {
                let idx = positions.get(name.as_str()).ok_or_else(|| {
                    DriftError::FeatureNotExistError(format!("bucket {name} of {feature}"))
                })?;
                counts[*idx] += 1;
            }
            None => unmatched += 1,
        }
    }

    if unmatched > 0 {
        warn!(
            "{} values of {} did not match any reference bucket",
            unmatched, feature
        );
    }

    Ok(ObservedDistribution {
        probabilities: counts
            .iter()
            .map(|&count| count as f64 / total_count as f64)
            .collect(),
        unmatched,
    })
}
