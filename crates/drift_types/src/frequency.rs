use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Bucket {
    pub name: String,
    pub count: u64,
    pub probability: f64,
    pub low: f64,
    pub high: f64,
}

/// Per-bucket counts, probabilities and edge ranges for one column, in bin
/// order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FrequencyMap {
    pub feature: String,
    pub total_count: usize,
    pub buckets: Vec<Bucket>,
}

impl FrequencyMap {
    pub fn bucket_names(&self) -> Vec<&str> {
        self.buckets.iter().map(|b| b.name.as_str()).collect()
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.buckets.iter().map(|b| b.probability).collect()
    }

    pub fn count_map(&self) -> HashMap<String, u64> {
        self.buckets
            .iter()
            .map(|b| (b.name.clone(), b.count))
            .collect()
    }

    pub fn probability_map(&self) -> HashMap<String, f64> {
        self.buckets
            .iter()
            .map(|b| (b.name.clone(), b.probability))
            .collect()
    }

    pub fn edge_map(&self) -> HashMap<String, [f64; 2]> {
        self.buckets
            .iter()
            .map(|b| (b.name.clone(), [b.low, b.high]))
            .collect()
    }

    pub fn edge_table(&self) -> BucketEdgeTable {
        BucketEdgeTable {
            buckets: self
                .buckets
                .iter()
                .map(|b| BucketRange {
                    name: b.name.clone(),
                    low: b.low,
                    high: b.high,
                })
                .collect(),
        }
    }
}

/// Frequency maps for every requested column, ordered like the column list.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct FeatureFrequencyMaps {
    pub features: Vec<FrequencyMap>,
}

impl FeatureFrequencyMaps {
    pub fn get(&self, feature: &str) -> Option<&FrequencyMap> {
        self.features.iter().find(|map| map.feature == feature)
    }

    /// Ordered list of per-feature probability vectors.
    pub fn reference_distribution(&self) -> Vec<Vec<f64>> {
        self.features.iter().map(|map| map.probabilities()).collect()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BucketRange {
    pub name: String,
    pub low: f64,
    pub high: f64,
}

/// Read-only bucket lookup for a single column.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct BucketEdgeTable {
    pub buckets: Vec<BucketRange>,
}

impl BucketEdgeTable {
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
