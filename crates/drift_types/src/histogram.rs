use serde::{Deserialize, Serialize};

/// Ordered bin boundaries shared by the baseline and production histograms of
/// one column.
///
/// Bin `i` covers `[edges[i], edges[i + 1])`, except the final bin which is
/// closed on both ends. A zero-variance column is represented by the two
/// identical edges `[v, v]`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BinEdges {
    pub edges: Vec<f64>,
}

impl BinEdges {
    pub fn new(edges: Vec<f64>) -> Self {
        BinEdges { edges }
    }

    pub fn num_bins(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    pub fn min(&self) -> Option<f64> {
        self.edges.first().copied()
    }

    pub fn max(&self) -> Option<f64> {
        self.edges.last().copied()
    }

    /// Index of the bin containing `value`, or `None` when it falls outside
    /// the edge range.
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        let (first, last) = (self.min()?, self.max()?);
        let num_bins = self.num_bins();

        if num_bins == 0 || value < first || value > last {
            return None;
        }

        // last bin is closed on the right
        if value == last {
            return Some(num_bins - 1);
        }

        let idx = self.edges.partition_point(|&edge| edge <= value);
        Some(idx.saturating_sub(1).min(num_bins - 1))
    }

    /// Midpoints of every bin, used as the support of binned distributions.
    pub fn centers(&self) -> Vec<f64> {
        self.edges
            .windows(2)
            .map(|pair| (pair[0] + pair[1]) / 2.0)
            .collect()
    }
}

/// Bin counts for one column tabulated onto a set of [`BinEdges`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Histogram {
    pub edges: BinEdges,
    pub counts: Vec<u64>,
}

impl Histogram {
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn num_bins(&self) -> usize {
        self.counts.len()
    }
}
