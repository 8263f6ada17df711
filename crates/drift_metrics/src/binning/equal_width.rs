use crate::error::DriftError;
use drift_types::{BinCountRule, BinEdges};
use ndarray::ArrayView1;
use ndarray_stats::QuantileExt;

/// Equal width binning over the combined range of a baseline and a production
/// column.
pub struct EqualWidthBinning {
    pub num_bins: usize,
}

impl EqualWidthBinning {
    pub fn new(num_bins: usize) -> Self {
        EqualWidthBinning {
            num_bins: num_bins.max(1),
        }
    }

    /// Derive the bin count from the smaller of the two dataset row counts.
    pub fn from_counts(rule: &BinCountRule, baseline_count: usize, production_count: usize) -> Self {
        Self::new(rule.num_bins(baseline_count.min(production_count)))
    }

    fn range(arr: &ArrayView1<f64>) -> Option<(f64, f64)> {
        let min_val = *arr.min().ok()?;
        let max_val = *arr.max().ok()?;
        Some((min_val, max_val))
    }

    /// Compute edges shared by both columns.
    ///
    /// # Arguments
    ///
    /// * `feature` - Name of the column, used for error reporting
    /// * `baseline` - Finite baseline values
    /// * `production` - Finite production values
    ///
    /// # Returns
    ///
    /// * `Result<BinEdges, DriftError>` - `num_bins + 1` edges, or `[min, max]` when the combined range is zero
    pub fn compute_edges(
        &self,
        feature: &str,
        baseline: &ArrayView1<f64>,
        production: &ArrayView1<f64>,
    ) -> Result<BinEdges, DriftError> {
        let (min_val, max_val) = match (Self::range(baseline), Self::range(production)) {
            (Some((b_min, b_max)), Some((p_min, p_max))) => (b_min.min(p_min), b_max.max(p_max)),
            (Some(range), None) | (None, Some(range)) => range,
            (None, None) => return Err(DriftError::EmptyColumnError(feature.to_string())),
        };

        let bin_width = (max_val - min_val) / self.num_bins as f64;

        // single bucket for zero variance columns
        if bin_width == 0.0 {
            return Ok(BinEdges::new(vec![min_val, max_val]));
        }

        let edges = (0..self.num_bins)
            .map(|i| min_val + bin_width * i as f64)
            .chain(std::iter::once(max_val))
            .collect();

        Ok(BinEdges::new(edges))
    }
}
