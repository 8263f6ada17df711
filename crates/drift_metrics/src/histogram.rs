use crate::binning::EqualWidthBinning;
use crate::error::DriftError;
use drift_types::{BinEdges, Dataset, Histogram};
use itertools::Itertools;
use ndarray::{Array1, ArrayView1};
use rayon::prelude::*;
use tracing::debug;

/// Baseline and production values of one numerical column.
#[derive(Debug, Clone)]
pub struct FeatureColumn {
    pub name: String,
    pub baseline: Array1<f64>,
    pub production: Array1<f64>,
}

/// Read every requested column from both datasets.
///
/// Fails on the first column that is missing or non-numeric in either dataset.
pub fn load_feature_columns(
    baseline: &Dataset,
    production: &Dataset,
    columns: &[String],
) -> Result<Vec<FeatureColumn>, DriftError> {
    columns
        .iter()
        .map(|name| -> Result<FeatureColumn, DriftError> {
            Ok(FeatureColumn {
                name: name.clone(),
                baseline: baseline.numeric_column(name)?,
                production: production.numeric_column(name)?,
            })
        })
        .collect()
}

/// Compute the bin counts for a 1d array of data
///
/// # Arguments
///
/// * `data` - A 1d array of data
/// * `edges` - Bin edges. Values outside the edge range are not counted
///
/// # Returns
/// * `Vec<u64>` - A vector of bin counts
pub fn compute_bin_counts(data: &ArrayView1<f64>, edges: &BinEdges) -> Vec<u64> {
    let mut counts = vec![0_u64; edges.num_bins()];

    data.iter()
        .filter_map(|value| edges.bin_index(*value))
        .for_each(|idx| counts[idx] += 1);

    counts
}

#[derive(Debug, Clone)]
pub struct FeatureHistograms {
    pub feature: String,
    pub edges: BinEdges,
    pub baseline: Histogram,
    pub production: Histogram,
}

/// Histograms of baseline and production tabulated onto shared edges, one
/// entry per column in request order.
#[derive(Debug, Clone)]
pub struct DualHistograms {
    pub features: Vec<FeatureHistograms>,
}

impl DualHistograms {
    pub fn build(
        columns: &[FeatureColumn],
        binning: &EqualWidthBinning,
    ) -> Result<Self, DriftError> {
        let features = columns
            .par_iter()
            .map(|column| -> Result<FeatureHistograms, DriftError> {
                let edges = binning.compute_edges(
                    &column.name,
                    &column.baseline.view(),
                    &column.production.view(),
                )?;

                let baseline = Histogram {
                    edges: edges.clone(),
                    counts: compute_bin_counts(&column.baseline.view(), &edges),
                };
                let production = Histogram {
                    edges: edges.clone(),
                    counts: compute_bin_counts(&column.production.view(), &edges),
                };

                debug!(
                    "Built {} bins for {} (baseline counts: [{}])",
                    edges.num_bins(),
                    column.name,
                    baseline.counts.iter().join(", ")
                );

                Ok(FeatureHistograms {
                    feature: column.name.clone(),
                    edges,
                    baseline,
                    production,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DualHistograms { features })
    }

    pub fn get(&self, feature: &str) -> Option<&FeatureHistograms> {
        self.features.iter().find(|h| h.feature == feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;
    use ndarray_rand::rand_distr::Normal;
    use ndarray_rand::RandomExt;

    #[test]
    fn test_compute_bin_counts_keeps_max_value() {
        let edges = BinEdges::new(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let data = arr1(&[1.0, 1.0, 1.0, 1.0, 5.0, 5.0, 5.0, 5.0]);

        let counts = compute_bin_counts(&data.view(), &edges);

        assert_eq!(counts, vec![4, 0, 0, 4]);
    }

    #[test]
    fn test_dual_histograms_total() {
        let baseline = Array1::random(10_000, Normal::new(0.0, 1.0).unwrap());
        let production = Array1::random(5_000, Normal::new(0.5, 1.0).unwrap());
        let columns = vec![FeatureColumn {
            name: "feature_1".to_string(),
            baseline,
            production,
        }];

        let histograms = DualHistograms::build(&columns, &EqualWidthBinning::new(14)).unwrap();
        let feature = histograms.get("feature_1").unwrap();

        assert_eq!(feature.baseline.total(), 10_000);
        assert_eq!(feature.production.total(), 5_000);
        assert_eq!(feature.baseline.edges, feature.production.edges);
    }

    #[test]
    fn test_load_feature_columns_missing() {
        let baseline = Dataset::from_columns(&[("a", vec![1.0, 2.0])]).unwrap();
        let production = Dataset::from_columns(&[("b", vec![1.0, 2.0])]).unwrap();

        let result = load_feature_columns(&baseline, &production, &["a".to_string()]);
        assert!(matches!(result, Err(DriftError::TypeError(_))));
    }
}
