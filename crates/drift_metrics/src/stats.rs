use crate::histogram::FeatureColumn;
use ndarray::ArrayView1;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

/// Sample standard deviation (ddof = 1) of a 1d array.
///
/// Returns `None` for fewer than two values.
pub fn compute_stddev(array: &ArrayView1<f64>) -> Option<f64> {
    if array.len() < 2 {
        return None;
    }
    Some(array.std(1.0))
}

/// Baseline standard deviation per column, shared read-only with the workers
/// that normalize Wasserstein distances.
#[derive(Debug, Clone, Default)]
pub struct BaselineStats {
    pub stddev: HashMap<String, Option<f64>>,
}

impl BaselineStats {
    pub fn compute(columns: &[FeatureColumn]) -> Arc<Self> {
        let stddev = columns
            .par_iter()
            .map(|column| (column.name.clone(), compute_stddev(&column.baseline.view())))
            .collect();

        Arc::new(BaselineStats { stddev })
    }

    pub fn stddev(&self, feature: &str) -> Option<f64> {
        self.stddev.get(feature).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{arr1, Array1};

    #[test]
    fn test_compute_stddev() {
        let array = arr1(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        // population stddev is 2.0, sample stddev is sqrt(32 / 7)
        assert_abs_diff_eq!(
            compute_stddev(&array.view()).unwrap(),
            (32.0_f64 / 7.0).sqrt(),
            epsilon = 1e-12
        );
        assert_eq!(compute_stddev(&arr1(&[1.0]).view()), None);
    }

    #[test]
    fn test_baseline_stats() {
        let columns = vec![
            FeatureColumn {
                name: "a".to_string(),
                baseline: arr1(&[1.0, 1.0, 1.0]),
                production: arr1(&[2.0]),
            },
            FeatureColumn {
                name: "b".to_string(),
                baseline: Array1::zeros(1),
                production: arr1(&[2.0]),
            },
        ];

        let stats = BaselineStats::compute(&columns);

        assert_eq!(stats.stddev("a"), Some(0.0));
        assert_eq!(stats.stddev("b"), None);
        assert_eq!(stats.stddev("missing"), None);
    }
}
