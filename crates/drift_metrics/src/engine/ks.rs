use crate::engine::{DriftContext, MetricEngine};
use crate::error::DriftError;
use crate::histogram::load_feature_columns;
use crate::math::ks_2samp;
use drift_types::{MetricResult, NumericalMetric};
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Two-sample Kolmogorov-Smirnov test on the raw column values. The metric
/// value is the p-value of the test.
pub struct KsTestEngine;

impl KsTestEngine {
    /// Exact p-values are only computed when both row counts are below
    /// `limit`.
    pub fn check_size(
        limit: usize,
        baseline_count: usize,
        production_count: usize,
    ) -> Result<(), DriftError> {
        if baseline_count >= limit || production_count >= limit {
            return Err(DriftError::DatasetSizeExceeded {
                limit,
                baseline: baseline_count,
                production: production_count,
            });
        }
        Ok(())
    }
}

impl MetricEngine for KsTestEngine {
    fn metric(&self) -> NumericalMetric {
        NumericalMetric::TwoSampleKolmogorovSmirnovTest
    }

    #[instrument(skip_all, name = "KS test", level = "debug")]
    fn compute(&self, ctx: &DriftContext) -> Result<Vec<MetricResult>, DriftError> {
        Self::check_size(
            ctx.settings.ks_max_rows,
            ctx.baseline_count,
            ctx.production_count,
        )?;

        let columns = load_feature_columns(ctx.baseline, ctx.production, ctx.columns)?;

        columns
            .par_iter()
            .map(|column| -> Result<MetricResult, DriftError> {
                let result = ks_2samp(&column.baseline.to_vec(), &column.production.to_vec())?;
                debug!(
                    "{}: ks statistic {} p-value {}",
                    column.name, result.statistic, result.p_value
                );

                Ok(MetricResult::new(&column.name, result.p_value, self.metric()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_settings::DriftSettings;
    use drift_types::Dataset;
    use ndarray::Array1;
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;

    #[test]
    fn test_size_guard() {
        assert!(matches!(
            KsTestEngine::check_size(10_000, 10_000, 10_000),
            Err(DriftError::DatasetSizeExceeded { limit: 10_000, .. })
        ));
        assert!(KsTestEngine::check_size(10_000, 9_999, 10_000).is_err());
        assert!(KsTestEngine::check_size(10_000, 9_999, 9_999).is_ok());
    }

    #[test]
    fn test_guard_runs_before_reading_columns() {
        // the column does not exist; the size guard must fail first
        let data = Dataset::from_columns(&[("x", vec![1.0])]).unwrap();
        let columns = vec!["missing".to_string()];
        let settings = DriftSettings::constants();
        let ctx = DriftContext {
            baseline: &data,
            production: &data,
            baseline_count: 10_000,
            production_count: 10_000,
            columns: &columns,
            settings: &settings,
        };

        let err = KsTestEngine.compute(&ctx).unwrap_err();
        assert!(matches!(err, DriftError::DatasetSizeExceeded { .. }));
        assert!(err.to_string().contains("10000"));
    }

    #[test]
    fn test_ks_below_limit() {
        let a = Array1::random(9_999, Uniform::new(0.0, 100.0)).to_vec();
        let b = Array1::random(9_999, Uniform::new(10.0, 110.0)).to_vec();
        let baseline = Dataset::from_columns(&[("a", a.clone()), ("b", a)]).unwrap();
        let production = Dataset::from_columns(&[("a", b.clone()), ("b", b)]).unwrap();
        let columns = vec!["a".to_string(), "b".to_string()];
        let settings = DriftSettings::constants();
        let ctx = DriftContext {
            baseline: &baseline,
            production: &production,
            baseline_count: 9_999,
            production_count: 9_999,
            columns: &columns,
            settings: &settings,
        };

        let rows = KsTestEngine.compute(&ctx).unwrap();

        assert_eq!(rows.len(), 2);
        for row in rows {
            assert!((0.0..=1.0).contains(&row.metric_value));
            assert_eq!(row.metric_name, "TwoSampleKolmogorovSmirnovTest");
        }
    }
}
