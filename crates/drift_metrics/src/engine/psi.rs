use crate::engine::{DriftContext, MetricEngine};
use crate::error::DriftError;
use crate::histogram::{load_feature_columns, DualHistograms};
use crate::math::population_stability_index;
use drift_types::{MetricResult, NumericalMetric};
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Population stability index computed straight from the shared histograms.
pub struct PsiEngine;

impl MetricEngine for PsiEngine {
    fn metric(&self) -> NumericalMetric {
        NumericalMetric::PopulationStabilityIndex
    }

    #[instrument(skip_all, name = "PSI", level = "debug")]
    fn compute(&self, ctx: &DriftContext) -> Result<Vec<MetricResult>, DriftError> {
        let columns = load_feature_columns(ctx.baseline, ctx.production, ctx.columns)?;
        let histograms = DualHistograms::build(&columns, &ctx.binning())?;

        histograms
            .features
            .par_iter()
            .map(|feature| -> Result<MetricResult, DriftError> {
                let psi = population_stability_index(
                    &feature.baseline.counts,
                    &feature.production.counts,
                    ctx.baseline_count,
                    ctx.production_count,
                )?;
                debug!("{}: psi {}", feature.feature, psi);

                Ok(MetricResult::new(&feature.feature, psi, self.metric()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use drift_settings::DriftSettings;
    use drift_types::Dataset;

    #[test]
    fn test_psi_identical_is_zero() {
        let data =
            Dataset::from_columns(&[("x", vec![1.0, 1.0, 1.0, 1.0, 5.0, 5.0, 5.0, 5.0])]).unwrap();
        let columns = vec!["x".to_string()];
        let settings = DriftSettings::constants();
        let ctx = DriftContext {
            baseline: &data,
            production: &data,
            baseline_count: 8,
            production_count: 8,
            columns: &columns,
            settings: &settings,
        };

        let rows = PsiEngine.compute(&ctx).unwrap();

        assert_eq!(rows.len(), 1);
        assert_abs_diff_eq!(rows[0].metric_value, 0.0, epsilon = 1e-12);
        assert_eq!(rows[0].metric_name, "PopulationStabilityIndex");
    }

    #[test]
    fn test_psi_detects_shift() {
        let baseline =
            Dataset::from_columns(&[("x", vec![1.0, 1.0, 1.0, 1.0, 5.0, 5.0, 5.0, 5.0])]).unwrap();
        let production =
            Dataset::from_columns(&[("x", vec![1.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0])]).unwrap();
        let columns = vec!["x".to_string()];
        let settings = DriftSettings::constants();
        let ctx = DriftContext {
            baseline: &baseline,
            production: &production,
            baseline_count: 8,
            production_count: 8,
            columns: &columns,
            settings: &settings,
        };

        let rows = PsiEngine.compute(&ctx).unwrap();

        // bins [1, 2, 3, 4, 5]; smoothed counts 5/1/1/5 against 2/1/1/8
        let expected = (2.0 / 8.0 - 5.0 / 8.0) * (2.0_f64 / 5.0).ln()
            + (8.0 / 8.0 - 5.0 / 8.0) * (8.0_f64 / 5.0).ln();
        assert_abs_diff_eq!(rows[0].metric_value, expected, epsilon = 1e-12);
    }
}
