use crate::engine::binned::BinnedFeatures;
use crate::engine::{DriftContext, MetricEngine};
use crate::error::DriftError;
use crate::math::{normalize_by_stddev, wasserstein_distance};
use crate::stats::BaselineStats;
use drift_types::{MetricResult, NumericalMetric};
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Earth mover's distance over the shared bin centers, divided by the
/// baseline standard deviation of the column.
pub struct NormalizedWassersteinEngine;

impl MetricEngine for NormalizedWassersteinEngine {
    fn metric(&self) -> NumericalMetric {
        NumericalMetric::NormalizedWassersteinDistance
    }

    #[instrument(skip_all, name = "Normalized Wasserstein", level = "debug")]
    fn compute(&self, ctx: &DriftContext) -> Result<Vec<MetricResult>, DriftError> {
        let binned = BinnedFeatures::build(ctx)?;
        let stats = BaselineStats::compute(&binned.columns);
        let distributions = binned.distributions(ctx.production_count)?;
        let floor = ctx.settings.stddev_floor;

        distributions
            .par_iter()
            .map(|dist| -> Result<MetricResult, DriftError> {
                let distance = wasserstein_distance(&dist.observed, &dist.reference, &dist.centers)?;
                let stddev = stats.stddev(&dist.feature);
                let normalized = normalize_by_stddev(distance, stddev, floor);

                debug!(
                    "{}: wasserstein {} with baseline stddev {:?}",
                    dist.feature, distance, stddev
                );

                Ok(MetricResult::new(&dist.feature, normalized, self.metric()))
            })
            .collect()
    }
}
