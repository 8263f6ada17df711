use crate::engine::binned::BinnedFeatures;
use crate::engine::{DriftContext, MetricEngine};
use crate::error::DriftError;
use crate::math::jensen_shannon_distance;
use drift_types::{MetricResult, NumericalMetric};
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Jensen-Shannon distance between each feature's production distribution,
/// remapped into the baseline buckets, and the baseline reference distribution.
pub struct JensenShannonEngine;

impl MetricEngine for JensenShannonEngine {
    fn metric(&self) -> NumericalMetric {
        NumericalMetric::JensenShannonDistance
    }

    #[instrument(skip_all, name = "Jensen-Shannon", level = "debug")]
    fn compute(&self, ctx: &DriftContext) -> Result<Vec<MetricResult>, DriftError> {
        let binned = BinnedFeatures::build(ctx)?;
        let distributions = binned.distributions(ctx.production_count)?;

        distributions
            .par_iter()
            .map(|dist| -> Result<MetricResult, DriftError> {
                let distance = jensen_shannon_distance(&dist.observed, &dist.reference)?;
                debug!("{}: js distance {}", dist.feature, distance);
                Ok(MetricResult::new(&dist.feature, distance, self.metric()))
            })
            .collect()
    }
}
