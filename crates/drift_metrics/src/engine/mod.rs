pub mod binned;
pub mod jensen_shannon;
pub mod ks;
pub mod psi;
pub mod wasserstein;

pub use binned::BinnedFeatures;
pub use jensen_shannon::JensenShannonEngine;
pub use ks::KsTestEngine;
pub use psi::PsiEngine;
pub use wasserstein::NormalizedWassersteinEngine;

use crate::binning::EqualWidthBinning;
use crate::error::DriftError;
use drift_settings::DriftSettings;
use drift_types::{Dataset, MetricResult, NumericalMetric};

/// Inputs shared by every metric engine for one invocation.
pub struct DriftContext<'a> {
    pub baseline: &'a Dataset,
    pub production: &'a Dataset,
    pub baseline_count: usize,
    pub production_count: usize,
    pub columns: &'a [String],
    pub settings: &'a DriftSettings,
}

impl DriftContext<'_> {
    pub fn binning(&self) -> EqualWidthBinning {
        EqualWidthBinning::from_counts(
            &self.settings.bin_rule,
            self.baseline_count,
            self.production_count,
        )
    }
}

pub trait MetricEngine {
    fn metric(&self) -> NumericalMetric;

    /// One result row per column in `ctx.columns`, in the same order.
    fn compute(&self, ctx: &DriftContext) -> Result<Vec<MetricResult>, DriftError>;
}

#[allow(clippy::enum_variant_names)]
pub enum Engine {
    JensenShannon(JensenShannonEngine),
    NormalizedWasserstein(NormalizedWassersteinEngine),
    PopulationStabilityIndex(PsiEngine),
    KolmogorovSmirnov(KsTestEngine),
}

impl From<NumericalMetric> for Engine {
    fn from(metric: NumericalMetric) -> Self {
        match metric {
            NumericalMetric::JensenShannonDistance => Engine::JensenShannon(JensenShannonEngine),
            NumericalMetric::NormalizedWassersteinDistance => {
                Engine::NormalizedWasserstein(NormalizedWassersteinEngine)
            }
            NumericalMetric::PopulationStabilityIndex => Engine::PopulationStabilityIndex(PsiEngine),
            NumericalMetric::TwoSampleKolmogorovSmirnovTest => {
                Engine::KolmogorovSmirnov(KsTestEngine)
            }
        }
    }
}

impl MetricEngine for Engine {
    fn metric(&self) -> NumericalMetric {
        match self {
            Engine::JensenShannon(engine) => engine.metric(),
            Engine::NormalizedWasserstein(engine) => engine.metric(),
            Engine::PopulationStabilityIndex(engine) => engine.metric(),
            Engine::KolmogorovSmirnov(engine) => engine.metric(),
        }
    }

    fn compute(&self, ctx: &DriftContext) -> Result<Vec<MetricResult>, DriftError> {
        match self {
            Engine::JensenShannon(engine) => engine.compute(ctx),
            Engine::NormalizedWasserstein(engine) => engine.compute(ctx),
            Engine::PopulationStabilityIndex(engine) => engine.compute(ctx),
            Engine::KolmogorovSmirnov(engine) => engine.compute(ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_engine_matches_metric() {
        for name in NumericalMetric::valid_names() {
            let metric = NumericalMetric::from_str(name).unwrap();
            assert_eq!(Engine::from(metric).metric(), metric);
        }
    }
}
