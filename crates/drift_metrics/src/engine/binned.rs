use crate::bucket::{broadcast_edge_tables, observed_distribution, BroadcastEdgeTables};
use crate::engine::DriftContext;
use crate::error::DriftError;
use crate::frequency::{compute_feature_frequency_maps, Side};
use crate::histogram::{load_feature_columns, DualHistograms, FeatureColumn};
use drift_types::FeatureFrequencyMaps;
use rayon::prelude::*;

/// Per-feature reference and observed distributions over the baseline buckets.
#[derive(Debug, Clone)]
pub struct BucketDistributions {
    pub feature: String,
    pub reference: Vec<f64>,
    pub observed: Vec<f64>,
    pub centers: Vec<f64>,
}

/// Shared histogram pipeline of the bucket based engines.
///
/// Builds shared edges and histograms, the frequency maps of both datasets,
/// and remaps production values into the baseline buckets.
pub struct BinnedFeatures {
    pub columns: Vec<FeatureColumn>,
    pub histograms: DualHistograms,
    pub baseline_maps: FeatureFrequencyMaps,
    pub production_maps: FeatureFrequencyMaps,
}

impl BinnedFeatures {
    pub fn build(ctx: &DriftContext) -> Result<Self, DriftError> {
        let columns = load_feature_columns(ctx.baseline, ctx.production, ctx.columns)?;
        let histograms = DualHistograms::build(&columns, &ctx.binning())?;

        let precision = ctx.settings.bucket_precision;
        let baseline_maps = compute_feature_frequency_maps(
            &histograms.features,
            Side::Baseline,
            ctx.baseline_count,
            precision,
        )?;
        let production_maps = compute_feature_frequency_maps(
            &histograms.features,
            Side::Production,
            ctx.production_count,
            precision,
        )?;

        Ok(BinnedFeatures {
            columns,
            histograms,
            baseline_maps,
            production_maps,
        })
    }

    /// Classify every production value and pair the resulting distribution
    /// with the baseline reference distribution of the same feature.
    pub fn distributions(
        &self,
        production_count: usize,
    ) -> Result<Vec<BucketDistributions>, DriftError> {
        let tables: BroadcastEdgeTables = broadcast_edge_tables(&self.production_maps);
        let reference = self.baseline_maps.reference_distribution();

        self.columns
            .par_iter()
            .zip(reference.par_iter())
            .zip(self.baseline_maps.features.par_iter())
            .zip(self.histograms.features.par_iter())
            .map(|(((column, reference), baseline_map), histograms)| {
                let table = tables
                    .get(&column.name)
                    .ok_or_else(|| DriftError::FeatureNotExistError(column.name.clone()))?;

                let observed = observed_distribution(
                    &column.name,
                    &column.production.view(),
                    table,
                    baseline_map,
                    production_count,
                )?;

                Ok::<_, DriftError>(BucketDistributions {
                    feature: column.name.clone(),
                    reference: reference.clone(),
                    observed: observed.probabilities,
                    centers: histograms.edges.centers(),
                })
            })
            .collect()
    }
}
