use crate::engine::{DriftContext, Engine, MetricEngine};
use crate::error::DriftError;
use drift_settings::DriftSettings;
use drift_types::{Dataset, MetricTable, NumericalMetric};
use std::str::FromStr;
use tracing::{error, info, instrument};

/// Everything needed for one numerical drift computation.
pub struct NumericalDriftRequest<'a> {
    pub baseline: &'a Dataset,
    pub production: &'a Dataset,
    pub baseline_count: usize,
    pub production_count: usize,
    pub columns: &'a [String],
    pub metric_name: &'a str,
    pub threshold: f64,
}

pub struct NumericalDriftComputer {
    settings: DriftSettings,
}

impl Default for NumericalDriftComputer {
    fn default() -> Self {
        Self::new(DriftSettings::default())
    }
}

impl NumericalDriftComputer {
    pub fn new(settings: DriftSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &DriftSettings {
        &self.settings
    }

    /// Run the requested metric over every column of the request
    ///
    /// # Arguments
    ///
    /// * `request` - Datasets, row counts, columns, metric name and threshold
    ///
    /// # Returns
    ///
    /// * `Result<MetricTable, DriftError>` - One row per column, threshold attached
    #[instrument(skip_all, name = "Numerical drift")]
    pub fn compute(&self, request: &NumericalDriftRequest) -> Result<MetricTable, DriftError> {
        // resolve the engine before any data is read
        let metric = NumericalMetric::from_str(request.metric_name).map_err(|_| {
            error!(
                "Invalid metric {}. Valid metrics: {:?}",
                request.metric_name,
                NumericalMetric::valid_names()
            );
            DriftError::InvalidMetricName(request.metric_name.to_string())
        })?;
        let engine = Engine::from(metric);

        let ctx = DriftContext {
            baseline: request.baseline,
            production: request.production,
            baseline_count: request.baseline_count,
            production_count: request.production_count,
            columns: request.columns,
            settings: &self.settings,
        };

        let rows = engine.compute(&ctx).inspect_err(|e| {
            error!("Failed to compute {}: {}", metric, e);
        })?;
        let table = MetricTable::new(rows).with_threshold(request.threshold);

        info!(
            "Computed {} for {} columns (baseline rows: {}, production rows: {})",
            metric,
            table.len(),
            request.baseline_count,
            request.production_count
        );

        Ok(table)
    }
}

/// Compute drift with settings taken from the environment.
pub fn compute_numerical_drift(request: &NumericalDriftRequest) -> Result<MetricTable, DriftError> {
    NumericalDriftComputer::default().compute(request)
}
