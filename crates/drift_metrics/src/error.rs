use drift_types::error::TypeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriftError {
    #[error("Invalid metric {0} for numerical feature")]
    InvalidMetricName(String),

    #[error(
        "Cannot calculate two-sample Kolmogorov-Smirnov test on dataset with more than {limit} entries (baseline: {baseline}, production: {production})"
    )]
    DatasetSizeExceeded {
        limit: usize,
        baseline: usize,
        production: usize,
    },

    #[error("Column {0} has no numeric values in either dataset")]
    EmptyColumnError(String),

    #[error("Dataset row count must be greater than zero: {0}")]
    EmptyDatasetError(String),

    #[error("Insufficient Data Error: {0}")]
    InsufficientDataError(String),

    #[error("Feature and array length mismatch")]
    FeatureLengthError,

    #[error("Feature does not exist: {0}")]
    FeatureNotExistError(String),

    #[error(transparent)]
    TypeError(#[from] TypeError),
}
