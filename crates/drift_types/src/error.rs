use thiserror::Error;

#[derive(Error, Debug)]
pub enum TypeError {
    #[error("Column {0} not present in dataset")]
    MissingColumn(String),

    #[error("Column {column} has non-numeric type {data_type}")]
    NonNumericColumn { column: String, data_type: String },

    #[error("Failed to build dataset: {0}")]
    CreateDatasetError(String),

    #[error("Invalid metric {0} for numerical feature")]
    InvalidMetricName(String),

    #[error("Invalid bin rule: {0}")]
    InvalidBinRule(String),

    #[error(transparent)]
    ArrowError(#[from] arrow::error::ArrowError),

    #[error(transparent)]
    ShapeError(#[from] ndarray::ShapeError),

    #[error("Failed to serialize: {0}")]
    SerializeError(String),
}
