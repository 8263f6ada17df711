pub mod binning;
pub mod bucket;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod frequency;
pub mod histogram;
pub mod math;
pub mod stats;

pub use dispatch::{compute_numerical_drift, NumericalDriftComputer, NumericalDriftRequest};
pub use engine::{DriftContext, Engine, MetricEngine};
pub use error::DriftError;
