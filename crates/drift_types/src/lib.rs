pub mod binning;
pub mod dataset;
pub mod error;
pub mod frequency;
pub mod histogram;
pub mod metric;

pub use binning::*;
pub use dataset::*;
pub use frequency::*;
pub use histogram::*;
pub use metric::*;
