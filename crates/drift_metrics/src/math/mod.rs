pub mod jensen_shannon;
pub mod ks;
pub mod psi;
pub mod wasserstein;

pub use jensen_shannon::jensen_shannon_distance;
pub use ks::{ks_2samp, KsResult};
pub use psi::{compute_psi, population_stability_index, smoothed_proportion_pairs};
pub use wasserstein::{normalize_by_stddev, wasserstein_distance};
