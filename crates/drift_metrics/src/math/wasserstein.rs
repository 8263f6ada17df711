use crate::error::DriftError;

/// First order Wasserstein (earth mover's) distance between two binned
/// distributions sharing the sorted support `support`.
///
/// Both weight vectors are rescaled to unit mass. A distribution with no mass
/// is an error.
pub fn wasserstein_distance(p: &[f64], q: &[f64], support: &[f64]) -> Result<f64, DriftError> {
    if p.len() != q.len() || p.len() != support.len() {
        return Err(DriftError::FeatureLengthError);
    }

    let p_total: f64 = p.iter().sum();
    let q_total: f64 = q.iter().sum();
    if p_total <= 0.0 || q_total <= 0.0 || !p_total.is_finite() || !q_total.is_finite() {
        return Err(DriftError::InsufficientDataError(
            "Wasserstein distance requires non-empty distributions".to_string(),
        ));
    }

    let mut p_cdf = 0.0;
    let mut q_cdf = 0.0;
    let mut distance = 0.0;

    for i in 0..support.len().saturating_sub(1) {
        p_cdf += p[i] / p_total;
        q_cdf += q[i] / q_total;
        distance += (p_cdf - q_cdf).abs() * (support[i + 1] - support[i]);
    }

    Ok(distance.max(0.0))
}

/// Divide a distance by the baseline standard deviation, never by less than
/// `floor`. A missing standard deviation is treated as the floor.
pub fn normalize_by_stddev(distance: f64, stddev: Option<f64>, floor: f64) -> f64 {
    let norm = stddev.filter(|s| s.is_finite()).map_or(floor, |s| s.max(floor));
    distance / norm
}
