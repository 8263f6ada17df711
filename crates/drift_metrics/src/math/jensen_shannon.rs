use crate::error::DriftError;

fn normalize(dist: &[f64]) -> Option<Vec<f64>> {
    let total: f64 = dist.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return None;
    }
    Some(dist.iter().map(|v| v / total).collect())
}

fn kl_divergence_base2(p: &[f64], m: &[f64]) -> f64 {
    p.iter()
        .zip(m)
        .filter(|(pi, _)| **pi > 0.0)
        .map(|(pi, mi)| pi * (pi / mi).log2())
        .sum()
}

/// Jensen-Shannon distance between two distributions over the same buckets.
///
/// Uses base 2 logarithms so the distance lies in `[0, 1]`. Inputs are
/// rescaled to unit mass first.
pub fn jensen_shannon_distance(p: &[f64], q: &[f64]) -> Result<f64, DriftError> {
    if p.len() != q.len() {
        return Err(DriftError::FeatureLengthError);
    }

    let (p, q) = match (normalize(p), normalize(q)) {
        (Some(p), Some(q)) => (p, q),
        _ => {
            return Err(DriftError::InsufficientDataError(
                "Jensen-Shannon distance requires non-empty distributions".to_string(),
            ))
        }
    };

    let m: Vec<f64> = p.iter().zip(&q).map(|(pi, qi)| (pi + qi) / 2.0).collect();
    let divergence = 0.5 * kl_divergence_base2(&p, &m) + 0.5 * kl_divergence_base2(&q, &m);

    Ok(divergence.max(0.0).sqrt().clamp(0.0, 1.0))
}
