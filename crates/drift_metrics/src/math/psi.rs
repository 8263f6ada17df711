use crate::error::DriftError;

/// Pair up baseline and production bin proportions after adding one to every
/// bin count, so no bin has a zero proportion.
///
/// # Arguments
///
/// * `baseline_counts` - Baseline histogram counts
/// * `production_counts` - Production histogram counts on the same edges
/// * `baseline_total` - Baseline row count
/// * `production_total` - Production row count
///
/// # Returns
///
/// * `Result<Vec<(f64, f64)>, DriftError>` - `(baseline, production)` proportion per bin
pub fn smoothed_proportion_pairs(
    baseline_counts: &[u64],
    production_counts: &[u64],
    baseline_total: usize,
    production_total: usize,
) -> Result<Vec<(f64, f64)>, DriftError> {
    if baseline_counts.len() != production_counts.len() {
        return Err(DriftError::FeatureLengthError);
    }

    if baseline_total == 0 || production_total == 0 {
        return Err(DriftError::EmptyDatasetError(
            "PSI requires non-empty datasets".to_string(),
        ));
    }

    Ok(baseline_counts
        .iter()
        .zip(production_counts)
        .map(|(&base, &prod)| {
            (
                (base + 1) as f64 / baseline_total as f64,
                (prod + 1) as f64 / production_total as f64,
            )
        })
        .collect())
}

pub fn compute_psi(proportion_pairs: &[(f64, f64)]) -> f64 {
    proportion_pairs
        .iter()
        .map(|(expected, actual)| (actual - expected) * (actual / expected).ln())
        .sum()
}

/// Smoothed PSI of two histograms tabulated on the same edges.
pub fn population_stability_index(
    baseline_counts: &[u64],
    production_counts: &[u64],
    baseline_total: usize,
    production_total: usize,
) -> Result<f64, DriftError> {
    let pairs = smoothed_proportion_pairs(
        baseline_counts,
        production_counts,
        baseline_total,
        production_total,
    )?;
    Ok(compute_psi(&pairs))
}
