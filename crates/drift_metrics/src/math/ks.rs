use crate::error::DriftError;

/// Outcome of a two-sided, two-sample Kolmogorov-Smirnov test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KsResult {
    pub statistic: f64,
    pub p_value: f64,
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Largest scaled CDF gap `max |i * m - j * n|` between two sorted samples of
/// sizes `n` and `m`. The KS statistic is this value divided by `n * m`.
fn max_scaled_gap(a: &[f64], b: &[f64]) -> i64 {
    let (n, m) = (a.len(), b.len());
    let (mut i, mut j) = (0_usize, 0_usize);
    let mut max_gap = 0_i64;

    while i < n && j < m {
        let x = a[i].min(b[j]);
        while i < n && a[i] <= x {
            i += 1;
        }
        while j < m && b[j] <= x {
            j += 1;
        }
        let gap = (i as i64 * m as i64 - j as i64 * n as i64).abs();
        max_gap = max_gap.max(gap);
    }

    max_gap
}

/// Probability that a random monotone lattice path from `(0, 0)` to
/// `(n, m)` stays strictly inside the band `|i * m - j * n| < bound`.
///
/// Each cell holds the number of admissible paths divided by the number of
/// all paths reaching it, so values stay within `[0, 1]`.
fn prob_inside_band(n: usize, m: usize, bound: i64) -> f64 {
    let mut row = vec![0.0_f64; m + 1];

    for i in 0..=n {
        for j in 0..=m {
            let gap = (i as i64 * m as i64 - j as i64 * n as i64).abs();
            if gap >= bound {
                row[j] = 0.0;
                continue;
            }
            if i == 0 && j == 0 {
                row[j] = 1.0;
                continue;
            }

            let steps = (i + j) as f64;
            let from_previous_row = if i > 0 { row[j] * i as f64 / steps } else { 0.0 };
            let from_previous_col = if j > 0 {
                row[j - 1] * j as f64 / steps
            } else {
                0.0
            };
            row[j] = from_previous_row + from_previous_col;
        }
    }

    row[m]
}

/// Two-sided two-sample Kolmogorov-Smirnov test with an exact p-value.
///
/// # Arguments
///
/// * `baseline` - First sample
/// * `production` - Second sample
///
/// # Returns
///
/// * `Result<KsResult, DriftError>` - Statistic `D` and p-value `P(D' >= D)` under the null hypothesis
pub fn ks_2samp(baseline: &[f64], production: &[f64]) -> Result<KsResult, DriftError> {
    if baseline.is_empty() || production.is_empty() {
        return Err(DriftError::InsufficientDataError(
            "Kolmogorov-Smirnov test requires two non-empty samples".to_string(),
        ));
    }

    let a = sorted(baseline);
    let b = sorted(production);
    let (n, m) = (a.len(), b.len());

    let max_gap = max_scaled_gap(&a, &b);
    let statistic = max_gap as f64 / (n as f64 * m as f64);

    if max_gap == 0 {
        return Ok(KsResult {
            statistic,
            p_value: 1.0,
        });
    }

    // every gap is a multiple of gcd(n, m)
    debug_assert_eq!(max_gap % gcd(n, m) as i64, 0);

    let inside = prob_inside_band(n, m, max_gap);
    let p_value = (1.0 - inside).clamp(0.0, 1.0);

    Ok(KsResult { statistic, p_value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_identical_samples() {
        let sample = vec![1.0, 2.0, 3.0, 4.0];
        let result = ks_2samp(&sample, &sample).unwrap();

        assert_eq!(result.statistic, 0.0);
        assert_eq!(result.p_value, 1.0);
    }

    #[test]
    fn test_fully_separated_samples() {
        let result =
            ks_2samp(&[1.0, 2.0, 3.0, 4.0, 5.0], &[6.0, 7.0, 8.0, 9.0, 10.0]).unwrap();

        // only the two extreme orderings out of C(10, 5) = 252 reach D = 1
        assert_eq!(result.statistic, 1.0);
        assert_abs_diff_eq!(result.p_value, 2.0 / 252.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unequal_sizes() {
        // 23 of the 35 possible interleavings reach D >= 0.5
        let result = ks_2samp(&[1.0, 2.0, 3.0], &[1.5, 2.5, 3.5, 4.5]).unwrap();

        assert_abs_diff_eq!(result.statistic, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(result.p_value, 23.0 / 35.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_sample() {
        assert!(matches!(
            ks_2samp(&[], &[1.0]),
            Err(DriftError::InsufficientDataError(_))
        ));
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(7, 5), 1);
    }
}
