use crate::error::DriftError;
use crate::histogram::FeatureHistograms;
use drift_types::{BinEdges, Bucket, FeatureFrequencyMaps, FrequencyMap, Histogram};
use std::collections::HashSet;
use tracing::debug;

const MAX_BUCKET_PRECISION: u32 = 15;

fn format_edge(value: f64, precision: u32) -> String {
    let scale = 10_f64.powi(precision as i32);
    let rounded = (value * scale).round() / scale;

    // avoid "-0.0" buckets
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:?}")
}

pub fn bucket_name(low: f64, high: f64, precision: u32) -> String {
    format!(
        "{}_{}",
        format_edge(low, precision),
        format_edge(high, precision)
    )
}

/// Name every bin of `edges`.
///
/// Names use `precision` decimals unless two bins would share a name, in
/// which case the precision grows until every name is unique. Bins that still
/// collide at the maximum precision get their index appended.
pub fn bucket_names(edges: &BinEdges, precision: u32) -> Vec<String> {
    let names_at = |precision: u32| -> Vec<String> {
        edges
            .edges
            .windows(2)
            .map(|pair| bucket_name(pair[0], pair[1], precision))
            .collect()
    };

    let is_unique =
        |names: &[String]| names.iter().collect::<HashSet<_>>().len() == names.len();

    for p in precision..=MAX_BUCKET_PRECISION.max(precision) {
        let names = names_at(p);
        if is_unique(&names) {
            if p != precision {
                debug!("Bucket names collided at {precision} decimals, using {p}");
            }
            return names;
        }
    }

    names_at(MAX_BUCKET_PRECISION.max(precision))
        .into_iter()
        .enumerate()
        .map(|(i, name)| format!("{name}#{i}"))
        .collect()
}

/// Convert a histogram into a per-bucket frequency map.
///
/// # Arguments
///
/// * `feature` - Column name
/// * `histogram` - Bin counts for the column
/// * `total_count` - Row count of the dataset the histogram was built from
/// * `precision` - Decimal places used in bucket names
///
/// # Returns
///
/// * `Result<FrequencyMap, DriftError>`
pub fn compute_frequency_map(
    feature: &str,
    histogram: &Histogram,
    total_count: usize,
    precision: u32,
) -> Result<FrequencyMap, DriftError> {
    if total_count == 0 {
        return Err(DriftError::EmptyDatasetError(feature.to_string()));
    }

    if histogram.num_bins() != histogram.edges.num_bins() {
        return Err(DriftError::FeatureLengthError);
    }

    let names = bucket_names(&histogram.edges, precision);
    let buckets = names
        .into_iter()
        .zip(histogram.edges.edges.windows(2))
        .zip(histogram.counts.iter())
        .map(|((name, pair), &count)| Bucket {
            name,
            count,
            probability: count as f64 / total_count as f64,
            low: pair[0],
            high: pair[1],
        })
        .collect();

    Ok(FrequencyMap {
        feature: feature.to_string(),
        total_count,
        buckets,
    })
}

/// Which side of a [`FeatureHistograms`] to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Baseline,
    Production,
}

pub fn compute_feature_frequency_maps(
    histograms: &[FeatureHistograms],
    side: Side,
    total_count: usize,
    precision: u32,
) -> Result<FeatureFrequencyMaps, DriftError> {
    let features = histograms
        .iter()
        .map(|feature| {
            let histogram = match side {
                Side::Baseline => &feature.baseline,
                Side::Production => &feature.production,
            };
            compute_frequency_map(&feature.feature, histogram, total_count, precision)
        })
        .collect::<Result<Vec<_>, DriftError>>()?;

    Ok(FeatureFrequencyMaps { features })
}
