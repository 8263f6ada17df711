use crate::error::TypeError;
use arrow::array::{ArrayRef, Float32Array, Float64Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Value written to the `data_type` column for every numerical metric row.
pub const NUMERICAL_DATA_TYPE: &str = "numerical";

#[derive(Debug, EnumIter, PartialEq, Eq, Hash, Serialize, Deserialize, Clone, Copy)]
pub enum NumericalMetric {
    JensenShannonDistance,
    NormalizedWassersteinDistance,
    PopulationStabilityIndex,
    TwoSampleKolmogorovSmirnovTest,
}

impl NumericalMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumericalMetric::JensenShannonDistance => "JensenShannonDistance",
            NumericalMetric::NormalizedWassersteinDistance => "NormalizedWassersteinDistance",
            NumericalMetric::PopulationStabilityIndex => "PopulationStabilityIndex",
            NumericalMetric::TwoSampleKolmogorovSmirnovTest => "TwoSampleKolmogorovSmirnovTest",
        }
    }

    pub fn valid_names() -> Vec<&'static str> {
        NumericalMetric::iter().map(|m| m.as_str()).collect()
    }
}

impl FromStr for NumericalMetric {
    type Err = TypeError;

    // exact, case-sensitive match
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        NumericalMetric::iter()
            .find(|metric| metric.as_str() == value)
            .ok_or_else(|| TypeError::InvalidMetricName(value.to_string()))
    }
}

impl Display for NumericalMetric {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One output row: a single metric value for a single feature.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MetricResult {
    pub feature_name: String,
    pub metric_value: f64,
    pub data_type: String,
    pub metric_name: String,
    pub threshold_value: Option<f32>,
}

impl MetricResult {
    pub fn new(feature_name: &str, metric_value: f64, metric: NumericalMetric) -> Self {
        MetricResult {
            feature_name: feature_name.to_string(),
            metric_value,
            data_type: NUMERICAL_DATA_TYPE.to_string(),
            metric_name: metric.to_string(),
            threshold_value: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct MetricTable {
    pub rows: Vec<MetricResult>,
}

impl MetricTable {
    pub fn new(rows: Vec<MetricResult>) -> Self {
        MetricTable { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, feature: &str) -> Option<&MetricResult> {
        self.rows.iter().find(|row| row.feature_name == feature)
    }

    /// Attach the same threshold to every row, stored as 32-bit float.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        let threshold = threshold as f32;
        self.rows
            .iter_mut()
            .for_each(|row| row.threshold_value = Some(threshold));
        self
    }

    pub fn schema() -> Schema {
        Schema::new(vec![
            Field::new("feature_name", DataType::Utf8, false),
            Field::new("metric_value", DataType::Float64, false),
            Field::new("data_type", DataType::Utf8, false),
            Field::new("metric_name", DataType::Utf8, false),
            Field::new("threshold_value", DataType::Float32, true),
        ])
    }

    pub fn to_record_batch(&self) -> Result<RecordBatch, TypeError> {
        let feature_name =
            StringArray::from_iter_values(self.rows.iter().map(|r| r.feature_name.as_str()));
        let metric_value = Float64Array::from_iter_values(self.rows.iter().map(|r| r.metric_value));
        let data_type =
            StringArray::from_iter_values(self.rows.iter().map(|r| r.data_type.as_str()));
        let metric_name =
            StringArray::from_iter_values(self.rows.iter().map(|r| r.metric_name.as_str()));
        let threshold_value =
            Float32Array::from(self.rows.iter().map(|r| r.threshold_value).collect::<Vec<_>>());

        let batch = RecordBatch::try_new(
            Arc::new(Self::schema()),
            vec![
                Arc::new(feature_name) as ArrayRef,
                Arc::new(metric_value),
                Arc::new(data_type),
                Arc::new(metric_name),
                Arc::new(threshold_value),
            ],
        )?;

        Ok(batch)
    }

    pub fn model_dump_json(&self) -> Result<String, TypeError> {
        serde_json::to_string(self).map_err(|e| TypeError::SerializeError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use arrow::array::AsArray;
    use arrow::datatypes::Float32Type;

    #[test]
    fn test_metric_from_str_is_exact() {
        assert_eq!(
            NumericalMetric::from_str("PopulationStabilityIndex").unwrap(),
            NumericalMetric::PopulationStabilityIndex
        );
        assert!(NumericalMetric::from_str("populationstabilityindex").is_err());
        assert!(NumericalMetric::from_str("NotAMetric").is_err());
        assert_eq!(NumericalMetric::valid_names().len(), 4);
    }

    #[test]
    fn test_metric_table_record_batch() {
        let table = MetricTable::new(vec![
            MetricResult::new("a", 0.25, NumericalMetric::JensenShannonDistance),
            MetricResult::new("b", 0.5, NumericalMetric::JensenShannonDistance),
        ])
        .with_threshold(0.1);

        let batch = table.to_record_batch().unwrap();

        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 5);
        assert_eq!(batch.schema().field(4).name(), "threshold_value");

        let thresholds = batch.column(4).as_primitive::<Float32Type>();
        // stored as f32, so only close to the f64 threshold
        assert_abs_diff_eq!(thresholds.value(0) as f64, 0.1, epsilon = 1e-7);
        assert_eq!(table.get("a").unwrap().threshold_value, Some(0.1_f32));
        assert_eq!(table.get("b").unwrap().data_type, NUMERICAL_DATA_TYPE);
        assert!(table.model_dump_json().unwrap().contains("JensenShannonDistance"));
    }
}
