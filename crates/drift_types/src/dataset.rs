use crate::error::TypeError;
use arrow::array::{Array, ArrayRef, AsArray, Float64Array, RecordBatch};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use ndarray::Array1;
use std::sync::Arc;
use tracing::debug;

/// Tabular input for a drift computation.
///
/// Columns are addressed by name. Only numeric Arrow types can be read as
/// feature values; they are widened to `f64` on extraction.
#[derive(Debug, Clone)]
pub struct Dataset {
    batch: RecordBatch,
}

impl Dataset {
    pub fn new(batch: RecordBatch) -> Self {
        Dataset { batch }
    }

    /// Build a dataset of `Float64` columns, mostly useful for tests and small
    /// in-memory inputs.
    ///
    /// # Arguments
    ///
    /// * `columns` - Pairs of column name and values. All columns must share the same length
    ///
    /// # Returns
    ///
    /// * `Result<Dataset, TypeError>`
    pub fn from_columns<S: AsRef<str>>(columns: &[(S, Vec<f64>)]) -> Result<Self, TypeError> {
        if columns.is_empty() {
            return Err(TypeError::CreateDatasetError(
                "at least one column is required".to_string(),
            ));
        }

        let arrays = columns
            .iter()
            .map(|(name, values)| {
                (
                    name.as_ref().to_string(),
                    Arc::new(Float64Array::from(values.clone())) as ArrayRef,
                )
            })
            .collect::<Vec<_>>();

        let batch = RecordBatch::try_from_iter(arrays)?;
        Ok(Dataset { batch })
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    pub fn record_batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Extract a numeric column as a 1d array of finite values.
    ///
    /// Nulls, NaN and infinite entries are dropped; they can't be placed in any
    /// histogram bucket.
    pub fn numeric_column(&self, name: &str) -> Result<Array1<f64>, TypeError> {
        let column = self
            .batch
            .column_by_name(name)
            .ok_or_else(|| TypeError::MissingColumn(name.to_string()))?;

        let data_type = column.data_type();
        if !data_type.is_numeric() {
            return Err(TypeError::NonNumericColumn {
                column: name.to_string(),
                data_type: data_type.to_string(),
            });
        }

        let casted = cast(column.as_ref(), &DataType::Float64)?;
        let values = casted
            .as_primitive::<Float64Type>()
            .iter()
            .flatten()
            .filter(|v| v.is_finite())
            .collect::<Vec<f64>>();

        let dropped = column.len() - values.len();
        if dropped > 0 {
            debug!("Dropped {} null or non-finite values from {}", dropped, name);
        }

        Ok(Array1::from(values))
    }

    pub fn numeric_columns(&self, names: &[String]) -> Result<Vec<Array1<f64>>, TypeError> {
        names
            .iter()
            .map(|name| self.numeric_column(name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Int32Array, StringArray};

    #[test]
    fn test_numeric_column_casts_integers() {
        let batch = RecordBatch::try_from_iter(vec![(
            "age",
            Arc::new(Int32Array::from(vec![Some(1), None, Some(3)])) as ArrayRef,
        )])
        .unwrap();

        let dataset = Dataset::new(batch);
        let column = dataset.numeric_column("age").unwrap();

        assert_eq!(dataset.num_rows(), 3);
        assert_eq!(column.to_vec(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_missing_and_non_numeric_columns() {
        let batch = RecordBatch::try_from_iter(vec![
            (
                "name",
                Arc::new(StringArray::from(vec!["a", "b"])) as ArrayRef,
            ),
            ("value", Arc::new(Float64Array::from(vec![1.0, 2.0])) as ArrayRef),
        ])
        .unwrap();
        let dataset = Dataset::new(batch);

        assert!(matches!(
            dataset.numeric_column("missing"),
            Err(TypeError::MissingColumn(_))
        ));
        assert!(matches!(
            dataset.numeric_column("name"),
            Err(TypeError::NonNumericColumn { .. })
        ));
        assert_eq!(dataset.column_names(), vec!["name", "value"]);
    }

    #[test]
    fn test_from_columns_drops_non_finite() {
        let dataset =
            Dataset::from_columns(&[("x", vec![1.0, f64::NAN, f64::INFINITY, 4.0])]).unwrap();

        assert_eq!(dataset.num_rows(), 4);
        assert_eq!(dataset.numeric_column("x").unwrap().to_vec(), vec![1.0, 4.0]);
    }
}
