//! Apache Parquet output format.

use arrow::array::{ArrayRef, Date32Array, Float64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use macrolens_types::ConsolidatedTable;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::io::Write;
use std::sync::Arc;

use crate::{FormatError, Formatter};

/// Parquet formatter.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
        }
    }
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Creates the Arrow schema for a table: `date` then one float per column.
    fn table_schema(table: &ConsolidatedTable) -> Schema {
        let mut fields = vec![Field::new("date", DataType::Date32, false)];
        fields.extend(
            table
                .column_names()
                .map(|name| Field::new(name, DataType::Float64, false)),
        );
        Schema::new(fields)
    }

    /// Converts a slice of table rows to an Arrow RecordBatch.
    fn rows_to_batch(
        schema: &Arc<Schema>,
        table: &ConsolidatedTable,
        start: usize,
        end: usize,
    ) -> Result<RecordBatch, FormatError> {
        let epoch = NaiveDate::default();
        let days: Vec<i32> = table.index()[start..end]
            .iter()
            .map(|d| i32::try_from((*d - epoch).num_days()))
            .collect::<Result<_, _>>()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        let mut arrays: Vec<ArrayRef> = vec![Arc::new(Date32Array::from(days))];
        for name in table.column_names() {
            let values = table.column(name).unwrap_or_default();
            arrays.push(Arc::new(Float64Array::from(values[start..end].to_vec())));
        }

        RecordBatch::try_new(Arc::clone(schema), arrays)
            .map_err(|e| FormatError::Parquet(e.to_string()))
    }
}

impl Formatter for ParquetFormatter {
    fn write_table<W: Write + Send>(
        &self,
        table: &ConsolidatedTable,
        writer: W,
    ) -> Result<(), FormatError> {
        let schema = Arc::new(Self::table_schema(table));
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut arrow_writer = ArrowWriter::try_new(writer, Arc::clone(&schema), Some(props))
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        let step = self.row_group_size.max(1);
        for start in (0..table.len()).step_by(step) {
            let end = (start + step).min(table.len());
            let batch = Self::rows_to_batch(&schema, table, start, end)?;
            arrow_writer
                .write(&batch)
                .map_err(|e| FormatError::Parquet(e.to_string()))?;
        }

        arrow_writer
            .close()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        Ok(())
    }

    fn extension(&self) -> &str {
        "parquet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn create_test_table() -> ConsolidatedTable {
        let dates = vec![
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
        ];
        ConsolidatedTable::new(dates)
            .unwrap()
            .with_column("FedBalanceSheet", vec![7.7, 7.6, 7.5])
            .unwrap()
    }

    #[test]
    fn test_parquet_table() {
        let formatter = ParquetFormatter::new().with_row_group_size(2);
        let mut output = Cursor::new(Vec::new());

        formatter
            .write_table(&create_test_table(), &mut output)
            .unwrap();

        // Parquet files start with "PAR1" magic bytes
        let data = output.into_inner();
        assert!(data.len() > 4);
        assert_eq!(&data[0..4], b"PAR1");
    }

    #[test]
    fn test_table_schema() {
        let schema = ParquetFormatter::table_schema(&create_test_table());
        assert_eq!(schema.fields().len(), 2);
        assert_eq!(
            schema.field_with_name("date").unwrap().data_type(),
            &DataType::Date32
        );
        assert!(schema.field_with_name("FedBalanceSheet").is_ok());
    }

    #[test]
    fn test_date32_epoch() {
        let schema = Arc::new(ParquetFormatter::table_schema(&create_test_table()));
        let batch =
            ParquetFormatter::rows_to_batch(&schema, &create_test_table(), 0, 1).unwrap();
        let dates = batch
            .column(0)
            .as_any()
            .downcast_ref::<Date32Array>()
            .unwrap();
        assert_eq!(dates.value(0), 19_724);
    }
}
