//! In-memory tabular dataset loaded from CSV.
//!
//! A [`Dataset`] is an ordered sequence of records sharing the column set
//! defined by the CSV header row. Values are type-inferred from the raw CSV
//! text: empty fields become null, unambiguous numeric strings become
//! numbers, everything else stays a string. Row order and column order are
//! preserved from the file.

use std::io::{BufReader, Read};

use bson::Document;
use serde_json::{Map, Value};

use crate::error::{ImportError, Result};

/// Tabular data loaded from one CSV file.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Column names from the header row, in file order
    columns: Vec<String>,

    /// Data rows; each row has exactly `columns.len()` values
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Parse a CSV document with a header row.
    ///
    /// # Arguments
    /// * `reader` - Raw CSV bytes
    ///
    /// # Returns
    /// * `Result<Self>` - Parsed dataset, or the underlying CSV error
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().from_reader(BufReader::new(reader));

        let columns: Vec<String> = csv_reader.headers()?.iter().map(String::from).collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(infer_scalar).collect());
        }

        Ok(Self { columns, rows })
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Convert to record-oriented JSON: an array with one object per row,
    /// keyed by column name, fields in column order.
    pub fn to_json(&self) -> Value {
        let records = self
            .rows
            .iter()
            .map(|row| {
                let mut record = Map::new();
                for (column, value) in self.columns.iter().zip(row) {
                    record.insert(column.clone(), value.clone());
                }
                Value::Object(record)
            })
            .collect();
        Value::Array(records)
    }

    /// Convert to BSON documents for a bulk insert, one per row.
    ///
    /// # Returns
    /// * `Result<Vec<Document>>` - Documents in row order, or a conversion error
    pub fn to_documents(&self) -> Result<Vec<Document>> {
        let Value::Array(records) = self.to_json() else {
            unreachable!("record-oriented JSON is always an array");
        };

        records
            .iter()
            .map(|record| {
                bson::to_document(record)
                    .map_err(|e| ImportError::OperationFailed(e.to_string()).into())
            })
            .collect()
    }
}

/// Infer a scalar JSON value from one CSV field.
///
/// Empty fields become null; fields parseable as i64 or as a finite f64
/// become numbers; everything else stays a string.
fn infer_scalar(field: &str) -> Value {
    if field.is_empty() {
        return Value::Null;
    }

    if let Ok(int) = field.parse::<i64>() {
        return Value::from(int);
    }

    if let Ok(float) = field.parse::<f64>() {
        if let Some(number) = serde_json::Number::from_f64(float) {
            return Value::Number(number);
        }
    }

    Value::String(field.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_inference() {
        assert_eq!(infer_scalar(""), Value::Null);
        assert_eq!(infer_scalar("42"), json!(42));
        assert_eq!(infer_scalar("-7"), json!(-7));
        assert_eq!(infer_scalar("3.5"), json!(3.5));
        assert_eq!(infer_scalar("1e3"), json!(1000.0));
        assert_eq!(infer_scalar("abc"), json!("abc"));
        assert_eq!(infer_scalar("12ab"), json!("12ab"));
        // Non-finite floats stay strings
        assert_eq!(infer_scalar("NaN"), json!("NaN"));
        assert_eq!(infer_scalar("inf"), json!("inf"));
    }

    #[test]
    fn test_from_reader_basic() {
        let dataset = Dataset::from_reader("a,b\n1,x\n2,y\n".as_bytes()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.columns(), ["a", "b"]);
    }

    #[test]
    fn test_record_oriented_json() {
        let dataset = Dataset::from_reader("a,b\n1,x\n2,y\n".as_bytes()).unwrap();
        assert_eq!(
            dataset.to_json(),
            json!([{"a": 1, "b": "x"}, {"a": 2, "b": "y"}])
        );
    }

    #[test]
    fn test_field_order_matches_column_order() {
        // Header order must survive into the serialized records even when it
        // is not alphabetical
        let dataset = Dataset::from_reader("z,a\n1,2\n".as_bytes()).unwrap();
        let serialized = serde_json::to_string(&dataset.to_json()).unwrap();
        assert_eq!(serialized, r#"[{"z":1,"a":2}]"#);
    }

    #[test]
    fn test_empty_field_becomes_null() {
        let dataset = Dataset::from_reader("a,b\n1,\n".as_bytes()).unwrap();
        assert_eq!(dataset.to_json(), json!([{"a": 1, "b": null}]));
    }

    #[test]
    fn test_header_only_file() {
        let dataset = Dataset::from_reader("a,b\n".as_bytes()).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.to_json(), json!([]));
    }

    #[test]
    fn test_ragged_row_is_an_error() {
        assert!(Dataset::from_reader("a,b\n1\n".as_bytes()).is_err());
    }

    #[test]
    fn test_quoted_fields() {
        let dataset = Dataset::from_reader("a,b\n\"1,5\",\"x y\"\n".as_bytes()).unwrap();
        assert_eq!(dataset.to_json(), json!([{"a": "1,5", "b": "x y"}]));
    }

    #[test]
    fn test_to_documents() {
        let dataset = Dataset::from_reader("a,b\n1,x\n2,y\n".as_bytes()).unwrap();
        let docs = dataset.to_documents().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].get_i64("a").unwrap(), 1);
        assert_eq!(docs[0].get_str("b").unwrap(), "x");
        assert_eq!(docs[1].get_str("b").unwrap(), "y");
    }
}
