use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::Value;
use crate::error::{GrammarError, GrammarResult};

/// Column-oriented table of observations.
///
/// Invariant: every column holds exactly `row_count` values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IndexMap<String, Vec<Value>>", into = "IndexMap<String, Vec<Value>>")]
pub struct DataTable {
    columns: IndexMap<String, Vec<Value>>,
    row_count: usize,
}

impl DataTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a named column.
    ///
    /// The first column fixes the row count; later columns must match it.
    pub fn with_column<V>(mut self, name: impl Into<String>, values: Vec<V>) -> GrammarResult<Self>
    where
        V: Into<Value>,
    {
        let name = name.into();
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if name.is_empty() {
            return Err(GrammarError::InvalidData(
                "column name must not be empty".to_owned(),
            ));
        }
        if self.columns.contains_key(&name) {
            return Err(GrammarError::InvalidData(format!(
                "duplicate column `{name}`"
            )));
        }
        if !self.columns.is_empty() && values.len() != self.row_count {
            return Err(GrammarError::InvalidData(format!(
                "column `{name}` has {} rows, expected {}",
                values.len(),
                self.row_count
            )));
        }
        self.row_count = values.len();
        self.columns.insert(name, values);
        Ok(self)
    }

    /// Builds a table from row records.
    ///
    /// Columns appear in first-seen order; cells a record omits are `Missing`.
    pub fn from_records<I>(records: I) -> GrammarResult<Self>
    where
        I: IntoIterator<Item = IndexMap<String, Value>>,
    {
        let records: Vec<IndexMap<String, Value>> = records.into_iter().collect();
        let mut columns: IndexMap<String, Vec<Value>> = IndexMap::new();
        for record in &records {
            for name in record.keys() {
                if name.is_empty() {
                    return Err(GrammarError::InvalidData(
                        "column name must not be empty".to_owned(),
                    ));
                }
                if !columns.contains_key(name) {
                    columns.insert(name.clone(), Vec::with_capacity(records.len()));
                }
            }
        }
        for record in &records {
            for (name, column) in &mut columns {
                column.push(record.get(name).cloned().unwrap_or_default());
            }
        }
        Ok(Self {
            columns,
            row_count: records.len(),
        })
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Returns one row as `(field, value)` pairs in column order.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<Vec<(&str, &Value)>> {
        if index >= self.row_count {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|(name, values)| (name.as_str(), &values[index]))
                .collect(),
        )
    }
}

impl TryFrom<IndexMap<String, Vec<Value>>> for DataTable {
    type Error = GrammarError;

    fn try_from(columns: IndexMap<String, Vec<Value>>) -> GrammarResult<Self> {
        columns
            .into_iter()
            .try_fold(Self::new(), |table, (name, values)| {
                table.with_column(name, values)
            })
    }
}

impl From<DataTable> for IndexMap<String, Vec<Value>> {
    fn from(table: DataTable) -> Self {
        table.columns
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::DataTable;
    use crate::core::Value;
    use crate::error::GrammarError;

    #[test]
    fn mismatched_column_length_is_rejected() {
        let err = DataTable::new()
            .with_column("total_bill", vec![16.99, 10.34])
            .expect("first column")
            .with_column("tip", vec![1.01])
            .expect_err("length mismatch");
        assert!(matches!(err, GrammarError::InvalidData(_)));
    }

    #[test]
    fn duplicate_column_is_rejected() {
        let err = DataTable::new()
            .with_column("tip", vec![1.0])
            .and_then(|t| t.with_column("tip", vec![2.0]))
            .expect_err("duplicate");
        assert!(matches!(err, GrammarError::InvalidData(_)));
    }

    #[test]
    fn records_fill_gaps_with_missing() {
        let mut first = IndexMap::new();
        first.insert("sex".to_owned(), Value::from("Female"));
        first.insert("tip".to_owned(), Value::from(1.01));
        let mut second = IndexMap::new();
        second.insert("tip".to_owned(), Value::from(1.66));
        second.insert("day".to_owned(), Value::from("Sun"));

        let table = DataTable::from_records([first, second]).expect("records");
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.field_names().collect::<Vec<_>>(),
            vec!["sex", "tip", "day"]
        );
        assert_eq!(table.column("sex").expect("sex")[1], Value::Missing);
        assert_eq!(table.column("day").expect("day")[0], Value::Missing);
    }

    #[test]
    fn records_reject_empty_column_name() {
        let mut good = IndexMap::new();
        good.insert("tip".to_owned(), Value::from(1.01));
        let mut bad = IndexMap::new();
        bad.insert(String::new(), Value::from(2.0));

        let err = DataTable::from_records([good, bad]).expect_err("empty name");
        assert!(matches!(err, GrammarError::InvalidData(msg) if msg.contains("empty")));
    }

    #[test]
    fn json_round_trip_revalidates_lengths() {
        let err = serde_json::from_str::<DataTable>(r#"{"a":[1,2],"b":[3]}"#)
            .expect_err("ragged columns");
        assert!(err.to_string().contains("expected 2"));

        let table: DataTable =
            serde_json::from_str(r#"{"a":[1,2],"b":["x",null]}"#).expect("valid table");
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.row(1).expect("row")[1], ("b", &Value::Missing));
    }
}
