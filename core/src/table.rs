//! Tabular view over list-of-objects payloads.
//!
//! A `Table` keeps every source column. Columns are the first-seen union
//! of row keys, so a key present on only some rows is still a column and
//! reads as absent on the others.

use crate::{
    error::{PipelineError, PipelineResult},
    types::Row,
};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows:    Vec<Row>,
}

impl Table {
    /// Materialize a JSON array of objects. `name` is used in error text only.
    pub fn from_records(name: &str, value: &Value) -> PipelineResult<Self> {
        let items = value
            .as_array()
            .ok_or_else(|| PipelineError::malformed(format!("'{name}' is not a list")))?;

        let mut rows = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item {
                Value::Object(map) => rows.push(map.clone()),
                other => {
                    return Err(PipelineError::malformed(format!(
                        "'{name}'[{index}] is not an object: {other}"
                    )))
                }
            }
        }
        Ok(Self::from_rows(rows))
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] { &self.columns }
    pub fn rows(&self) -> &[Row] { &self.rows }
    pub fn into_rows(self) -> Vec<Row> { self.rows }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// One cell per row, `None` where the row lacks the column.
    pub fn column(&self, name: &str) -> Vec<Option<&Value>> {
        self.rows.iter().map(|row| row.get(name)).collect()
    }

    /// Overwrite (or add) `name` on every row. `values` must yield one
    /// value per row.
    pub(crate) fn set_column<I>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = Value>,
    {
        let mut written = 0usize;
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.insert(name.to_string(), value);
            written += 1;
        }
        debug_assert_eq!(written, self.rows.len(), "set_column: length mismatch for '{name}'");
        if !self.has_column(name) {
            self.columns.push(name.to_string());
        }
    }
}

/// Fetch a required top-level key, reporting `MissingField` when absent.
pub(crate) fn require<'a>(payload: &'a Value, field: &str) -> PipelineResult<&'a Value> {
    match payload.get(field) {
        Some(Value::Null) | None => Err(PipelineError::missing(field)),
        Some(value) => Ok(value),
    }
}

/// Materialize the list stored under `field`.
pub(crate) fn table_at(payload: &Value, field: &str) -> PipelineResult<Table> {
    Table::from_records(field, require(payload, field)?)
}
