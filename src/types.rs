//! Core data model types.
//!
//! Every stage of the pipeline consumes and produces an in-memory [`DataSet`]: an ordered
//! [`Schema`] (a list of typed [`Field`]s) plus row-major [`Value`] storage.

use std::fmt;

use crate::error::{PipelineError, PipelineResult};

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// UTF-8 string.
    Utf8,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A list of fields describing the shape of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Like [`Self::index_of`], but a missing column is an error.
    pub fn require(&self, name: &str) -> PipelineResult<usize> {
        self.index_of(name)
            .ok_or_else(|| PipelineError::ColumnNotFound(name.to_string()))
    }
}

/// A single typed value in a [`DataSet`].
///
/// The derived ordering sorts `Null` first, integers numerically and strings lexicographically
/// (by code point). Label and one-hot encoders rely on it to assign codes deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Renders the value the way it is written to CSV: `Null` is the empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Utf8(s) => f.write_str(s),
        }
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the dataset.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    /// Column names in schema order.
    pub fn column_names(&self) -> Vec<String> {
        self.schema.field_names().map(str::to_owned).collect()
    }

    /// Iterate the values of one column, top to bottom.
    pub fn column_values(&self, name: &str) -> PipelineResult<impl Iterator<Item = &Value>> {
        let idx = self.schema.require(name)?;
        Ok(self.rows.iter().map(move |row| &row[idx]))
    }

    /// A new dataset holding at most the first `n` rows.
    pub fn head(&self, n: usize) -> Self {
        Self {
            schema: self.schema.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Create a new dataset containing only rows that match `predicate`.
    ///
    /// The returned dataset preserves the original schema.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Create a new dataset by applying `mapper` to every row.
    ///
    /// The returned dataset preserves the original schema.
    ///
    /// # Panics
    ///
    /// Panics if `mapper` returns a row with a different length than the schema field count.
    pub fn map_rows<F>(&self, mut mapper: F) -> Self
    where
        F: FnMut(&[Value]) -> Vec<Value>,
    {
        let expected_len = self.schema.fields.len();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let out = mapper(row.as_slice());
                assert!(
                    out.len() == expected_len,
                    "mapped row length {} does not match schema length {}",
                    out.len(),
                    expected_len
                );
                out
            })
            .collect();

        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Create a new dataset without the named column.
    pub fn drop_column(&self, name: &str) -> PipelineResult<Self> {
        let idx = self.schema.require(name)?;
        let mut fields = self.schema.fields.clone();
        fields.remove(idx);
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut out = row.clone();
                out.remove(idx);
                out
            })
            .collect();
        Ok(Self::new(Schema::new(fields), rows))
    }

    /// Create a new dataset with `fields` appended after the existing columns.
    ///
    /// `columns` is row-major: `columns[i]` holds the new values for row `i`, one per field.
    /// Appending a field whose name already exists is a [`PipelineError::SchemaMismatch`].
    pub fn append_columns(
        &self,
        fields: Vec<Field>,
        columns: Vec<Vec<Value>>,
    ) -> PipelineResult<Self> {
        if columns.len() != self.row_count() {
            return Err(PipelineError::SchemaMismatch {
                message: format!(
                    "cannot append {} value rows to a table with {} rows",
                    columns.len(),
                    self.row_count()
                ),
            });
        }

        let mut schema = self.schema.clone();
        for field in fields {
            if schema.index_of(&field.name).is_some() {
                return Err(PipelineError::SchemaMismatch {
                    message: format!("duplicate column '{}'", field.name),
                });
            }
            schema.fields.push(field);
        }

        let width = schema.fields.len();
        let rows = self
            .rows
            .iter()
            .zip(columns)
            .map(|(row, extra)| {
                let mut out = Vec::with_capacity(width);
                out.extend(row.iter().cloned());
                out.extend(extra);
                out
            })
            .collect::<Vec<_>>();

        if rows.iter().any(|r| r.len() != width) {
            return Err(PipelineError::SchemaMismatch {
                message: format!("appended rows do not match schema width {width}"),
            });
        }

        Ok(Self::new(schema, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::{DataSet, DataType, Field, Schema, Value};

    fn sample_dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("name", DataType::Utf8),
        ]);
        let rows = vec![
            vec![Value::Int64(1), Value::Utf8("a".to_string())],
            vec![Value::Int64(2), Value::Null],
            vec![Value::Int64(3), Value::Utf8("c".to_string())],
        ];
        DataSet::new(schema, rows)
    }

    #[test]
    fn schema_index_of_works() {
        let ds = sample_dataset();
        assert_eq!(ds.schema.index_of("id"), Some(0));
        assert_eq!(ds.schema.index_of("name"), Some(1));
        assert_eq!(ds.schema.index_of("missing"), None);
        assert!(ds.schema.require("missing").is_err());
    }

    #[test]
    fn value_ordering_is_numeric_for_ints_and_lexicographic_for_strings() {
        let mut ints = vec![Value::Int64(10), Value::Int64(2), Value::Int64(0)];
        ints.sort();
        assert_eq!(ints, vec![Value::Int64(0), Value::Int64(2), Value::Int64(10)]);

        let mut strs = vec![
            Value::Utf8("M".to_string()),
            Value::Utf8("F".to_string()),
        ];
        strs.sort();
        assert_eq!(strs[0], Value::Utf8("F".to_string()));
    }

    #[test]
    fn value_display_writes_null_as_empty() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Int64(-4).to_string(), "-4");
        assert_eq!(Value::Utf8("x".to_string()).to_string(), "x");
    }

    #[test]
    fn filter_rows_keeps_schema_and_leaves_original_unchanged() {
        let ds = sample_dataset();
        let out = ds.filter_rows(|row| !row.iter().any(Value::is_null));
        assert_eq!(out.schema, ds.schema);
        assert_eq!(out.row_count(), 2);
        assert_eq!(ds.row_count(), 3);
    }

    #[test]
    #[should_panic(expected = "mapped row length")]
    fn map_rows_panics_if_mapper_returns_wrong_arity() {
        let ds = sample_dataset();
        let _ = ds.map_rows(|_row| vec![Value::Int64(1)]);
    }

    #[test]
    fn drop_column_removes_field_and_values() {
        let ds = sample_dataset();
        let out = ds.drop_column("id").unwrap();
        assert_eq!(out.column_names(), vec!["name".to_string()]);
        assert_eq!(out.rows[0], vec![Value::Utf8("a".to_string())]);
        assert!(ds.drop_column("missing").is_err());
    }

    #[test]
    fn append_columns_rejects_duplicate_names() {
        let ds = sample_dataset();
        let err = ds
            .append_columns(
                vec![Field::new("id", DataType::Int64)],
                vec![vec![Value::Int64(0)]; 3],
            )
            .unwrap_err();
        assert!(err.to_string().contains("duplicate column 'id'"));
    }

    #[test]
    fn append_columns_extends_each_row() {
        let ds = sample_dataset();
        let out = ds
            .append_columns(
                vec![Field::new("flag", DataType::Int64)],
                vec![vec![Value::Int64(1)], vec![Value::Int64(0)], vec![Value::Int64(1)]],
            )
            .unwrap();
        assert_eq!(out.shape(), (3, 3));
        assert_eq!(out.rows[1][2], Value::Int64(0));
    }

    #[test]
    fn head_truncates() {
        let ds = sample_dataset();
        assert_eq!(ds.head(2).row_count(), 2);
        assert_eq!(ds.head(10).row_count(), 3);
    }
}
