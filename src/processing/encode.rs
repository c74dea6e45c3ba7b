//! Categorical encoders: label codes, one-hot and multi-hot indicator columns.
//!
//! Category order is always the sorted order of the distinct observed values (see the
//! [`Value`] ordering), so codes and column order depend only on the data, never on row order
//! or hashing.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use crate::config::{
    COL_GENDER, COL_GENRES, COL_OCCUPATION, COL_ZIP_CODE, COL_ZIP_PREFIX, GENRE_SEPARATOR,
    OCCUPATION_PREFIX, ZIP_PREFIX_LEN,
};
use crate::error::PipelineResult;
use crate::types::{DataSet, DataType, Field, Value};

/// Maps each distinct non-null value to a dense code `0..n`, in sorted value order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelEncoder {
    codes: BTreeMap<Value, i64>,
}

impl LabelEncoder {
    /// Learn the label set from `values`. Nulls are ignored.
    pub fn fit<'a>(values: impl IntoIterator<Item = &'a Value>) -> Self {
        let distinct: BTreeSet<&Value> = values.into_iter().filter(|v| !v.is_null()).collect();
        let codes = distinct
            .into_iter()
            .enumerate()
            .map(|(code, value)| (value.clone(), code as i64))
            .collect();
        Self { codes }
    }

    /// Labels in code order.
    pub fn classes(&self) -> impl Iterator<Item = &Value> {
        self.codes.keys()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Code for `value`, if it was seen during [`Self::fit`].
    pub fn code(&self, value: &Value) -> Option<i64> {
        self.codes.get(value).copied()
    }

    /// Encode one value. Null and unseen labels map to [`Value::Null`].
    pub fn transform(&self, value: &Value) -> Value {
        self.code(value).map(Value::Int64).unwrap_or(Value::Null)
    }
}

/// Replace `column` (in place, same position) with its label codes.
pub fn label_encode(dataset: &DataSet, column: &str) -> PipelineResult<(DataSet, LabelEncoder)> {
    let idx = dataset.schema.require(column)?;
    let encoder = LabelEncoder::fit(dataset.column_values(column)?);

    let mut out = dataset.map_rows(|row| {
        let mut out = row.to_vec();
        out[idx] = encoder.transform(&row[idx]);
        out
    });
    out.schema.fields[idx].data_type = DataType::Int64;

    Ok((out, encoder))
}

/// Expand a set-valued string column into one 0/1 column per distinct token.
///
/// Each non-null cell is split on `separator`; empty tokens are ignored. The source column is
/// dropped and the indicator columns, named after the tokens in sorted order, are appended
/// after the remaining columns. A null cell yields all zeros.
pub fn multi_hot_encode(dataset: &DataSet, column: &str, separator: char) -> PipelineResult<DataSet> {
    let per_row: Vec<BTreeSet<&str>> = dataset
        .column_values(column)?
        .map(|value| match value {
            Value::Utf8(s) => s.split(separator).filter(|t| !t.is_empty()).collect(),
            Value::Int64(_) | Value::Null => BTreeSet::new(),
        })
        .collect();
    let vocabulary: BTreeSet<&str> = per_row.iter().flatten().copied().collect();
    debug!(column, categories = vocabulary.len(), "multi-hot vocabulary");

    let fields = vocabulary
        .iter()
        .map(|token| Field::new(*token, DataType::Int64))
        .collect();
    let indicators = per_row
        .iter()
        .map(|tokens| {
            vocabulary
                .iter()
                .map(|token| Value::Int64(i64::from(tokens.contains(token))))
                .collect()
        })
        .collect();

    dataset.drop_column(column)?.append_columns(fields, indicators)
}

/// Expand a single-valued column into one `<prefix>_<value>` 0/1 column per distinct value.
///
/// The source column is dropped and the indicator columns are appended after the remaining
/// columns, in sorted value order. A null cell yields all zeros.
pub fn one_hot_encode(dataset: &DataSet, column: &str, prefix: &str) -> PipelineResult<DataSet> {
    let encoder = LabelEncoder::fit(dataset.column_values(column)?);
    debug!(column, categories = encoder.len(), "one-hot categories");

    let fields = encoder
        .classes()
        .map(|value| Field::new(format!("{prefix}_{value}"), DataType::Int64))
        .collect();
    let indicators = dataset
        .column_values(column)?
        .map(|value| {
            let hot = encoder.code(value);
            (0..encoder.len() as i64)
                .map(|code| Value::Int64(i64::from(hot == Some(code))))
                .collect()
        })
        .collect();

    dataset.drop_column(column)?.append_columns(fields, indicators)
}

/// Replace `column` with `output`: the label code of its first `prefix_len` characters.
///
/// Values are taken in their string form, so integer columns work too. `output` is appended
/// after the remaining columns.
pub fn prefix_label_encode(
    dataset: &DataSet,
    column: &str,
    prefix_len: usize,
    output: &str,
) -> PipelineResult<(DataSet, LabelEncoder)> {
    let prefixes: Vec<Value> = dataset
        .column_values(column)?
        .map(|value| match value {
            Value::Null => Value::Null,
            other => Value::Utf8(other.to_string().chars().take(prefix_len).collect()),
        })
        .collect();
    let encoder = LabelEncoder::fit(&prefixes);

    let codes = prefixes.iter().map(|p| vec![encoder.transform(p)]).collect();
    let out = dataset
        .drop_column(column)?
        .append_columns(vec![Field::new(output, DataType::Int64)], codes)?;

    Ok((out, encoder))
}

/// Movies: `Genres` becomes one indicator column per genre.
pub fn encode_movies(movies: &DataSet) -> PipelineResult<DataSet> {
    multi_hot_encode(movies, COL_GENRES, GENRE_SEPARATOR)
}

/// Users: label-coded `Gender`, one-hot `Occupation`, and `ZipPrefix` in place of `Zip-code`.
pub fn encode_users(users: &DataSet) -> PipelineResult<DataSet> {
    let (users, gender) = label_encode(users, COL_GENDER)?;
    let mapping = gender
        .classes()
        .map(|label| format!("{label}={}", gender.transform(label)))
        .collect::<Vec<_>>()
        .join(", ");
    info!(mapping = %mapping, "gender label codes");

    let users = one_hot_encode(&users, COL_OCCUPATION, OCCUPATION_PREFIX)?;

    let (users, zip) = prefix_label_encode(&users, COL_ZIP_CODE, ZIP_PREFIX_LEN, COL_ZIP_PREFIX)?;
    info!(regions = zip.len(), "zip prefix codes");

    Ok(users)
}
