//! Missing-value handling for [`crate::types::DataSet`].
//!
//! Every function returns a new dataset; inputs are never modified.

use std::collections::HashMap;

use crate::config::{COL_GENRES, COL_ZIP_CODE, UNKNOWN_GENRE};
use crate::error::{PipelineError, PipelineResult};
use crate::types::{DataSet, Value};

/// Per-column count of [`Value::Null`] cells, in schema order.
pub fn missing_value_counts(dataset: &DataSet) -> Vec<(String, usize)> {
    dataset
        .schema
        .field_names()
        .enumerate()
        .map(|(idx, name)| {
            let nulls = dataset.rows.iter().filter(|row| row[idx].is_null()).count();
            (name.to_string(), nulls)
        })
        .collect()
}

/// Drop every row that has a null in any column.
pub fn drop_nulls(dataset: &DataSet) -> DataSet {
    dataset.filter_rows(|row| !row.iter().any(Value::is_null))
}

/// Replace nulls in `column` with `fill`. Other columns are untouched.
pub fn fill_nulls(dataset: &DataSet, column: &str, fill: &Value) -> PipelineResult<DataSet> {
    let idx = dataset.schema.require(column)?;
    Ok(dataset.map_rows(|row| {
        let mut out = row.to_vec();
        if out[idx].is_null() {
            out[idx] = fill.clone();
        }
        out
    }))
}

/// Most frequent non-null value of `column`.
///
/// Ties go to the smallest value in [`Value`] order. Returns `None` when the column has no
/// non-null values.
pub fn modal_value(dataset: &DataSet, column: &str) -> PipelineResult<Option<Value>> {
    let mut counts: HashMap<&Value, usize> = HashMap::new();
    for value in dataset.column_values(column)? {
        if !value.is_null() {
            *counts.entry(value).or_default() += 1;
        }
    }

    Ok(counts
        .into_iter()
        .max_by(|(va, ca), (vb, cb)| ca.cmp(cb).then_with(|| vb.cmp(va)))
        .map(|(value, _)| value.clone()))
}

/// Replace nulls in `column` with its modal value.
///
/// A column without nulls is returned unchanged. A column whose values are all null is a
/// [`PipelineError::NoModalValue`].
pub fn fill_nulls_with_mode(dataset: &DataSet, column: &str) -> PipelineResult<DataSet> {
    let has_nulls = dataset.column_values(column)?.any(Value::is_null);
    if !has_nulls {
        return Ok(dataset.clone());
    }

    let mode = modal_value(dataset, column)?.ok_or_else(|| PipelineError::NoModalValue {
        column: column.to_string(),
    })?;
    fill_nulls(dataset, column, &mode)
}

/// Ratings: rows with any missing field are unusable and are dropped.
pub fn clean_ratings(ratings: &DataSet) -> DataSet {
    drop_nulls(ratings)
}

/// Movies: a missing genre list becomes the single genre `Unknown`.
pub fn clean_movies(movies: &DataSet) -> PipelineResult<DataSet> {
    fill_nulls(movies, COL_GENRES, &Value::Utf8(UNKNOWN_GENRE.to_string()))
}

/// Users: a missing zip code becomes the most common zip code.
pub fn clean_users(users: &DataSet) -> PipelineResult<DataSet> {
    fill_nulls_with_mode(users, COL_ZIP_CODE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::{movies_schema, ratings_schema, users_schema};
    use crate::types::{DataSet, Value};

    fn s(v: &str) -> Value {
        Value::Utf8(v.to_string())
    }

    fn users(zips: &[Option<&str>]) -> DataSet {
        let rows = zips
            .iter()
            .enumerate()
            .map(|(i, zip)| {
                vec![
                    Value::Int64(i as i64 + 1),
                    s("F"),
                    Value::Int64(25),
                    Value::Int64(4),
                    zip.map(s).unwrap_or(Value::Null),
                ]
            })
            .collect();
        DataSet::new(users_schema(), rows)
    }

    #[test]
    fn clean_ratings_drops_rows_with_any_null() {
        let ds = DataSet::new(
            ratings_schema(),
            vec![
                vec![Value::Int64(1), Value::Int64(1), Value::Int64(5), Value::Int64(978300760)],
                vec![Value::Int64(1), Value::Int64(2), Value::Int64(3), Value::Null],
                vec![Value::Null, Value::Int64(3), Value::Int64(4), Value::Int64(978300761)],
            ],
        );
        let out = clean_ratings(&ds);
        assert_eq!(out.row_count(), 1);
        assert_eq!(out.rows[0][1], Value::Int64(1));
        assert!(missing_value_counts(&out).iter().all(|(_, n)| *n == 0));
    }

    #[test]
    fn clean_movies_fills_only_genres() {
        let ds = DataSet::new(
            movies_schema(),
            vec![
                vec![Value::Int64(1), Value::Null, Value::Null],
                vec![Value::Int64(2), s("Heat (1995)"), s("Action")],
            ],
        );
        let out = clean_movies(&ds).unwrap();
        assert_eq!(out.rows[0][2], s("Unknown"));
        assert_eq!(out.rows[0][1], Value::Null);
        assert_eq!(out.rows[1][2], s("Action"));
    }

    #[test]
    fn clean_users_fills_zip_with_mode() {
        let ds = users(&[Some("48067"), None, Some("02460"), Some("48067")]);
        let out = clean_users(&ds).unwrap();
        assert_eq!(out.rows[1][4], s("48067"));
        assert_eq!(missing_value_counts(&out)[4], ("Zip-code".to_string(), 0));
    }

    #[test]
    fn mode_ties_go_to_the_smallest_value() {
        let ds = users(&[Some("70072"), Some("10023"), None, Some("70072"), Some("10023")]);
        assert_eq!(modal_value(&ds, "Zip-code").unwrap(), Some(s("10023")));
        let out = clean_users(&ds).unwrap();
        assert_eq!(out.rows[2][4], s("10023"));
    }

    #[test]
    fn all_null_zip_column_has_no_mode() {
        let ds = users(&[None, None]);
        let err = clean_users(&ds).unwrap_err();
        assert!(matches!(err, PipelineError::NoModalValue { ref column } if column == "Zip-code"));
    }

    #[test]
    fn column_without_nulls_is_returned_unchanged() {
        let ds = users(&[Some("55117")]);
        assert_eq!(clean_users(&ds).unwrap(), ds);
    }

    #[test]
    fn missing_value_counts_reports_every_column() {
        let ds = users(&[None, Some("55117"), None]);
        let counts = missing_value_counts(&ds);
        assert_eq!(counts.len(), 5);
        assert_eq!(counts[0], ("UserID".to_string(), 0));
        assert_eq!(counts[4], ("Zip-code".to_string(), 2));
    }
}
