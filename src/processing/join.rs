//! Equality joins between [`DataSet`]s.

use std::collections::HashMap;

use tracing::info;

use crate::config::{COL_MOVIE_ID, COL_USER_ID};
use crate::error::{PipelineError, PipelineResult};
use crate::types::{DataSet, Schema, Value};

/// Inner join of `left` and `right` on the column `key`.
///
/// - Output columns: every `left` column, then every `right` column except `key`.
/// - Output rows follow `left` row order; each left row is followed by its matches in `right`
///   row order. Duplicate right keys multiply rows.
/// - Null keys never match.
/// - A non-key column present on both sides is a [`PipelineError::SchemaMismatch`].
pub fn inner_join(left: &DataSet, right: &DataSet, key: &str) -> PipelineResult<DataSet> {
    let left_key = left.schema.require(key)?;
    let right_key = right.schema.require(key)?;

    let mut fields = left.schema.fields.clone();
    for (idx, field) in right.schema.fields.iter().enumerate() {
        if idx == right_key {
            continue;
        }
        if left.schema.index_of(&field.name).is_some() {
            return Err(PipelineError::SchemaMismatch {
                message: format!("column '{}' exists on both sides of join on '{key}'", field.name),
            });
        }
        fields.push(field.clone());
    }

    let mut index: HashMap<&Value, Vec<usize>> = HashMap::new();
    for (row_idx, row) in right.rows.iter().enumerate() {
        let k = &row[right_key];
        if !k.is_null() {
            index.entry(k).or_default().push(row_idx);
        }
    }

    let width = fields.len();
    let mut rows = Vec::new();
    for left_row in &left.rows {
        let Some(matches) = index.get(&left_row[left_key]) else {
            continue;
        };
        for &right_idx in matches {
            let mut out = Vec::with_capacity(width);
            out.extend(left_row.iter().cloned());
            out.extend(
                right.rows[right_idx]
                    .iter()
                    .enumerate()
                    .filter(|(idx, _)| *idx != right_key)
                    .map(|(_, v)| v.clone()),
            );
            rows.push(out);
        }
    }

    Ok(DataSet::new(Schema::new(fields), rows))
}

/// `ratings ⋈ users` on `UserID`, then `⋈ movies` on `MovieID`.
///
/// An empty result is an error: nothing downstream can use it.
pub fn merge_movielens(
    ratings: &DataSet,
    users: &DataSet,
    movies: &DataSet,
) -> PipelineResult<DataSet> {
    let with_users = inner_join(ratings, users, COL_USER_ID)?;
    let merged = inner_join(&with_users, movies, COL_MOVIE_ID)?;

    let dropped = ratings.row_count().saturating_sub(merged.row_count());
    info!(
        rows = merged.row_count(),
        columns = merged.column_count(),
        dropped_ratings = dropped,
        "merged ratings, users and movies"
    );

    if merged.row_count() == 0 {
        return Err(PipelineError::EmptyResult {
            stage: "merge".to_string(),
        });
    }
    Ok(merged)
}
