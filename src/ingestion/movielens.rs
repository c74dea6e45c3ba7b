//! Fixed MovieLens-1M table schemas and the loader for all three tables.

use tracing::info;

use crate::config::{
    COL_AGE, COL_GENDER, COL_GENRES, COL_MOVIE_ID, COL_OCCUPATION, COL_RATING, COL_TIMESTAMP,
    COL_TITLE, COL_USER_ID, COL_ZIP_CODE, InputPaths,
};
use crate::error::{PipelineError, PipelineResult};
use crate::types::{DataSet, DataType, Field, Schema};

use super::delimited::ingest_delimited_from_path;

/// `UserID::MovieID::Rating::Timestamp`
pub fn ratings_schema() -> Schema {
    Schema::new(vec![
        Field::new(COL_USER_ID, DataType::Int64),
        Field::new(COL_MOVIE_ID, DataType::Int64),
        Field::new(COL_RATING, DataType::Int64),
        Field::new(COL_TIMESTAMP, DataType::Int64),
    ])
}

/// `MovieID::Title::Genres`
pub fn movies_schema() -> Schema {
    Schema::new(vec![
        Field::new(COL_MOVIE_ID, DataType::Int64),
        Field::new(COL_TITLE, DataType::Utf8),
        Field::new(COL_GENRES, DataType::Utf8),
    ])
}

/// `UserID::Gender::Age::Occupation::Zip-code`
///
/// Zip codes stay strings: some carry a `-NNNN` suffix and leading zeros are significant.
pub fn users_schema() -> Schema {
    Schema::new(vec![
        Field::new(COL_USER_ID, DataType::Int64),
        Field::new(COL_GENDER, DataType::Utf8),
        Field::new(COL_AGE, DataType::Int64),
        Field::new(COL_OCCUPATION, DataType::Int64),
        Field::new(COL_ZIP_CODE, DataType::Utf8),
    ])
}

/// The three raw tables, as loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieLensTables {
    pub ratings: DataSet,
    pub movies: DataSet,
    pub users: DataSet,
}

/// Fails with [`PipelineError::MissingInputFile`] for the first path that does not exist.
pub fn check_inputs_exist(inputs: &InputPaths) -> PipelineResult<()> {
    for path in inputs.all() {
        if !path.exists() {
            return Err(PipelineError::MissingInputFile {
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Check that all inputs exist, then load ratings, movies and users in that order.
pub fn load_movielens(inputs: &InputPaths, delimiter: &str) -> PipelineResult<MovieLensTables> {
    check_inputs_exist(inputs)?;

    let ratings = ingest_delimited_from_path(&inputs.ratings, &ratings_schema(), delimiter)?;
    info!(path = %inputs.ratings.display(), rows = ratings.row_count(), "loaded ratings");

    let movies = ingest_delimited_from_path(&inputs.movies, &movies_schema(), delimiter)?;
    info!(path = %inputs.movies.display(), rows = movies.row_count(), "loaded movies");

    let users = ingest_delimited_from_path(&inputs.users, &users_schema(), delimiter)?;
    info!(path = %inputs.users.display(), rows = users.row_count(), "loaded users");

    Ok(MovieLensTables {
        ratings,
        movies,
        users,
    })
}
