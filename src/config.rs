//! Fixed locations, column names and cleaning/encoding constants.
//!
//! Nothing here is read from the environment or the command line: [`PipelineConfig::default`]
//! describes the one supported layout. Tests build their own config pointing at a temp dir.

use std::path::{Path, PathBuf};

/// Data directory holding the three input tables.
pub const DEFAULT_DATA_DIR: &str = "ml-1m";
pub const RATINGS_FILE: &str = "ratings.dat";
pub const MOVIES_FILE: &str = "movies.dat";
pub const USERS_FILE: &str = "users.dat";
/// Output file, relative to the current working directory.
pub const DEFAULT_OUTPUT_FILE: &str = "processed_movielens_data.csv";

/// Field separator used by all three input tables.
pub const FIELD_DELIMITER: &str = "::";
/// Separator between genres inside the `Genres` column.
pub const GENRE_SEPARATOR: char = '|';
/// Fill value for missing genres.
pub const UNKNOWN_GENRE: &str = "Unknown";
/// Prefix for one-hot occupation columns (`Occ_<code>`).
pub const OCCUPATION_PREFIX: &str = "Occ";
/// Number of leading zip-code characters that form a region.
pub const ZIP_PREFIX_LEN: usize = 3;

pub const COL_USER_ID: &str = "UserID";
pub const COL_MOVIE_ID: &str = "MovieID";
pub const COL_RATING: &str = "Rating";
pub const COL_TIMESTAMP: &str = "Timestamp";
pub const COL_TITLE: &str = "Title";
pub const COL_GENRES: &str = "Genres";
pub const COL_GENDER: &str = "Gender";
pub const COL_AGE: &str = "Age";
pub const COL_OCCUPATION: &str = "Occupation";
pub const COL_ZIP_CODE: &str = "Zip-code";
pub const COL_ZIP_PREFIX: &str = "ZipPrefix";

/// Paths of the three input tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    pub ratings: PathBuf,
    pub movies: PathBuf,
    pub users: PathBuf,
}

impl InputPaths {
    /// Standard file names inside `data_dir`.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self {
            ratings: dir.join(RATINGS_FILE),
            movies: dir.join(MOVIES_FILE),
            users: dir.join(USERS_FILE),
        }
    }

    /// Paths in the order they are checked and loaded.
    pub fn all(&self) -> [&Path; 3] {
        [&self.ratings, &self.movies, &self.users]
    }
}

/// Everything a single pipeline run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub inputs: InputPaths,
    pub output_path: PathBuf,
    pub field_delimiter: String,
}

impl PipelineConfig {
    /// Inputs under `data_dir`, output at the default file name in the working directory.
    pub fn from_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self {
            inputs: InputPaths::in_dir(data_dir),
            ..Default::default()
        }
    }

    /// Override the output location.
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            inputs: InputPaths::in_dir(DEFAULT_DATA_DIR),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            field_delimiter: FIELD_DELIMITER.to_string(),
        }
    }
}
