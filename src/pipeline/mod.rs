//! End-to-end run: load → clean → encode → merge → write.
//!
//! [`run_pipeline`] is the single failure boundary. Each stage consumes the full output of the
//! previous one; nothing is retried and nothing is written unless every stage succeeds.

mod observer;

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::ingestion::{MovieLensTables, load_movielens};
use crate::output::write_csv;
use crate::processing::{
    clean_movies, clean_ratings, clean_users, encode_movies, encode_users, merge_movielens,
    missing_value_counts,
};
use crate::types::DataSet;

pub use observer::{
    CompositeObserver, NoopObserver, PipelineObserver, PipelineStage, StageContext, StageStats,
    TracingObserver,
};

/// Rows previewed in [`PipelineReport::preview`].
pub const PREVIEW_ROWS: usize = 5;

/// Null counts of one input table, before cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingValues {
    pub table: &'static str,
    pub counts: Vec<(String, usize)>,
}

impl MissingValues {
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<String>,
    /// First [`PREVIEW_ROWS`] rows of the merged table.
    pub preview: DataSet,
    pub output_path: PathBuf,
    pub file_size_bytes: u64,
    pub missing_before_clean: Vec<MissingValues>,
}

impl PipelineReport {
    pub fn file_size_mb(&self) -> f64 {
        self.file_size_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Per-table null counts, in ratings/movies/users order.
pub fn missing_values(tables: &MovieLensTables) -> Vec<MissingValues> {
    [
        ("ratings", &tables.ratings),
        ("movies", &tables.movies),
        ("users", &tables.users),
    ]
    .into_iter()
    .map(|(table, ds)| MissingValues {
        table,
        counts: missing_value_counts(ds),
    })
    .collect()
}

/// Apply the per-table missing-value policy.
pub fn clean_tables(tables: &MovieLensTables) -> PipelineResult<MovieLensTables> {
    Ok(MovieLensTables {
        ratings: clean_ratings(&tables.ratings),
        movies: clean_movies(&tables.movies)?,
        users: clean_users(&tables.users)?,
    })
}

/// Encode categorical columns of movies and users. Ratings pass through unchanged.
///
/// Must run once, on cleaned tables: encoding an already encoded table is not meaningful.
pub fn encode_tables(tables: &MovieLensTables) -> PipelineResult<MovieLensTables> {
    Ok(MovieLensTables {
        ratings: tables.ratings.clone(),
        movies: encode_movies(&tables.movies)?,
        users: encode_users(&tables.users)?,
    })
}

/// Clean, encode and merge already-loaded tables.
pub fn transform_tables(tables: &MovieLensTables) -> PipelineResult<DataSet> {
    let encoded = encode_tables(&clean_tables(tables)?)?;
    merge_movielens(&encoded.ratings, &encoded.users, &encoded.movies)
}

/// Run the whole pipeline described by `config`.
///
/// On failure the observer's `on_failure` is called with the failing stage and the error is
/// returned; no output file is created or modified.
pub fn run_pipeline(
    config: &PipelineConfig,
    observer: &dyn PipelineObserver,
) -> PipelineResult<PipelineReport> {
    let mut stage = PipelineStage::Load;
    let result = run_stages(config, observer, &mut stage);
    if let Err(e) = &result {
        observer.on_failure(&StageContext { stage }, e);
    }
    result
}

fn run_stages(
    config: &PipelineConfig,
    observer: &dyn PipelineObserver,
    stage: &mut PipelineStage,
) -> PipelineResult<PipelineReport> {
    let complete = |stage: PipelineStage, stats: StageStats| {
        observer.on_stage_complete(&StageContext { stage }, stats);
    };

    *stage = PipelineStage::Load;
    let raw = load_movielens(&config.inputs, &config.field_delimiter)?;
    complete(*stage, totals(&raw));

    let missing_before_clean = missing_values(&raw);
    for table in &missing_before_clean {
        info!(table = table.table, missing = table.total(), "missing values before cleaning");
        for (column, nulls) in table.counts.iter().filter(|(_, n)| *n > 0) {
            debug!(table = table.table, column = %column, nulls, "missing values in column");
        }
    }

    *stage = PipelineStage::Clean;
    let cleaned = clean_tables(&raw)?;
    complete(*stage, totals(&cleaned));

    *stage = PipelineStage::Encode;
    let encoded = encode_tables(&cleaned)?;
    complete(*stage, totals(&encoded));

    *stage = PipelineStage::Merge;
    let merged = merge_movielens(&encoded.ratings, &encoded.users, &encoded.movies)?;
    let (rows, columns) = merged.shape();
    complete(*stage, StageStats { rows, columns });

    *stage = PipelineStage::Write;
    let file_size_bytes = write_csv(&merged, &config.output_path)?;
    complete(*stage, StageStats { rows, columns });
    info!(
        path = %config.output_path.display(),
        bytes = file_size_bytes,
        "wrote merged dataset"
    );

    Ok(PipelineReport {
        rows,
        columns,
        column_names: merged.column_names(),
        preview: merged.head(PREVIEW_ROWS),
        output_path: config.output_path.clone(),
        file_size_bytes,
        missing_before_clean,
    })
}

fn totals(tables: &MovieLensTables) -> StageStats {
    let all = [&tables.ratings, &tables.movies, &tables.users];
    StageStats {
        rows: all.iter().map(|t| t.row_count()).sum(),
        columns: all.iter().map(|t| t.column_count()).sum(),
    }
}
