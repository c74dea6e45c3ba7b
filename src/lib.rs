//! `movielens-etl` turns the MovieLens-1M dataset (three `::`-delimited tables: ratings, movies,
//! users) into one denormalized CSV file suitable for downstream modeling.
//!
//! The primary entrypoint is [`pipeline::run_pipeline`], which runs five sequential stages:
//!
//! 1. **load**: check that all inputs exist, then read each table into an in-memory
//!    [`types::DataSet`] with a fixed [`types::Schema`] (ISO-8859-1 input, no header row)
//! 2. **clean**: drop ratings with any missing field, fill missing genres with `Unknown`, fill
//!    missing zip codes with the most common zip code
//! 3. **encode**: genres → one 0/1 column per genre, gender → label code, occupation →
//!    `Occ_<code>` 0/1 columns, zip code → `ZipPrefix` (label code of the first three characters)
//! 4. **merge**: ratings ⋈ users on `UserID`, then ⋈ movies on `MovieID` (inner joins)
//! 5. **write**: comma-separated UTF-8 with header, written atomically
//!
//! Categorical codes are assigned in sorted order of the distinct observed values, so the same
//! input always produces a byte-identical output file.
//!
//! ## Quick example
//!
//! ```no_run
//! use movielens_etl::config::PipelineConfig;
//! use movielens_etl::pipeline::{run_pipeline, TracingObserver};
//!
//! # fn main() -> Result<(), movielens_etl::PipelineError> {
//! let config = PipelineConfig::from_data_dir("ml-1m").with_output_path("merged.csv");
//! let report = run_pipeline(&config, &TracingObserver)?;
//! println!("rows={} columns={} size={:.2} MB", report.rows, report.columns, report.file_size_mb());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`config`]: fixed paths, column names and policy constants
//! - [`ingestion`]: the `::`-delimited reader and the MovieLens table loader
//! - [`processing`]: clean / encode / join transforms over [`types::DataSet`]
//! - [`output`]: atomic CSV writer
//! - [`pipeline`]: the end-to-end run and its observer hooks
//! - [`types`]: schema + in-memory dataset types
//! - [`error`]: the error type shared by every stage

pub mod config;
pub mod error;
pub mod ingestion;
pub mod output;
pub mod pipeline;
pub mod processing;
pub mod types;

pub use error::{PipelineError, PipelineResult};
