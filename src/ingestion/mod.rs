//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`load_movielens`], which:
//!
//! - checks that all three input files exist before parsing anything
//! - loads ratings, movies and users with their fixed [`crate::types::Schema`]s
//!
//! The format-level reader lives in [`delimited`].

pub mod delimited;
pub mod movielens;

pub use delimited::{ingest_delimited_from_path, ingest_delimited_from_reader};
pub use movielens::{
    MovieLensTables, check_inputs_exist, load_movielens, movies_schema, ratings_schema,
    users_schema,
};
