//! In-memory data transformations.
//!
//! The processing layer operates on [`crate::types::DataSet`] values produced by ingestion.
//! Every transform borrows its input and returns a new dataset, so each stage can be tested on
//! its own.
//!
//! - [`clean`]: missing-value policies (drop rows, constant fill, mode fill)
//! - [`encode`]: label codes, one-hot and multi-hot indicator columns
//! - [`join`]: equality inner joins
//!
//! ## Example: clean → encode → join
//!
//! ```rust
//! use movielens_etl::processing::{drop_nulls, inner_join, label_encode};
//! use movielens_etl::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let ratings = DataSet::new(
//!     Schema::new(vec![
//!         Field::new("UserID", DataType::Int64),
//!         Field::new("Rating", DataType::Int64),
//!     ]),
//!     vec![
//!         vec![Value::Int64(1), Value::Int64(5)],
//!         vec![Value::Int64(2), Value::Null],
//!     ],
//! );
//! let users = DataSet::new(
//!     Schema::new(vec![
//!         Field::new("UserID", DataType::Int64),
//!         Field::new("Gender", DataType::Utf8),
//!     ]),
//!     vec![
//!         vec![Value::Int64(1), Value::Utf8("M".to_string())],
//!         vec![Value::Int64(2), Value::Utf8("F".to_string())],
//!     ],
//! );
//!
//! let ratings = drop_nulls(&ratings);
//! let (users, _) = label_encode(&users, "Gender").unwrap();
//! let merged = inner_join(&ratings, &users, "UserID").unwrap();
//!
//! assert_eq!(merged.column_names(), vec!["UserID", "Rating", "Gender"]);
//! assert_eq!(merged.rows, vec![vec![Value::Int64(1), Value::Int64(5), Value::Int64(1)]]);
//! ```

pub mod clean;
pub mod encode;
pub mod join;

pub use clean::{
    clean_movies, clean_ratings, clean_users, drop_nulls, fill_nulls, fill_nulls_with_mode,
    missing_value_counts, modal_value,
};
pub use encode::{
    LabelEncoder, encode_movies, encode_users, label_encode, multi_hot_encode, one_hot_encode,
    prefix_label_encode,
};
pub use join::{inner_join, merge_movielens};
