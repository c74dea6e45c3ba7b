//! Header-less, multi-character-delimited text ingestion (the MovieLens `.dat` format).
//!
//! Rules:
//!
//! - There is no header row; column names come from the [`Schema`].
//! - Input bytes are decoded as ISO-8859-1, so every byte value is accepted.
//! - Lines end in `\n` (a trailing `\r` is stripped); blank lines are skipped.
//! - Each line is split on the literal delimiter and must have exactly one field per schema
//!   field.
//! - Empty fields become [`Value::Null`]; other fields are parsed by the field's type.

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{PipelineError, PipelineResult};
use crate::types::{DataSet, DataType, Schema, Value};

/// Column name reported when a whole record (rather than one value) is malformed.
const RECORD_COLUMN: &str = "<record>";

/// Ingest a delimited file into an in-memory [`DataSet`].
///
/// The file is read fully and closed before parsing starts.
pub fn ingest_delimited_from_path(
    path: impl AsRef<Path>,
    schema: &Schema,
    delimiter: &str,
) -> PipelineResult<DataSet> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "read input table");
    parse_latin1(&bytes, schema, delimiter)
}

/// Ingest delimited data from any reader (in-memory buffers, sockets, ...).
pub fn ingest_delimited_from_reader<R: Read>(
    mut reader: R,
    schema: &Schema,
    delimiter: &str,
) -> PipelineResult<DataSet> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    parse_latin1(&bytes, schema, delimiter)
}

fn parse_latin1(bytes: &[u8], schema: &Schema, delimiter: &str) -> PipelineResult<DataSet> {
    if delimiter.is_empty() {
        return Err(PipelineError::SchemaMismatch {
            message: "field delimiter must not be empty".to_string(),
        });
    }

    let text = encoding_rs::mem::decode_latin1(bytes);
    let width = schema.fields.len();

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (line_idx0, line) in text.split('\n').enumerate() {
        let user_row = line_idx0 + 1;
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            continue;
        }

        let raw_fields: Vec<&str> = line.split(delimiter).collect();
        if raw_fields.len() != width {
            return Err(PipelineError::ParseError {
                row: user_row,
                column: RECORD_COLUMN.to_string(),
                raw: line.to_owned(),
                message: format!("expected {width} fields, found {}", raw_fields.len()),
            });
        }

        let mut row: Vec<Value> = Vec::with_capacity(width);
        for (field, raw) in schema.fields.iter().zip(raw_fields) {
            row.push(parse_typed_value(user_row, &field.name, field.data_type, raw)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

fn parse_typed_value(
    row: usize,
    column: &str,
    data_type: DataType,
    raw: &str,
) -> PipelineResult<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(trimmed.to_owned())),
        DataType::Int64 => trimmed.parse::<i64>().map(Value::Int64).map_err(|e| {
            PipelineError::ParseError {
                row,
                column: column.to_owned(),
                raw: raw.to_owned(),
                message: e.to_string(),
            }
        }),
    }
}
