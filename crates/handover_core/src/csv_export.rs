//! Comma-separated export of uniform records.

use csv::{Terminator, WriterBuilder};
use serde::Serialize;
use serde_json::{Map, Value};

/// One exported record: column name to JSON value, in column order.
pub type CsvRow = Map<String, Value>;

#[derive(Debug, thiserror::Error)]
pub enum CsvError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv output is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("could not convert record: {0}")]
    Convert(#[from] serde_json::Error),
    #[error("record {0} is not an object")]
    NotAnObject(usize),
}

/// Serializes rows against the columns of the first row.
///
/// Strings are written verbatim, numbers and booleans as JSON text; nested
/// objects, arrays, null and missing keys become empty cells. Fields holding a
/// comma, quote or line break are quoted. Records end in CRLF.
pub fn to_csv(rows: &[CsvRow]) -> Result<String, CsvError> {
    let Some(first) = rows.first() else {
        return Ok(String::new());
    };
    let headers: Vec<&str> = first.keys().map(String::as_str).collect();

    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record(&headers)?;
    for row in rows {
        writer.write_record(headers.iter().map(|header| cell(row.get(*header))))?;
    }

    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Converts serializable records into CSV rows, keeping field order.
pub fn records_to_rows<T: Serialize>(records: &[T]) -> Result<Vec<CsvRow>, CsvError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| match serde_json::to_value(record)? {
            Value::Object(map) => Ok(map),
            _ => Err(CsvError::NotAnObject(index)),
        })
        .collect()
}

fn cell(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Null) | Some(Value::Object(_)) | Some(Value::Array(_)) | None => {
            String::new()
        }
    }
}
