//! Parsing utilities for MetaTrader 5 data.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::terminal::Record;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Missing field: {0}")]
    MissingField(String),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

pub fn extract_string_field(obj: &Record, field: &str) -> Result<String, ParseError> {
    obj.get(field)
        .and_then(Value::as_str)
        .map(|s| s.to_string())
        .ok_or_else(|| ParseError::MissingField(field.to_string()))
}

pub fn extract_number_field(obj: &Record, field: &str) -> Result<f64, ParseError> {
    obj.get(field)
        .and_then(Value::as_f64)
        .ok_or_else(|| ParseError::MissingField(field.to_string()))
}

pub fn extract_integer_field(obj: &Record, field: &str) -> Result<i64, ParseError> {
    obj.get(field)
        .and_then(Value::as_i64)
        .ok_or_else(|| ParseError::MissingField(field.to_string()))
}

/// Parses a `YYYY-MM-DD` date as midnight UTC.
pub fn parse_utc_date(s: &str) -> Result<DateTime<Utc>, ParseError> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| ParseError::InvalidValue(format!("date '{s}': {e}")))?;
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| ParseError::InvalidValue(format!("date '{s}'")))
}

/// Reshapes records so every row carries the first record's columns, in order.
///
/// Columns a later record lacks become `null`; fields the first record lacks
/// are dropped.
pub fn tabulate(records: Vec<Record>) -> Vec<Record> {
    let Some(first) = records.first() else {
        return Vec::new();
    };
    let columns: Vec<String> = first.keys().cloned().collect();

    records
        .into_iter()
        .map(|mut record| {
            columns
                .iter()
                .map(|column| {
                    let value = record.remove(column).unwrap_or(Value::Null);
                    (column.clone(), value)
                })
                .collect()
        })
        .collect()
}
