//! Comma-separated export and import of catalog records.
//!
//! Records are flattened through their serde wire form so the columns carry
//! the same keys as the JSON API.

use crate::errors::ServiceError;
use crate::models::wire::value_to_text;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Renders `records` as CSV with a header row of `columns`.
pub fn to_csv<T: Serialize>(columns: &[&str], records: &[T]) -> Result<String, ServiceError> {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(
        columns
            .iter()
            .map(|column| escape_field(column))
            .collect::<Vec<_>>()
            .join(","),
    );

    for record in records {
        let value = serde_json::to_value(record)
            .map_err(|e| ServiceError::InternalError(format!("CSV serialization failed: {e}")))?;
        let row = columns
            .iter()
            .map(|column| {
                let field = value
                    .get(*column)
                    .and_then(value_to_text)
                    .unwrap_or_default();
                escape_field(&field)
            })
            .collect::<Vec<_>>();
        lines.push(row.join(","));
    }

    let mut body = lines.join("\n");
    body.push('\n');
    Ok(body)
}

fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r')
    {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

/// Splits CSV text into rows of fields. Quoted fields may contain commas,
/// doubled quotes and line breaks.
pub fn parse_csv(text: &str) -> Result<Vec<Vec<String>>, ServiceError> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' if field.is_empty() => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err(ServiceError::ValidationError(
            "Unterminated quoted CSV field".to_string(),
        ));
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows.retain(|r| !(r.len() == 1 && r[0].is_empty()));
    Ok(rows)
}

/// Parses CSV produced by [`to_csv`] back into records keyed by the header row.
pub fn from_csv<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, ServiceError> {
    let mut rows = parse_csv(text)?.into_iter();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };

    rows.map(|fields| {
        let record: Map<String, Value> = header
            .iter()
            .cloned()
            .zip(fields.into_iter().map(Value::String))
            .collect();
        serde_json::from_value(Value::Object(record))
            .map_err(|e| ServiceError::ValidationError(format!("Invalid CSV record: {e}")))
    })
    .collect()
}
