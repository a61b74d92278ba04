//! Lenient field decoding shared by the wire records.
//!
//! Spreadsheet-sourced payloads mix strings, numbers and nulls freely, so every
//! field is accepted as any JSON scalar and normalized to text.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;
use validator::ValidationError;

/// Deserializes any JSON scalar into its text form; null becomes `None`.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_text))
}

pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Parses a decimal, treating blank or malformed input as zero.
pub fn parse_decimal_lenient(raw: Option<&str>) -> Decimal {
    let Some(text) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Decimal::ZERO;
    };
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .unwrap_or(Decimal::ZERO)
}

/// Flag semantics of the hazmat column: any mark other than an explicit
/// negative counts as set.
pub fn is_truthy_flag(raw: Option<&str>) -> bool {
    match raw.map(str::trim) {
        None | Some("") => false,
        Some(text) => !matches!(
            text.to_ascii_lowercase().as_str(),
            "no" | "n" | "false" | "0"
        ),
    }
}

pub fn text(raw: Option<String>) -> String {
    raw.unwrap_or_default()
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[rstest]
    #[case(json!("55"), Some("55"))]
    #[case(json!(55), Some("55"))]
    #[case(json!(1.25), Some("1.25"))]
    #[case(json!(true), Some("true"))]
    #[case(json!(null), None)]
    fn scalars_render_as_text(#[case] input: Value, #[case] expected: Option<&str>) {
        assert_eq!(value_to_text(&input).as_deref(), expected);
    }

    #[rstest]
    #[case(Some("58"), dec!(58))]
    #[case(Some(" 1.75 "), dec!(1.75))]
    #[case(Some(""), Decimal::ZERO)]
    #[case(Some("n/a"), Decimal::ZERO)]
    #[case(None, Decimal::ZERO)]
    fn decimals_parse_leniently(#[case] input: Option<&str>, #[case] expected: Decimal) {
        assert_eq!(parse_decimal_lenient(input), expected);
    }

    #[rstest]
    #[case(Some("x"), true)]
    #[case(Some("X"), true)]
    #[case(Some("yes"), true)]
    #[case(Some("No"), false)]
    #[case(Some(" "), false)]
    #[case(None, false)]
    fn hazmat_flag_truthiness(#[case] input: Option<&str>, #[case] expected: bool) {
        assert_eq!(is_truthy_flag(input), expected);
    }
}
