pub mod clients;
pub mod documents;
pub mod export;
pub mod inventory;

use crate::errors::ServiceError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Pulls the list stored under `key` out of a bulk update payload.
///
/// Anything other than a JSON array under `key` is rejected with `invalid`
/// as the message.
pub fn parse_bulk_payload<T: DeserializeOwned>(
    payload: &Value,
    key: &str,
    invalid: &str,
) -> Result<Vec<T>, ServiceError> {
    let items = payload
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| ServiceError::ValidationError(invalid.to_string()))?;

    items
        .iter()
        .map(T::deserialize)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ServiceError::ValidationError(format!("{invalid}: {e}")))
}
