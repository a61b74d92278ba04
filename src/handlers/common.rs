use crate::errors::ServiceError;
use axum::{
    extract::rejection::JsonRejection,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Plain acknowledgement for mutations.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
        })
    }
}

/// Unwraps a JSON body, turning syntax and content-type rejections into
/// validation errors so every failure shares one error body.
pub fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ServiceError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ServiceError::ValidationError(rejection.body_text()))
}

/// Decodes the record wrapped under `key`, e.g. `{ "product": { ... } }`.
pub fn envelope<T: DeserializeOwned>(
    payload: &Value,
    key: &str,
    invalid: &str,
) -> Result<T, ServiceError> {
    let inner = payload
        .get(key)
        .filter(|value| value.is_object())
        .ok_or_else(|| ServiceError::ValidationError(invalid.to_string()))?;
    T::deserialize(inner).map_err(|_| ServiceError::ValidationError(invalid.to_string()))
}

/// CSV attachment named `<prefix>_<YYYY-MM-DD>.csv`.
pub fn csv_attachment(prefix: &str, body: String) -> Response {
    let disposition = format!(
        "attachment; filename=\"{}_{}.csv\"",
        prefix,
        Utc::now().format("%Y-%m-%d")
    );
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}
