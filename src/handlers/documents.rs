use super::common::{json_body, MessageResponse};
use crate::errors::{ErrorResponse, ServiceError};
use crate::models::DocumentSummary;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;

pub fn documents_routes() -> Router<AppState> {
    Router::new()
        .route("/save-bol", post(save_bol))
        .route("/bol-files", get(list_bol_files))
        .route("/view-bol/:filename", get(view_bol))
        .route("/csv-files", get(list_csv_files))
        .route("/read-csv/:filename", get(read_csv))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveBolRequest {
    pub content: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BolFilesResponse {
    pub files: Vec<DocumentSummary>,
}

/// Persist a rendered Bill of Lading
#[utoipa::path(
    post,
    path = "/api/save-bol",
    request_body = SaveBolRequest,
    responses(
        (status = 200, description = "Document saved", body = MessageResponse),
        (status = 400, description = "Missing content", body = ErrorResponse)
    ),
    tag = "documents"
)]
pub async fn save_bol(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let payload = json_body(payload)?;
    let request: SaveBolRequest = serde_json::from_value(payload)
        .map_err(|e| ServiceError::ValidationError(format!("Invalid BOL payload: {e}")))?;
    let content = request
        .content
        .ok_or_else(|| ServiceError::ValidationError("BOL content is required".to_string()))?;

    let filename = state
        .services
        .documents
        .save(content, request.filename)
        .await?;
    Ok(MessageResponse::ok(format!("BOL saved as {filename}")))
}

/// Most recent saved documents
#[utoipa::path(
    get,
    path = "/api/bol-files",
    responses((status = 200, description = "Saved documents, newest first", body = BolFilesResponse)),
    tag = "documents"
)]
pub async fn list_bol_files(
    State(state): State<AppState>,
) -> Result<Json<BolFilesResponse>, ServiceError> {
    let files = state.services.documents.list().await?;
    Ok(Json(BolFilesResponse { files }))
}

/// Fetch a saved document as HTML
#[utoipa::path(
    get,
    path = "/api/view-bol/{filename}",
    params(("filename" = String, Path, description = "Saved document name")),
    responses(
        (status = 200, description = "Document body", content_type = "text/html", body = String),
        (status = 404, description = "No document with that name", body = ErrorResponse)
    ),
    tag = "documents"
)]
pub async fn view_bol(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Html<String>, ServiceError> {
    let document = state.services.documents.find(&filename).await?;
    Ok(Html(document.content))
}

/// Server-side CSV files are not kept; always empty.
pub async fn list_csv_files() -> Json<Value> {
    Json(json!({ "files": [] }))
}

pub async fn read_csv(Path(_filename): Path<String>) -> ServiceError {
    ServiceError::NotFound("CSV file access is not available".to_string())
}
