use super::common::{csv_attachment, envelope, json_body, MessageResponse};
use crate::errors::{ErrorResponse, ServiceError};
use crate::models::{Client, ClientRecord};
use crate::services::clients::{INVALID_CLIENT, INVALID_CLIENTS_FORMAT};
use crate::services::parse_bulk_payload;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

pub fn clients_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clients))
        .route("/update", post(replace_clients))
        .route("/add", post(add_client))
        .route("/export", get(export_clients))
        .route("/:code", put(update_client).delete(delete_client))
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClientListResponse {
    #[schema(value_type = Vec<ClientRecord>)]
    pub clients: Vec<Client>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClientResponse {
    pub success: bool,
    pub message: String,
    #[schema(value_type = ClientRecord)]
    pub client: Client,
}

/// List every client
#[utoipa::path(
    get,
    path = "/api/clients",
    responses((status = 200, description = "All clients", body = ClientListResponse)),
    tag = "clients"
)]
pub async fn list_clients(
    State(state): State<AppState>,
) -> Result<Json<ClientListResponse>, ServiceError> {
    let clients = state.services.clients.list().await?;
    Ok(Json(ClientListResponse { clients }))
}

/// Replace the whole client roster
#[utoipa::path(
    post,
    path = "/api/clients/update",
    responses(
        (status = 200, description = "Clients replaced", body = MessageResponse),
        (status = 400, description = "Payload is not a client list", body = ErrorResponse)
    ),
    tag = "clients"
)]
pub async fn replace_clients(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let payload = json_body(payload)?;
    let clients: Vec<Client> = parse_bulk_payload(&payload, "clients", INVALID_CLIENTS_FORMAT)?;
    state.services.clients.replace_all(clients).await?;
    Ok(MessageResponse::ok("Clients updated successfully"))
}

/// Add a single client
#[utoipa::path(
    post,
    path = "/api/clients/add",
    responses(
        (status = 200, description = "Client added", body = ClientResponse),
        (status = 400, description = "Invalid record or duplicate code", body = ErrorResponse)
    ),
    tag = "clients"
)]
pub async fn add_client(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let payload = json_body(payload)?;
    let client: Client = envelope(&payload, "client", INVALID_CLIENT)?;
    let client = state.services.clients.add(client).await?;
    Ok(Json(ClientResponse {
        success: true,
        message: "Client added successfully".to_string(),
        client,
    }))
}

/// Update the client with the given code
#[utoipa::path(
    put,
    path = "/api/clients/{code}",
    params(("code" = String, Path, description = "Client code")),
    responses(
        (status = 200, description = "Client updated", body = ClientResponse),
        (status = 400, description = "Invalid record or code collision", body = ErrorResponse),
        (status = 404, description = "Unknown client", body = ErrorResponse)
    ),
    tag = "clients"
)]
pub async fn update_client(
    State(state): State<AppState>,
    Path(code): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let payload = json_body(payload)?;
    let client: Client = envelope(&payload, "client", INVALID_CLIENT)?;
    let client = state.services.clients.update(&code, client).await?;
    Ok(Json(ClientResponse {
        success: true,
        message: "Client updated successfully".to_string(),
        client,
    }))
}

/// Delete the client with the given code
#[utoipa::path(
    delete,
    path = "/api/clients/{code}",
    params(("code" = String, Path, description = "Client code")),
    responses(
        (status = 200, description = "Client deleted", body = MessageResponse),
        (status = 404, description = "Unknown client", body = ErrorResponse)
    ),
    tag = "clients"
)]
pub async fn delete_client(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.clients.delete(&code).await?;
    Ok(MessageResponse::ok("Client deleted successfully"))
}

/// Download the client roster as CSV
#[utoipa::path(
    get,
    path = "/api/clients/export",
    responses((status = 200, description = "CSV attachment", content_type = "text/csv", body = String)),
    tag = "clients"
)]
pub async fn export_clients(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let body = state.services.clients.export_csv().await?;
    Ok(csv_attachment("Clients_Export", body))
}
