use super::common::{csv_attachment, envelope, json_body, MessageResponse};
use crate::errors::{ErrorResponse, ServiceError};
use crate::models::{Product, ProductRecord};
use crate::services::inventory::{INVALID_PRODUCT, INVALID_PRODUCTS_FORMAT};
use crate::services::parse_bulk_payload;
use crate::store::PRODUCT_NOT_FOUND;
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

pub fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/update", post(replace_products))
        .route("/add", post(add_product))
        .route("/export", get(export_products))
        .route("/:id", put(update_product).delete(delete_product))
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    #[schema(value_type = Vec<ProductRecord>)]
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub success: bool,
    pub message: String,
    #[schema(value_type = ProductRecord)]
    pub product: Product,
}

fn parse_id(raw: &str) -> Result<i64, ServiceError> {
    raw.trim()
        .parse()
        .map_err(|_| ServiceError::NotFound(PRODUCT_NOT_FOUND.to_string()))
}

/// List every product
#[utoipa::path(
    get,
    path = "/api/inventory",
    responses(
        (status = 200, description = "All products", body = ProductListResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<ProductListResponse>, ServiceError> {
    let products = state.services.inventory.list().await?;
    Ok(Json(ProductListResponse { products }))
}

/// Replace the whole product list
#[utoipa::path(
    post,
    path = "/api/inventory/update",
    responses(
        (status = 200, description = "Inventory replaced", body = MessageResponse),
        (status = 400, description = "Payload is not a product list", body = ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn replace_products(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let payload = json_body(payload)?;
    let products: Vec<Product> =
        parse_bulk_payload(&payload, "products", INVALID_PRODUCTS_FORMAT)?;
    state.services.inventory.replace_all(products).await?;
    Ok(MessageResponse::ok("Inventory updated successfully"))
}

/// Add a single product
#[utoipa::path(
    post,
    path = "/api/inventory/add",
    responses(
        (status = 200, description = "Product added", body = ProductResponse),
        (status = 400, description = "Invalid record or duplicate code", body = ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn add_product(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let payload = json_body(payload)?;
    let product: Product = envelope(&payload, "product", INVALID_PRODUCT)?;
    let product = state.services.inventory.add(product).await?;
    Ok(Json(ProductResponse {
        success: true,
        message: "Product added successfully".to_string(),
        product,
    }))
}

/// Update the product with the given id
#[utoipa::path(
    put,
    path = "/api/inventory/{id}",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid record or code collision", body = ErrorResponse),
        (status = 404, description = "Unknown product", body = ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let id = parse_id(&id)?;
    let payload = json_body(payload)?;
    let product: Product = envelope(&payload, "product", INVALID_PRODUCT)?;
    let product = state.services.inventory.update(id, product).await?;
    Ok(Json(ProductResponse {
        success: true,
        message: "Product updated successfully".to_string(),
        product,
    }))
}

/// Delete the product with the given id
#[utoipa::path(
    delete,
    path = "/api/inventory/{id}",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 404, description = "Unknown product", body = ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let id = parse_id(&id)?;
    state.services.inventory.delete(id).await?;
    Ok(MessageResponse::ok("Product deleted successfully"))
}

/// Download the product list as CSV
#[utoipa::path(
    get,
    path = "/api/inventory/export",
    responses((status = 200, description = "CSV attachment", content_type = "text/csv", body = String)),
    tag = "inventory"
)]
pub async fn export_products(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let body = state.services.inventory.export_csv().await?;
    Ok(csv_attachment("Inventory_Export", body))
}
