use crate::errors::ErrorResponse;
use crate::handlers::{clients, common::MessageResponse, documents, inventory};
use crate::health::HealthInfo;
use crate::models::{ClientRecord, DocumentSummary, ProductRecord};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "BOL API",
        version = "0.1.0",
        description = r#"
# Chemical Inventory & Bill of Lading API

Product inventory, client roster and generated Bill of Lading storage for a
chemical distributor.

Records use spreadsheet column names as JSON keys (`"Product Code"`,
`"Client Name"`, ...). Every field accepts a string, number or null.

Errors share one body: `{ "error": "<message>", "code": "<kind>" }`.
Duplicate codes and malformed payloads answer 400.
"#
    ),
    paths(
        inventory::list_products,
        inventory::replace_products,
        inventory::add_product,
        inventory::update_product,
        inventory::delete_product,
        inventory::export_products,
        clients::list_clients,
        clients::replace_clients,
        clients::add_client,
        clients::update_client,
        clients::delete_client,
        clients::export_clients,
        documents::save_bol,
        documents::list_bol_files,
        documents::view_bol,
        crate::health::health_check,
    ),
    components(schemas(
        ProductRecord,
        ClientRecord,
        DocumentSummary,
        MessageResponse,
        ErrorResponse,
        HealthInfo,
        inventory::ProductListResponse,
        inventory::ProductResponse,
        clients::ClientListResponse,
        clients::ClientResponse,
        documents::SaveBolRequest,
        documents::BolFilesResponse,
    )),
    tags(
        (name = "inventory", description = "Product catalog"),
        (name = "clients", description = "Client roster"),
        (name = "documents", description = "Generated Bills of Lading"),
        (name = "health", description = "Service probes"),
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
