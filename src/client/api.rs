use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::errors::ErrorResponse;
use crate::handlers::clients::{ClientListResponse, ClientResponse};
use crate::handlers::common::MessageResponse;
use crate::handlers::documents::BolFilesResponse;
use crate::handlers::inventory::{ProductListResponse, ProductResponse};
use crate::models::{Client, DocumentSummary, Product};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server could not be reached or the transfer broke off.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with an error body.
    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Could not decode server response: {0}")]
    Decode(String),

    /// Rejected locally before anything was sent.
    #[error("{0}")]
    Invalid(String),
}

impl ClientError {
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }
}

/// Typed wrapper over the `/api` routes.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(error) => error.error,
            Err(_) if body.trim().is_empty() => status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
            Err(_) => body,
        };
        debug!(status = status.as_u16(), %message, "api request failed");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn text(&self, request: RequestBuilder) -> Result<String, ClientError> {
        let response = self.send(request).await?;
        Ok(response.text().await?)
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let body: ProductListResponse = self.json(self.http.get(self.url("/api/inventory"))).await?;
        Ok(body.products)
    }

    #[instrument(skip_all, fields(count = products.len()))]
    pub async fn replace_products(&self, products: &[Product]) -> Result<String, ClientError> {
        let request = self
            .http
            .post(self.url("/api/inventory/update"))
            .json(&json!({ "products": products }));
        let body: MessageResponse = self.json(request).await?;
        Ok(body.message)
    }

    #[instrument(skip_all, fields(code = %product.code))]
    pub async fn add_product(&self, product: &Product) -> Result<Product, ClientError> {
        let request = self
            .http
            .post(self.url("/api/inventory/add"))
            .json(&json!({ "product": product }));
        let body: ProductResponse = self.json(request).await?;
        Ok(body.product)
    }

    #[instrument(skip(self, product))]
    pub async fn update_product(&self, id: i64, product: &Product) -> Result<Product, ClientError> {
        let request = self
            .http
            .put(self.url(&format!("/api/inventory/{id}")))
            .json(&json!({ "product": product }));
        let body: ProductResponse = self.json(request).await?;
        Ok(body.product)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> Result<String, ClientError> {
        let request = self.http.delete(self.url(&format!("/api/inventory/{id}")));
        let body: MessageResponse = self.json(request).await?;
        Ok(body.message)
    }

    pub async fn export_products_csv(&self) -> Result<String, ClientError> {
        self.text(self.http.get(self.url("/api/inventory/export")))
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_clients(&self) -> Result<Vec<Client>, ClientError> {
        let body: ClientListResponse = self.json(self.http.get(self.url("/api/clients"))).await?;
        Ok(body.clients)
    }

    #[instrument(skip_all, fields(count = clients.len()))]
    pub async fn replace_clients(&self, clients: &[Client]) -> Result<String, ClientError> {
        let request = self
            .http
            .post(self.url("/api/clients/update"))
            .json(&json!({ "clients": clients }));
        let body: MessageResponse = self.json(request).await?;
        Ok(body.message)
    }

    #[instrument(skip_all, fields(code = %client.code))]
    pub async fn add_client(&self, client: &Client) -> Result<Client, ClientError> {
        let request = self
            .http
            .post(self.url("/api/clients/add"))
            .json(&json!({ "client": client }));
        let body: ClientResponse = self.json(request).await?;
        Ok(body.client)
    }

    #[instrument(skip(self, client))]
    pub async fn update_client(&self, code: &str, client: &Client) -> Result<Client, ClientError> {
        let request = self
            .http
            .put(self.url(&format!("/api/clients/{code}")))
            .json(&json!({ "client": client }));
        let body: ClientResponse = self.json(request).await?;
        Ok(body.client)
    }

    #[instrument(skip(self))]
    pub async fn delete_client(&self, code: &str) -> Result<String, ClientError> {
        let request = self.http.delete(self.url(&format!("/api/clients/{code}")));
        let body: MessageResponse = self.json(request).await?;
        Ok(body.message)
    }

    pub async fn export_clients_csv(&self) -> Result<String, ClientError> {
        self.text(self.http.get(self.url("/api/clients/export")))
            .await
    }

    #[instrument(skip(self, content), fields(size = content.len()))]
    pub async fn save_bol(&self, content: &str, filename: &str) -> Result<String, ClientError> {
        let request = self
            .http
            .post(self.url("/api/save-bol"))
            .json(&json!({ "content": content, "filename": filename }));
        let body: MessageResponse = self.json(request).await?;
        Ok(body.message)
    }

    pub async fn list_bol_files(&self) -> Result<Vec<DocumentSummary>, ClientError> {
        let body: BolFilesResponse = self.json(self.http.get(self.url("/api/bol-files"))).await?;
        Ok(body.files)
    }

    pub async fn view_bol(&self, filename: &str) -> Result<String, ClientError> {
        self.text(self.http.get(self.url(&format!("/api/view-bol/{filename}"))))
            .await
    }
}
