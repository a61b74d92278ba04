//! Persistence backends for products, clients and generated documents.
//!
//! Both backends give read-after-write consistency within one instance and
//! resolve concurrent bulk replacements last-write-wins.

mod memory;
mod sql;

pub use memory::InMemoryStore;
pub use sql::SqlStore;

use crate::config::StorageBackend;
use crate::errors::ServiceError;
use crate::models::{Client, DocumentSummary, Product, StoredDocument};
use async_trait::async_trait;
use tracing::info;

pub const PRODUCT_NOT_FOUND: &str = "Product not found";
pub const PRODUCT_CODE_EXISTS: &str = "Product code already exists";
pub const NEW_PRODUCT_CODE_EXISTS: &str = "New product code already exists";
pub const CLIENT_NOT_FOUND: &str = "Client not found";
pub const CLIENT_CODE_EXISTS: &str = "Client code already exists";
pub const NEW_CLIENT_CODE_EXISTS: &str = "New client code already exists";
pub const PRODUCT_IDS_EXHAUSTED: &str = "No product IDs left to assign";

/// Product ids live in a 32-bit column; both backends accept `1..=MAX_PRODUCT_ID`.
pub const MAX_PRODUCT_ID: i64 = i32::MAX as i64;

/// Id after the largest one in `products`, or `None` once the range is used up.
pub fn next_product_id(products: &[Product]) -> Option<i64> {
    products
        .iter()
        .filter_map(|p| p.id)
        .max()
        .unwrap_or(0)
        .max(0)
        .checked_add(1)
        .filter(|id| *id <= MAX_PRODUCT_ID)
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    fn backend(&self) -> StorageBackend;

    /// Cheap liveness probe of the underlying storage.
    async fn ping(&self) -> Result<(), ServiceError>;

    async fn list_products(&self) -> Result<Vec<Product>, ServiceError>;

    /// Replaces the whole product table. Every product must carry an id.
    async fn replace_products(&self, products: Vec<Product>) -> Result<(), ServiceError>;

    /// Stores a new product, assigning its id.
    async fn insert_product(&self, product: Product) -> Result<Product, ServiceError>;

    async fn update_product(&self, id: i64, product: Product) -> Result<Product, ServiceError>;

    async fn delete_product(&self, id: i64) -> Result<(), ServiceError>;

    async fn list_clients(&self) -> Result<Vec<Client>, ServiceError>;

    async fn replace_clients(&self, clients: Vec<Client>) -> Result<(), ServiceError>;

    async fn insert_client(&self, client: Client) -> Result<Client, ServiceError>;

    async fn update_client(&self, code: &str, client: Client) -> Result<Client, ServiceError>;

    async fn delete_client(&self, code: &str) -> Result<(), ServiceError>;

    async fn save_document(&self, document: StoredDocument) -> Result<(), ServiceError>;

    /// Most recent first, at most `limit` entries.
    async fn list_documents(&self, limit: usize) -> Result<Vec<DocumentSummary>, ServiceError>;

    /// Most recent document saved under `filename`.
    async fn find_document(&self, filename: &str) -> Result<Option<StoredDocument>, ServiceError>;
}

/// Fills empty product and client tables with the demonstration catalog.
pub async fn seed_if_empty(store: &dyn CatalogStore) -> Result<(), ServiceError> {
    if store.list_products().await?.is_empty() {
        let products = crate::seed::sample_products();
        info!(count = products.len(), "Seeding demonstration products");
        store.replace_products(products).await?;
    }

    if store.list_clients().await?.is_empty() {
        let clients = crate::seed::sample_clients();
        info!(count = clients.len(), "Seeding demonstration clients");
        store.replace_clients(clients).await?;
    }

    Ok(())
}
