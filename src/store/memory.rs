use super::{
    next_product_id, CatalogStore, CLIENT_CODE_EXISTS, CLIENT_NOT_FOUND, NEW_CLIENT_CODE_EXISTS,
    NEW_PRODUCT_CODE_EXISTS, PRODUCT_CODE_EXISTS, PRODUCT_IDS_EXHAUSTED, PRODUCT_NOT_FOUND,
};
use crate::config::StorageBackend;
use crate::errors::ServiceError;
use crate::models::{Client, DocumentSummary, Product, StoredDocument};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    products: Arc<Vec<Product>>,
    clients: Arc<Vec<Client>>,
    documents: VecDeque<StoredDocument>,
}

/// Process-local store. Lists are swapped wholesale on replacement so readers
/// holding a snapshot never observe a half-applied bulk update.
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    document_limit: usize,
}

impl InMemoryStore {
    /// `document_limit` bounds the retained document history.
    pub fn new(document_limit: usize) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            document_limit: document_limit.max(1),
        }
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Memory
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        Ok(())
    }

    async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        let snapshot = self.tables.read().await.products.clone();
        Ok(snapshot.as_ref().clone())
    }

    async fn replace_products(&self, products: Vec<Product>) -> Result<(), ServiceError> {
        self.tables.write().await.products = Arc::new(products);
        Ok(())
    }

    async fn insert_product(&self, mut product: Product) -> Result<Product, ServiceError> {
        let mut tables = self.tables.write().await;
        if tables.products.iter().any(|p| p.code == product.code) {
            return Err(ServiceError::Conflict(PRODUCT_CODE_EXISTS.to_string()));
        }

        let id = next_product_id(&tables.products)
            .ok_or_else(|| ServiceError::ValidationError(PRODUCT_IDS_EXHAUSTED.to_string()))?;
        product.id = Some(id);
        Arc::make_mut(&mut tables.products).push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: i64, mut product: Product) -> Result<Product, ServiceError> {
        let mut tables = self.tables.write().await;
        let index = tables
            .products
            .iter()
            .position(|p| p.id == Some(id))
            .ok_or_else(|| ServiceError::NotFound(PRODUCT_NOT_FOUND.to_string()))?;

        if tables
            .products
            .iter()
            .any(|p| p.id != Some(id) && p.code == product.code)
        {
            return Err(ServiceError::Conflict(NEW_PRODUCT_CODE_EXISTS.to_string()));
        }

        product.id = Some(id);
        Arc::make_mut(&mut tables.products)[index] = product.clone();
        Ok(product)
    }

    async fn delete_product(&self, id: i64) -> Result<(), ServiceError> {
        let mut tables = self.tables.write().await;
        let index = tables
            .products
            .iter()
            .position(|p| p.id == Some(id))
            .ok_or_else(|| ServiceError::NotFound(PRODUCT_NOT_FOUND.to_string()))?;
        Arc::make_mut(&mut tables.products).remove(index);
        Ok(())
    }

    async fn list_clients(&self) -> Result<Vec<Client>, ServiceError> {
        let snapshot = self.tables.read().await.clients.clone();
        Ok(snapshot.as_ref().clone())
    }

    async fn replace_clients(&self, clients: Vec<Client>) -> Result<(), ServiceError> {
        self.tables.write().await.clients = Arc::new(clients);
        Ok(())
    }

    async fn insert_client(&self, client: Client) -> Result<Client, ServiceError> {
        let mut tables = self.tables.write().await;
        if tables.clients.iter().any(|c| c.code == client.code) {
            return Err(ServiceError::Conflict(CLIENT_CODE_EXISTS.to_string()));
        }
        Arc::make_mut(&mut tables.clients).push(client.clone());
        Ok(client)
    }

    async fn update_client(&self, code: &str, client: Client) -> Result<Client, ServiceError> {
        let mut tables = self.tables.write().await;
        let index = tables
            .clients
            .iter()
            .position(|c| c.code == code)
            .ok_or_else(|| ServiceError::NotFound(CLIENT_NOT_FOUND.to_string()))?;

        if client.code != code && tables.clients.iter().any(|c| c.code == client.code) {
            return Err(ServiceError::Conflict(NEW_CLIENT_CODE_EXISTS.to_string()));
        }

        Arc::make_mut(&mut tables.clients)[index] = client.clone();
        Ok(client)
    }

    async fn delete_client(&self, code: &str) -> Result<(), ServiceError> {
        let mut tables = self.tables.write().await;
        let index = tables
            .clients
            .iter()
            .position(|c| c.code == code)
            .ok_or_else(|| ServiceError::NotFound(CLIENT_NOT_FOUND.to_string()))?;
        Arc::make_mut(&mut tables.clients).remove(index);
        Ok(())
    }

    async fn save_document(&self, document: StoredDocument) -> Result<(), ServiceError> {
        let mut tables = self.tables.write().await;
        tables.documents.push_back(document);
        while tables.documents.len() > self.document_limit {
            tables.documents.pop_front();
        }
        Ok(())
    }

    async fn list_documents(&self, limit: usize) -> Result<Vec<DocumentSummary>, ServiceError> {
        let tables = self.tables.read().await;
        Ok(tables
            .documents
            .iter()
            .rev()
            .take(limit)
            .map(DocumentSummary::from)
            .collect())
    }

    async fn find_document(&self, filename: &str) -> Result<Option<StoredDocument>, ServiceError> {
        let tables = self.tables.read().await;
        Ok(tables
            .documents
            .iter()
            .rev()
            .find(|d| d.filename == filename)
            .cloned())
    }
}
