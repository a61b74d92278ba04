pub mod clients;
pub mod common;
pub mod documents;
pub mod inventory;

use crate::services::{
    clients::ClientService, documents::DocumentService, inventory::InventoryService,
};
use crate::store::CatalogStore;
use std::sync::Arc;

/// Service container shared by the HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub inventory: Arc<InventoryService>,
    pub clients: Arc<ClientService>,
    pub documents: Arc<DocumentService>,
}

impl AppServices {
    pub fn new(store: Arc<dyn CatalogStore>, bol_history_limit: usize) -> Self {
        Self {
            inventory: Arc::new(InventoryService::new(store.clone())),
            clients: Arc::new(ClientService::new(store.clone())),
            documents: Arc::new(DocumentService::new(store, bol_history_limit)),
        }
    }
}
