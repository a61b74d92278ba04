use crate::errors::ServiceError;
use crate::models::client::CLIENT_COLUMNS;
use crate::models::Client;
use crate::services::export::to_csv;
use crate::store::CatalogStore;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

pub const INVALID_CLIENT: &str = "Invalid client data";
pub const INVALID_CLIENTS_FORMAT: &str = "Invalid clients data format";

/// Client roster operations over a [`CatalogStore`].
#[derive(Clone)]
pub struct ClientService {
    store: Arc<dyn CatalogStore>,
}

impl ClientService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Client>, ServiceError> {
        self.store.list_clients().await
    }

    #[instrument(skip(self, clients), fields(count = clients.len()))]
    pub async fn replace_all(&self, clients: Vec<Client>) -> Result<usize, ServiceError> {
        let mut codes = HashSet::new();
        if let Some(repeated) = clients.iter().find(|c| !codes.insert(c.code.as_str())) {
            warn!(code = %repeated.code, "Bulk client update repeats a code");
            return Err(ServiceError::Conflict(format!(
                "Duplicate client code in payload: {}",
                repeated.code
            )));
        }

        let count = clients.len();
        self.store.replace_clients(clients).await?;
        info!(count, "Clients replaced");
        Ok(count)
    }

    #[instrument(skip(self, client), fields(code = %client.code))]
    pub async fn add(&self, client: Client) -> Result<Client, ServiceError> {
        client
            .validate()
            .map_err(|_| ServiceError::ValidationError(INVALID_CLIENT.to_string()))?;
        let stored = self.store.insert_client(client).await?;
        info!("Client added");
        Ok(stored)
    }

    #[instrument(skip(self, client), fields(new_code = %client.code))]
    pub async fn update(&self, code: &str, client: Client) -> Result<Client, ServiceError> {
        client
            .validate()
            .map_err(|_| ServiceError::ValidationError(INVALID_CLIENT.to_string()))?;
        let stored = self.store.update_client(code, client).await?;
        info!("Client updated");
        Ok(stored)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, code: &str) -> Result<(), ServiceError> {
        self.store.delete_client(code).await?;
        info!("Client deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn export_csv(&self) -> Result<String, ServiceError> {
        let clients = self.store.list_clients().await?;
        to_csv(&CLIENT_COLUMNS, &clients)
    }
}
