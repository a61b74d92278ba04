use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use super::api::{ApiClient, ClientError};
use crate::bol::{BolComposer, ComposedDocument, ComposerWarning, ItemField, ItemId, ShipmentDetails};
use crate::catalog::{CatalogState, DataSource};
use crate::models::{Client, Product};
use crate::seed::{sample_clients, sample_products};
use crate::store::{CLIENT_CODE_EXISTS, CLIENT_NOT_FOUND, PRODUCT_CODE_EXISTS, PRODUCT_NOT_FOUND};

/// Returned by every write attempted while the demonstration catalog is loaded.
pub const OFFLINE_READ_ONLY: &str = "Server unavailable; demonstration data is read-only";

/// One operator's working copy of the catalog plus the document being
/// composed.
///
/// Every catalog edit is applied to a copy of the full list, written back
/// with a bulk replace and then reloaded. The cached state only changes
/// once all of that succeeded.
pub struct Session {
    api: ApiClient,
    state: CatalogState,
    composer: BolComposer,
}

impl Session {
    /// Connects and loads the catalog, falling back to the demonstration
    /// data when the server cannot be reached.
    pub async fn open(api: ApiClient) -> Result<Self, ClientError> {
        let mut session = Self {
            api,
            state: CatalogState::default(),
            composer: BolComposer::new(),
        };
        session.load().await?;
        Ok(session)
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn composer(&self) -> &BolComposer {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut BolComposer {
        &mut self.composer
    }

    pub fn is_offline(&self) -> bool {
        self.state.is_offline()
    }

    fn ensure_online(&self) -> Result<(), ClientError> {
        if self.is_offline() {
            return Err(ClientError::Invalid(OFFLINE_READ_ONLY.to_string()));
        }
        Ok(())
    }

    async fn fetch(&self) -> Result<CatalogState, ClientError> {
        let (products, clients) =
            tokio::try_join!(self.api.list_products(), self.api.list_clients())?;
        Ok(CatalogState::new(products, clients, DataSource::Live))
    }

    /// Replaces the cached catalog with the server's. Only transport
    /// failures trigger the offline fallback; error answers propagate.
    #[instrument(skip(self), fields(server = %self.api.base_url()))]
    pub async fn load(&mut self) -> Result<&CatalogState, ClientError> {
        match self.fetch().await {
            Ok(state) => {
                info!(
                    products = state.all_products().len(),
                    active_products = state.active_products().len(),
                    clients = state.all_clients().len(),
                    "catalog loaded"
                );
                self.state = state;
            }
            Err(err) if err.is_network() => {
                warn!(error = %err, "server unreachable; using demonstration data");
                self.state = CatalogState::new(
                    sample_products(),
                    sample_clients(),
                    DataSource::Offline {
                        reason: err.to_string(),
                    },
                );
            }
            Err(err) => return Err(err),
        }
        Ok(&self.state)
    }

    async fn commit_products(&mut self, products: Vec<Product>) -> Result<(), ClientError> {
        self.api.replace_products(&products).await?;
        self.state = self.fetch().await?;
        Ok(())
    }

    async fn commit_clients(&mut self, clients: Vec<Client>) -> Result<(), ClientError> {
        self.api.replace_clients(&clients).await?;
        self.state = self.fetch().await?;
        Ok(())
    }

    /// Adds a product; the server assigns its id.
    pub async fn add_product(&mut self, mut product: Product) -> Result<(), ClientError> {
        self.ensure_online()?;
        if self.state.find_product_by_code(&product.code).is_some() {
            return Err(ClientError::Invalid(PRODUCT_CODE_EXISTS.to_string()));
        }
        product.id = None;
        let mut products = self.state.all_products().to_vec();
        products.push(product);
        self.commit_products(products).await
    }

    /// Replaces the product with `id`, keeping that id.
    pub async fn update_product(&mut self, id: i64, mut product: Product) -> Result<(), ClientError> {
        self.ensure_online()?;
        let mut products = self.state.all_products().to_vec();
        let slot = products
            .iter_mut()
            .find(|p| p.id == Some(id))
            .ok_or_else(|| ClientError::Invalid(PRODUCT_NOT_FOUND.to_string()))?;
        product.id = Some(id);
        *slot = product;
        self.commit_products(products).await
    }

    pub async fn delete_product(&mut self, id: i64) -> Result<Product, ClientError> {
        self.ensure_online()?;
        let mut products = self.state.all_products().to_vec();
        let index = products
            .iter()
            .position(|p| p.id == Some(id))
            .ok_or_else(|| ClientError::Invalid(PRODUCT_NOT_FOUND.to_string()))?;
        let removed = products.remove(index);
        self.commit_products(products).await?;
        Ok(removed)
    }

    pub async fn add_client(&mut self, client: Client) -> Result<(), ClientError> {
        self.ensure_online()?;
        if self.state.find_client(&client.code).is_some() {
            return Err(ClientError::Invalid(CLIENT_CODE_EXISTS.to_string()));
        }
        let mut clients = self.state.all_clients().to_vec();
        clients.push(client);
        self.commit_clients(clients).await
    }

    /// Replaces the client currently stored under `code`.
    pub async fn update_client(&mut self, code: &str, client: Client) -> Result<(), ClientError> {
        self.ensure_online()?;
        let mut clients = self.state.all_clients().to_vec();
        let slot = clients
            .iter_mut()
            .find(|c| c.code == code)
            .ok_or_else(|| ClientError::Invalid(CLIENT_NOT_FOUND.to_string()))?;
        *slot = client;
        self.commit_clients(clients).await
    }

    pub async fn delete_client(&mut self, code: &str) -> Result<Client, ClientError> {
        self.ensure_online()?;
        let mut clients = self.state.all_clients().to_vec();
        let index = clients
            .iter()
            .position(|c| c.code == code)
            .ok_or_else(|| ClientError::Invalid(CLIENT_NOT_FOUND.to_string()))?;
        let removed = clients.remove(index);
        self.commit_clients(clients).await?;
        Ok(removed)
    }

    /// Edits a line item, resolving product references against the active
    /// products.
    pub fn set_item_field(
        &mut self,
        id: ItemId,
        field: ItemField,
        value: &str,
    ) -> Result<(), ComposerWarning> {
        self.composer
            .set_item_field(id, field, value, self.state.active_products())
    }

    pub fn total_weight(&self) -> Decimal {
        self.composer.total_weight(self.state.active_products())
    }

    pub fn compose(&self, shipment: &ShipmentDetails) -> Result<ComposedDocument, ComposerWarning> {
        self.composer.compose(self.state.active_products(), shipment)
    }

    /// Persists a composed document on the server. Refused while offline.
    pub async fn save_document(&self, document: &ComposedDocument) -> Result<String, ClientError> {
        self.ensure_online()?;
        self.api.save_bol(&document.html, &document.filename).await
    }
}
