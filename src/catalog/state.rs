use std::cmp::Ordering;

use serde::Serialize;

use crate::models::{Client, Product};

/// Where the cached catalog came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum DataSource {
    Live,
    Offline { reason: String },
}

impl DataSource {
    pub fn is_offline(&self) -> bool {
        matches!(self, DataSource::Offline { .. })
    }
}

/// Disposable client-side copy of the catalog.
///
/// `active_products` and `active_clients` are always the `Active` subset of
/// the full lists: every method that replaces a full list recomputes them.
#[derive(Debug, Clone)]
pub struct CatalogState {
    all_products: Vec<Product>,
    active_products: Vec<Product>,
    all_clients: Vec<Client>,
    active_clients: Vec<Client>,
    source: DataSource,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            all_products: Vec::new(),
            active_products: Vec::new(),
            all_clients: Vec::new(),
            active_clients: Vec::new(),
            source: DataSource::Live,
        }
    }
}

pub(crate) fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

pub(crate) fn sort_products(products: &mut [Product]) {
    products.sort_by(|a, b| compare_names(&a.name, &b.name));
}

pub(crate) fn sort_clients(clients: &mut [Client]) {
    clients.sort_by(|a, b| compare_names(&a.name, &b.name));
}

impl CatalogState {
    pub fn new(products: Vec<Product>, clients: Vec<Client>, source: DataSource) -> Self {
        let mut state = Self {
            source,
            ..Self::default()
        };
        state.replace_products(products);
        state.replace_clients(clients);
        state
    }

    pub fn all_products(&self) -> &[Product] {
        &self.all_products
    }

    pub fn active_products(&self) -> &[Product] {
        &self.active_products
    }

    pub fn all_clients(&self) -> &[Client] {
        &self.all_clients
    }

    pub fn active_clients(&self) -> &[Client] {
        &self.active_clients
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn is_offline(&self) -> bool {
        self.source.is_offline()
    }

    pub fn replace_products(&mut self, mut products: Vec<Product>) {
        sort_products(&mut products);
        self.active_products = products.iter().filter(|p| p.is_active()).cloned().collect();
        self.all_products = products;
    }

    pub fn replace_clients(&mut self, mut clients: Vec<Client>) {
        sort_clients(&mut clients);
        self.active_clients = clients.iter().filter(|c| c.is_active()).cloned().collect();
        self.all_clients = clients;
    }

    pub fn find_product(&self, id: i64) -> Option<&Product> {
        self.all_products.iter().find(|p| p.id == Some(id))
    }

    pub fn find_product_by_code(&self, code: &str) -> Option<&Product> {
        self.all_products.iter().find(|p| p.code == code)
    }

    pub fn find_client(&self, code: &str) -> Option<&Client> {
        self.all_clients.iter().find(|c| c.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{sample_clients, sample_products};

    #[test]
    fn active_lists_follow_full_lists() {
        let mut products = sample_products();
        products[0].active_status = "Discontinued".to_string();
        let state = CatalogState::new(products, sample_clients(), DataSource::Live);

        assert_eq!(state.all_products().len(), 5);
        assert_eq!(state.active_products().len(), 4);
        assert!(state.active_products().iter().all(Product::is_active));
        assert_eq!(state.all_clients().len(), 5);
        assert_eq!(state.active_clients().len(), 4);
    }

    #[test]
    fn replacing_recomputes_active_subset() {
        let mut state = CatalogState::new(sample_products(), sample_clients(), DataSource::Live);
        let mut clients = state.all_clients().to_vec();
        for client in &mut clients {
            client.status = "Inactive".to_string();
        }
        state.replace_clients(clients);
        assert!(state.active_clients().is_empty());
    }

    #[test]
    fn lists_sort_by_name_ignoring_case() {
        let mut products = sample_products();
        products[1].name = "acetic acid".to_string();
        let state = CatalogState::new(products, Vec::new(), DataSource::Live);

        let names: Vec<_> = state.all_products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            ["acetic acid", "Acetone", "Glycerin", "Hydrogen Peroxide", "Sulfuric Acid"]
        );
    }

    #[test]
    fn offline_source_is_reported() {
        let state = CatalogState::new(
            Vec::new(),
            Vec::new(),
            DataSource::Offline {
                reason: "connection refused".to_string(),
            },
        );
        assert!(state.is_offline());
    }
}
