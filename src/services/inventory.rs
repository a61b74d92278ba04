use crate::errors::ServiceError;
use crate::models::product::PRODUCT_COLUMNS;
use crate::models::Product;
use crate::services::export::to_csv;
use crate::store::{next_product_id, CatalogStore, MAX_PRODUCT_ID, PRODUCT_IDS_EXHAUSTED};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

pub const INVALID_PRODUCT: &str = "Invalid product data";
pub const INVALID_PRODUCTS_FORMAT: &str = "Invalid products data format";

/// Product catalog operations over a [`CatalogStore`].
#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn CatalogStore>,
}

impl InventoryService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        self.store.list_products().await
    }

    /// Replaces the catalog with `products`. Products without an id get one
    /// above the largest id in the payload.
    #[instrument(skip(self, products), fields(count = products.len()))]
    pub async fn replace_all(&self, mut products: Vec<Product>) -> Result<usize, ServiceError> {
        let mut codes = HashSet::new();
        let mut ids = HashSet::new();
        for product in &products {
            if !codes.insert(product.code.as_str()) {
                warn!(code = %product.code, "Bulk product update repeats a code");
                return Err(ServiceError::Conflict(format!(
                    "Duplicate product code in payload: {}",
                    product.code
                )));
            }
            if let Some(id) = product.id {
                if !(1..=MAX_PRODUCT_ID).contains(&id) {
                    warn!(id, code = %product.code, "Bulk product update carries an out-of-range ID");
                    return Err(ServiceError::ValidationError(format!(
                        "Invalid product ID: {id}"
                    )));
                }
                if !ids.insert(id) {
                    return Err(ServiceError::ValidationError(format!(
                        "Duplicate product ID in payload: {id}"
                    )));
                }
            }
        }

        assign_missing_ids(&mut products)?;
        let count = products.len();
        self.store.replace_products(products).await?;
        info!(count, "Inventory replaced");
        Ok(count)
    }

    #[instrument(skip(self, product), fields(code = %product.code))]
    pub async fn add(&self, mut product: Product) -> Result<Product, ServiceError> {
        product
            .validate()
            .map_err(|_| ServiceError::ValidationError(INVALID_PRODUCT.to_string()))?;
        product.id = None;

        let stored = self.store.insert_product(product).await?;
        info!(id = ?stored.id, "Product added");
        Ok(stored)
    }

    #[instrument(skip(self, product), fields(code = %product.code))]
    pub async fn update(&self, id: i64, product: Product) -> Result<Product, ServiceError> {
        product
            .validate()
            .map_err(|_| ServiceError::ValidationError(INVALID_PRODUCT.to_string()))?;

        let stored = self.store.update_product(id, product).await?;
        info!(id, "Product updated");
        Ok(stored)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.store.delete_product(id).await?;
        info!(id, "Product deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn export_csv(&self) -> Result<String, ServiceError> {
        let products = self.store.list_products().await?;
        to_csv(&PRODUCT_COLUMNS, &products)
    }
}

fn assign_missing_ids(products: &mut [Product]) -> Result<(), ServiceError> {
    let mut next = next_product_id(products);
    for product in products.iter_mut().filter(|p| p.id.is_none()) {
        let id = next
            .ok_or_else(|| ServiceError::ValidationError(PRODUCT_IDS_EXHAUSTED.to_string()))?;
        product.id = Some(id);
        next = id.checked_add(1).filter(|n| *n <= MAX_PRODUCT_ID);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_products;
    use crate::store::InMemoryStore;
    use assert_matches::assert_matches;

    fn service() -> InventoryService {
        InventoryService::new(Arc::new(InMemoryStore::new(20)))
    }

    #[test]
    fn missing_ids_continue_after_largest() {
        let mut products = sample_products();
        products[1].id = None;
        products[3].id = None;
        assign_missing_ids(&mut products).unwrap();
        let ids: Vec<_> = products.iter().map(|p| p.id.unwrap()).collect();
        assert_eq!(ids, vec![1, 6, 3, 7, 5]);
    }

    #[tokio::test]
    async fn replace_rejects_repeated_codes() {
        let service = service();
        let mut products = sample_products();
        products[1].code = products[0].code.clone();
        let err = service.replace_all(products).await.unwrap_err();
        assert_matches!(err, ServiceError::Conflict(_));
    }

    #[tokio::test]
    async fn replace_rejects_repeated_ids() {
        let service = service();
        let mut products = sample_products();
        products[1].id = Some(1);
        let err = service.replace_all(products).await.unwrap_err();
        assert_matches!(err, ServiceError::ValidationError(_));
    }

    #[tokio::test]
    async fn replace_rejects_ids_outside_storable_range() {
        let service = service();
        for id in [0, -3, MAX_PRODUCT_ID + 1, i64::MAX] {
            let mut products = sample_products();
            products[0].id = Some(id);
            let err = service.replace_all(products).await.unwrap_err();
            assert_matches!(err, ServiceError::ValidationError(_));
        }
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_reports_exhausted_ids_instead_of_wrapping() {
        let service = service();
        let mut products = sample_products();
        products[0].id = Some(MAX_PRODUCT_ID);
        products[1].id = None;
        let err = service.replace_all(products).await.unwrap_err();
        assert_matches!(err, ServiceError::ValidationError(msg) if msg == PRODUCT_IDS_EXHAUSTED);
    }

    #[tokio::test]
    async fn add_requires_name_and_code() {
        let service = service();
        let mut product = sample_products().remove(0);
        product.code = String::new();
        let err = service.add(product).await.unwrap_err();
        assert_matches!(err, ServiceError::ValidationError(msg) if msg == INVALID_PRODUCT);
    }

    #[tokio::test]
    async fn add_ignores_caller_supplied_id() {
        let service = service();
        service.replace_all(sample_products()).await.unwrap();

        let mut product = sample_products().remove(0);
        product.id = Some(1);
        product.code = "UN9999".to_string();
        let stored = service.add(product).await.unwrap();
        assert_eq!(stored.id, Some(6));
    }
}
