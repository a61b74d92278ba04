use super::{
    CatalogStore, CLIENT_CODE_EXISTS, CLIENT_NOT_FOUND, NEW_CLIENT_CODE_EXISTS,
    NEW_PRODUCT_CODE_EXISTS, PRODUCT_CODE_EXISTS, PRODUCT_NOT_FOUND,
};
use crate::config::StorageBackend;
use crate::entities::{bill_of_lading, client, product};
use crate::errors::ServiceError;
use crate::models::{Client, DocumentSummary, Product, StoredDocument};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Statement, TransactionTrait,
};
use std::sync::Arc;
use tracing::{debug, instrument};

const RESET_PRODUCT_SEQUENCE: &str = "SELECT setval(pg_get_serial_sequence('products', 'id'), \
     COALESCE((SELECT MAX(id) FROM products), 0) + 1, false)";

/// Relational store over products, clients and bills_of_lading tables.
#[derive(Clone)]
pub struct SqlStore {
    db: Arc<DatabaseConnection>,
}

impl SqlStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn to_db_id(id: i64) -> Option<i32> {
    i32::try_from(id).ok()
}

fn product_from_model(model: product::Model) -> Product {
    Product {
        id: Some(i64::from(model.id)),
        name: model.product_name,
        code: model.product_code,
        unit_of_measure: model.unit_of_measure.unwrap_or_default(),
        description: model.product_description.unwrap_or_default(),
        grade: model.grade.unwrap_or_default(),
        nmfc_number: model.nmfc_number.unwrap_or_default(),
        freight_class: model.freight_class.unwrap_or_default(),
        packing_group: model.packing_group.unwrap_or_default(),
        net_weight: model.net_weight.unwrap_or_default(),
        gross_weight: model.gross_weight.unwrap_or_default(),
        stackable: model.stackable.unwrap_or_default(),
        hazardous: model.hazardous,
        hazmat_class: model.hazmat_class.unwrap_or_default(),
        non_hazmat_class: model.non_hazmat_class.unwrap_or_default(),
        account: model.account.unwrap_or_default(),
        price: model.price.unwrap_or_default(),
        active_status: model.active_status.unwrap_or_default(),
    }
}

fn product_active_model(product: Product, now: DateTime<Utc>) -> product::ActiveModel {
    product::ActiveModel {
        id: NotSet,
        product_name: Set(product.name),
        product_code: Set(product.code),
        unit_of_measure: Set(Some(product.unit_of_measure)),
        product_description: Set(Some(product.description)),
        grade: Set(Some(product.grade)),
        nmfc_number: Set(Some(product.nmfc_number)),
        freight_class: Set(Some(product.freight_class)),
        packing_group: Set(Some(product.packing_group)),
        net_weight: Set(Some(product.net_weight)),
        gross_weight: Set(Some(product.gross_weight)),
        stackable: Set(Some(product.stackable)),
        hazardous: Set(product.hazardous),
        hazmat_class: Set(Some(product.hazmat_class)),
        non_hazmat_class: Set(Some(product.non_hazmat_class)),
        account: Set(Some(product.account)),
        price: Set(Some(product.price)),
        active_status: Set(Some(product.active_status)),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

fn client_from_model(model: client::Model) -> Client {
    Client {
        name: model.client_name,
        code: model.client_code,
        address: model.address.unwrap_or_default(),
        city: model.city.unwrap_or_default(),
        state: model.state.unwrap_or_default(),
        zip: model.zip.unwrap_or_default(),
        phone: model.phone.unwrap_or_default(),
        email: model.email.unwrap_or_default(),
        contact_person: model.contact_person.unwrap_or_default(),
        status: model.status.unwrap_or_default(),
    }
}

fn client_active_model(client: Client, now: DateTime<Utc>) -> client::ActiveModel {
    client::ActiveModel {
        id: NotSet,
        client_name: Set(client.name),
        client_code: Set(client.code),
        address: Set(Some(client.address)),
        city: Set(Some(client.city)),
        state: Set(Some(client.state)),
        zip: Set(Some(client.zip)),
        phone: Set(Some(client.phone)),
        email: Set(Some(client.email)),
        contact_person: Set(Some(client.contact_person)),
        status: Set(Some(client.status)),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

#[async_trait]
impl CatalogStore for SqlStore {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Database
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        self.db.ping().await.map_err(ServiceError::from)
    }

    async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        let rows = product::Entity::find()
            .order_by_asc(product::Column::ProductName)
            .all(self.db.as_ref())
            .await?;
        Ok(rows.into_iter().map(product_from_model).collect())
    }

    #[instrument(skip(self, products), fields(count = products.len()))]
    async fn replace_products(&self, products: Vec<Product>) -> Result<(), ServiceError> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        product::Entity::delete_many().exec(&txn).await?;

        for product in products {
            let id = product.id.and_then(to_db_id).ok_or_else(|| {
                ServiceError::ValidationError(format!("Invalid product ID for {}", product.code))
            })?;
            let mut model = product_active_model(product, now);
            model.id = Set(id);
            product::Entity::insert(model)
                .exec(&txn)
                .await
                .map_err(|e| ServiceError::from_db(e, PRODUCT_CODE_EXISTS))?;
        }

        if txn.get_database_backend() == DbBackend::Postgres {
            debug!("Advancing products id sequence");
            txn.execute(Statement::from_string(
                DbBackend::Postgres,
                RESET_PRODUCT_SEQUENCE.to_string(),
            ))
            .await?;
        }

        txn.commit().await?;
        Ok(())
    }

    async fn insert_product(&self, product: Product) -> Result<Product, ServiceError> {
        let existing = product::Entity::find()
            .filter(product::Column::ProductCode.eq(product.code.as_str()))
            .one(self.db.as_ref())
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(PRODUCT_CODE_EXISTS.to_string()));
        }

        let model = product_active_model(product, Utc::now())
            .insert(self.db.as_ref())
            .await
            .map_err(|e| ServiceError::from_db(e, PRODUCT_CODE_EXISTS))?;
        Ok(product_from_model(model))
    }

    async fn update_product(&self, id: i64, product: Product) -> Result<Product, ServiceError> {
        let not_found = || ServiceError::NotFound(PRODUCT_NOT_FOUND.to_string());
        let db_id = to_db_id(id).ok_or_else(not_found)?;

        product::Entity::find_by_id(db_id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(not_found)?;

        let clash = product::Entity::find()
            .filter(product::Column::ProductCode.eq(product.code.as_str()))
            .filter(product::Column::Id.ne(db_id))
            .one(self.db.as_ref())
            .await?;
        if clash.is_some() {
            return Err(ServiceError::Conflict(NEW_PRODUCT_CODE_EXISTS.to_string()));
        }

        let mut model = product_active_model(product, Utc::now());
        model.id = Unchanged(db_id);
        model.created_at = NotSet;
        let updated = model
            .update(self.db.as_ref())
            .await
            .map_err(|e| ServiceError::from_db(e, NEW_PRODUCT_CODE_EXISTS))?;
        Ok(product_from_model(updated))
    }

    async fn delete_product(&self, id: i64) -> Result<(), ServiceError> {
        let not_found = || ServiceError::NotFound(PRODUCT_NOT_FOUND.to_string());
        let db_id = to_db_id(id).ok_or_else(not_found)?;
        let result = product::Entity::delete_by_id(db_id)
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(not_found());
        }
        Ok(())
    }

    async fn list_clients(&self) -> Result<Vec<Client>, ServiceError> {
        let rows = client::Entity::find()
            .order_by_asc(client::Column::ClientName)
            .all(self.db.as_ref())
            .await?;
        Ok(rows.into_iter().map(client_from_model).collect())
    }

    #[instrument(skip(self, clients), fields(count = clients.len()))]
    async fn replace_clients(&self, clients: Vec<Client>) -> Result<(), ServiceError> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        client::Entity::delete_many().exec(&txn).await?;
        for record in clients {
            client::Entity::insert(client_active_model(record, now))
                .exec(&txn)
                .await
                .map_err(|e| ServiceError::from_db(e, CLIENT_CODE_EXISTS))?;
        }

        txn.commit().await?;
        Ok(())
    }

    async fn insert_client(&self, record: Client) -> Result<Client, ServiceError> {
        let existing = client::Entity::find()
            .filter(client::Column::ClientCode.eq(record.code.as_str()))
            .one(self.db.as_ref())
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(CLIENT_CODE_EXISTS.to_string()));
        }

        let model = client_active_model(record, Utc::now())
            .insert(self.db.as_ref())
            .await
            .map_err(|e| ServiceError::from_db(e, CLIENT_CODE_EXISTS))?;
        Ok(client_from_model(model))
    }

    async fn update_client(&self, code: &str, record: Client) -> Result<Client, ServiceError> {
        let existing = client::Entity::find()
            .filter(client::Column::ClientCode.eq(code))
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(CLIENT_NOT_FOUND.to_string()))?;

        if record.code != code {
            let clash = client::Entity::find()
                .filter(client::Column::ClientCode.eq(record.code.as_str()))
                .one(self.db.as_ref())
                .await?;
            if clash.is_some() {
                return Err(ServiceError::Conflict(NEW_CLIENT_CODE_EXISTS.to_string()));
            }
        }

        let mut model = client_active_model(record, Utc::now());
        model.id = Unchanged(existing.id);
        model.created_at = NotSet;
        let updated = model
            .update(self.db.as_ref())
            .await
            .map_err(|e| ServiceError::from_db(e, NEW_CLIENT_CODE_EXISTS))?;
        Ok(client_from_model(updated))
    }

    async fn delete_client(&self, code: &str) -> Result<(), ServiceError> {
        let result = client::Entity::delete_many()
            .filter(client::Column::ClientCode.eq(code))
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(CLIENT_NOT_FOUND.to_string()));
        }
        Ok(())
    }

    async fn save_document(&self, document: StoredDocument) -> Result<(), ServiceError> {
        bill_of_lading::ActiveModel {
            id: NotSet,
            filename: Set(document.filename),
            content: Set(document.content),
            created_at: Set(document.created_at),
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(())
    }

    async fn list_documents(&self, limit: usize) -> Result<Vec<DocumentSummary>, ServiceError> {
        let rows = bill_of_lading::Entity::find()
            .order_by_desc(bill_of_lading::Column::CreatedAt)
            .order_by_desc(bill_of_lading::Column::Id)
            .limit(limit as u64)
            .all(self.db.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| DocumentSummary {
                size: row.content.len(),
                name: row.filename,
                created: row.created_at,
            })
            .collect())
    }

    async fn find_document(&self, filename: &str) -> Result<Option<StoredDocument>, ServiceError> {
        let row = bill_of_lading::Entity::find()
            .filter(bill_of_lading::Column::Filename.eq(filename))
            .order_by_desc(bill_of_lading::Column::CreatedAt)
            .order_by_desc(bill_of_lading::Column::Id)
            .one(self.db.as_ref())
            .await?;

        Ok(row.map(|row| StoredDocument {
            filename: row.filename,
            content: row.content,
            created_at: row.created_at,
        }))
    }
}
