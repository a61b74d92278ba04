use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product row. Hazmat classification is stored once as `hazardous`; the
/// inventory type string is derived when records are built.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_name: String,
    #[sea_orm(unique)]
    pub product_code: String,
    #[sea_orm(nullable)]
    pub unit_of_measure: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub product_description: Option<String>,
    #[sea_orm(nullable)]
    pub grade: Option<String>,
    #[sea_orm(nullable)]
    pub nmfc_number: Option<String>,
    #[sea_orm(nullable)]
    pub freight_class: Option<String>,
    #[sea_orm(nullable)]
    pub packing_group: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub net_weight: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub gross_weight: Option<Decimal>,
    #[sea_orm(nullable)]
    pub stackable: Option<String>,
    pub hazardous: bool,
    #[sea_orm(nullable)]
    pub hazmat_class: Option<String>,
    #[sea_orm(nullable)]
    pub non_hazmat_class: Option<String>,
    #[sea_orm(nullable)]
    pub account: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub price: Option<Decimal>,
    #[sea_orm(nullable)]
    pub active_status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
