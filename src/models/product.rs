use super::wire::{is_truthy_flag, lenient_text, not_blank, parse_decimal_lenient, text};
use super::ACTIVE_STATUS;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Marker written to the hazmat column for hazardous products.
pub const HAZMAT_MARK: &str = "x";
pub const INVENTORY_HAZMAT: &str = "HAZMAT";
pub const INVENTORY_NON_HAZMAT: &str = "NON-HAZMAT";

/// Wire keys in export column order.
pub const PRODUCT_COLUMNS: [&str; 19] = [
    "ID",
    "Product Name",
    "Product Code",
    "U/M",
    "Product Description",
    "Grade",
    "NMFC #",
    "Freight Class",
    "Packing Group",
    "Net Weight (Per Package)",
    "Gross Weight (Per Package)",
    "Stackable?",
    "Hazardous Material? (x if Yes)",
    "Hazmat Class",
    "Non Hazmat Class",
    "Account",
    "Price",
    "Active Status",
    "Inventory Type",
];

/// A stocked chemical product.
///
/// `hazardous` is the single source of truth for hazmat classification; the
/// wire's hazmat mark and inventory type columns are both derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(from = "ProductRecord", into = "ProductRecord")]
pub struct Product {
    pub id: Option<i64>,
    #[validate(custom = "not_blank")]
    pub name: String,
    #[validate(custom = "not_blank")]
    pub code: String,
    pub unit_of_measure: String,
    pub description: String,
    pub grade: String,
    pub nmfc_number: String,
    pub freight_class: String,
    pub packing_group: String,
    pub net_weight: Decimal,
    pub gross_weight: Decimal,
    pub stackable: String,
    pub hazardous: bool,
    pub hazmat_class: String,
    pub non_hazmat_class: String,
    pub account: String,
    pub price: Decimal,
    pub active_status: String,
}

impl Product {
    pub fn is_active(&self) -> bool {
        self.active_status == ACTIVE_STATUS
    }

    pub fn inventory_type(&self) -> &'static str {
        if self.hazardous {
            INVENTORY_HAZMAT
        } else {
            INVENTORY_NON_HAZMAT
        }
    }

    pub fn hazmat_mark(&self) -> &'static str {
        if self.hazardous {
            HAZMAT_MARK
        } else {
            ""
        }
    }
}

/// Wire form of [`Product`], keyed by the spreadsheet column names.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ProductRecord {
    #[serde(
        rename = "ID",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(rename = "Product Name", default, deserialize_with = "lenient_text")]
    pub product_name: Option<String>,
    #[serde(rename = "Product Code", default, deserialize_with = "lenient_text")]
    pub product_code: Option<String>,
    #[serde(rename = "U/M", default, deserialize_with = "lenient_text")]
    pub unit_of_measure: Option<String>,
    #[serde(rename = "Product Description", default, deserialize_with = "lenient_text")]
    pub product_description: Option<String>,
    #[serde(rename = "Grade", default, deserialize_with = "lenient_text")]
    pub grade: Option<String>,
    #[serde(rename = "NMFC #", default, deserialize_with = "lenient_text")]
    pub nmfc_number: Option<String>,
    #[serde(rename = "Freight Class", default, deserialize_with = "lenient_text")]
    pub freight_class: Option<String>,
    #[serde(rename = "Packing Group", default, deserialize_with = "lenient_text")]
    pub packing_group: Option<String>,
    #[serde(
        rename = "Net Weight (Per Package)",
        default,
        deserialize_with = "lenient_text"
    )]
    pub net_weight: Option<String>,
    #[serde(
        rename = "Gross Weight (Per Package)",
        default,
        deserialize_with = "lenient_text"
    )]
    pub gross_weight: Option<String>,
    #[serde(rename = "Stackable?", default, deserialize_with = "lenient_text")]
    pub stackable: Option<String>,
    #[serde(
        rename = "Hazardous Material? (x if Yes)",
        default,
        deserialize_with = "lenient_text"
    )]
    pub hazardous_material: Option<String>,
    #[serde(rename = "Hazmat Class", default, deserialize_with = "lenient_text")]
    pub hazmat_class: Option<String>,
    #[serde(rename = "Non Hazmat Class", default, deserialize_with = "lenient_text")]
    pub non_hazmat_class: Option<String>,
    #[serde(rename = "Account", default, deserialize_with = "lenient_text")]
    pub account: Option<String>,
    #[serde(rename = "Price", default, deserialize_with = "lenient_text")]
    pub price: Option<String>,
    #[serde(rename = "Active Status", default, deserialize_with = "lenient_text")]
    pub active_status: Option<String>,
    #[serde(rename = "Inventory Type", default, deserialize_with = "lenient_text")]
    pub inventory_type: Option<String>,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        let hazardous = is_truthy_flag(record.hazardous_material.as_deref())
            || record
                .inventory_type
                .as_deref()
                .map(|kind| kind.trim().eq_ignore_ascii_case(INVENTORY_HAZMAT))
                .unwrap_or(false);

        Self {
            id: record.id.and_then(|raw| raw.trim().parse().ok()),
            net_weight: parse_decimal_lenient(record.net_weight.as_deref()),
            gross_weight: parse_decimal_lenient(record.gross_weight.as_deref()),
            price: parse_decimal_lenient(record.price.as_deref()),
            name: text(record.product_name),
            code: text(record.product_code),
            unit_of_measure: text(record.unit_of_measure),
            description: text(record.product_description),
            grade: text(record.grade),
            nmfc_number: text(record.nmfc_number),
            freight_class: text(record.freight_class),
            packing_group: text(record.packing_group),
            stackable: text(record.stackable),
            hazardous,
            hazmat_class: text(record.hazmat_class),
            non_hazmat_class: text(record.non_hazmat_class),
            account: text(record.account),
            active_status: text(record.active_status),
        }
    }
}

impl From<Product> for ProductRecord {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.map(|id| id.to_string()),
            hazardous_material: Some(product.hazmat_mark().to_string()),
            inventory_type: Some(product.inventory_type().to_string()),
            net_weight: Some(product.net_weight.to_string()),
            gross_weight: Some(product.gross_weight.to_string()),
            price: Some(product.price.to_string()),
            product_name: Some(product.name),
            product_code: Some(product.code),
            unit_of_measure: Some(product.unit_of_measure),
            product_description: Some(product.description),
            grade: Some(product.grade),
            nmfc_number: Some(product.nmfc_number),
            freight_class: Some(product.freight_class),
            packing_group: Some(product.packing_group),
            stackable: Some(product.stackable),
            hazmat_class: Some(product.hazmat_class),
            non_hazmat_class: Some(product.non_hazmat_class),
            account: Some(product.account),
            active_status: Some(product.active_status),
        }
    }
}
