use std::fmt;

use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::manifest::{build_manifest, resolve_product, Manifest};
use super::render::render_document;
use super::shipment::ShipmentDetails;
use crate::models::Product;

pub const DEFAULT_PALLET_DIMENSIONS: &str = "42x42x32";
pub const DEFAULT_PACKAGING: &str = "Case";
/// Largest pallet count or package quantity a single line accepts.
pub const MAX_LINE_QUANTITY: u32 = 1_000_000;

/// Advisory outcome of a composer operation. The composer state is left
/// untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposerWarning {
    #[error("Please add a pallet first before adding items")]
    NoPallet,

    #[error("Please add at least one item to the Bill of Lading")]
    EmptyDocument,

    #[error("No line item with id {0}")]
    UnknownItem(ItemId),

    #[error("Field '{field}' does not apply to a {kind} line")]
    FieldNotApplicable { field: ItemField, kind: &'static str },

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Invalid product reference")]
    InvalidProductReference,

    #[error("PO number must not be blank")]
    EmptyPoNumber,

    #[error("No PO number at position {0}")]
    UnknownPoNumber(usize),
}

/// Editable line item attributes, named as the browser form names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum ItemField {
    #[strum(serialize = "dimensions")]
    Dimensions,
    #[strum(serialize = "quantity")]
    Quantity,
    #[strum(serialize = "productId")]
    ProductId,
    #[strum(serialize = "packaging")]
    Packaging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalletItem {
    pub dimensions: String,
    pub quantity: u32,
}

impl Default for PalletItem {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_PALLET_DIMENSIONS.to_string(),
            quantity: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductItem {
    pub product_id: Option<i64>,
    pub quantity: u32,
    pub packaging: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LineKind {
    Pallet(PalletItem),
    Product(ProductItem),
}

impl LineKind {
    fn label(&self) -> &'static str {
        match self {
            LineKind::Pallet(_) => "pallet",
            LineKind::Product(_) => "product",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ItemId,
    #[serde(flatten)]
    pub kind: LineKind,
}

impl LineItem {
    pub fn is_pallet(&self) -> bool {
        matches!(self.kind, LineKind::Pallet(_))
    }
}

/// A rendered Bill of Lading ready to be saved.
#[derive(Debug, Clone)]
pub struct ComposedDocument {
    pub filename: String,
    pub html: String,
    pub manifest: Manifest,
}

/// Ordered pallet/product line items plus PO numbers for one shipment.
#[derive(Debug, Clone, Default)]
pub struct BolComposer {
    items: Vec<LineItem>,
    po_numbers: Vec<String>,
    next_id: u64,
}

impl BolComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn po_numbers(&self) -> &[String] {
        &self.po_numbers
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn allocate_id(&mut self) -> ItemId {
        self.next_id += 1;
        ItemId(self.next_id)
    }

    pub fn add_pallet(&mut self) -> ItemId {
        let id = self.allocate_id();
        self.items.push(LineItem {
            id,
            kind: LineKind::Pallet(PalletItem::default()),
        });
        debug!(item_id = %id, "pallet added");
        id
    }

    /// Appends an empty product line. A pallet must exist somewhere first.
    pub fn add_product_item(&mut self) -> Result<ItemId, ComposerWarning> {
        if !self.items.iter().any(LineItem::is_pallet) {
            warn!("product item rejected: no pallet on the document");
            return Err(ComposerWarning::NoPallet);
        }
        let id = self.allocate_id();
        self.items.push(LineItem {
            id,
            kind: LineKind::Product(ProductItem::default()),
        });
        debug!(item_id = %id, "product item added");
        Ok(id)
    }

    /// Sets one attribute of a line item from its textual form.
    ///
    /// Selecting a product that resolves in `products` also fills in the
    /// packaging (the product's unit of measure, else `Case`) when the item
    /// has none yet.
    pub fn set_item_field(
        &mut self,
        id: ItemId,
        field: ItemField,
        value: &str,
        products: &[Product],
    ) -> Result<(), ComposerWarning> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(ComposerWarning::UnknownItem(id))?;
        let kind_label = item.kind.label();

        match (&mut item.kind, field) {
            (LineKind::Pallet(pallet), ItemField::Dimensions) => {
                pallet.dimensions = value.trim().to_string();
            }
            (LineKind::Pallet(pallet), ItemField::Quantity) => {
                let quantity = parse_quantity(value)?;
                if quantity == 0 {
                    return Err(ComposerWarning::InvalidQuantity(value.to_string()));
                }
                pallet.quantity = quantity;
            }
            (LineKind::Product(line), ItemField::Quantity) => {
                line.quantity = parse_quantity(value)?;
            }
            (LineKind::Product(line), ItemField::Packaging) => {
                let trimmed = value.trim();
                line.packaging = (!trimmed.is_empty()).then(|| trimmed.to_string());
            }
            (LineKind::Product(line), ItemField::ProductId) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    line.product_id = None;
                    return Ok(());
                }
                let product_id: i64 = trimmed
                    .parse()
                    .map_err(|_| ComposerWarning::InvalidProductReference)?;
                line.product_id = Some(product_id);
                if let Some(product) = resolve_product(products, product_id) {
                    if line.packaging.is_none() {
                        line.packaging = Some(packaging_for(product));
                    }
                    debug!(item_id = %id, product = %product.name, "product selected");
                }
            }
            (_, field) => {
                return Err(ComposerWarning::FieldNotApplicable {
                    field,
                    kind: kind_label,
                });
            }
        }
        Ok(())
    }

    pub fn remove_item(&mut self, id: ItemId) -> Result<LineItem, ComposerWarning> {
        let position = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(ComposerWarning::UnknownItem(id))?;
        Ok(self.items.remove(position))
    }

    pub fn add_po_number(&mut self, po_number: &str) -> Result<(), ComposerWarning> {
        let trimmed = po_number.trim();
        if trimmed.is_empty() {
            return Err(ComposerWarning::EmptyPoNumber);
        }
        self.po_numbers.push(trimmed.to_string());
        Ok(())
    }

    pub fn remove_po_number(&mut self, index: usize) -> Result<String, ComposerWarning> {
        if index >= self.po_numbers.len() {
            return Err(ComposerWarning::UnknownPoNumber(index));
        }
        Ok(self.po_numbers.remove(index))
    }

    /// Gross weight of every resolvable product line. Pallets weigh nothing.
    pub fn total_weight(&self, products: &[Product]) -> Decimal {
        total_weight(&self.items, products)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.po_numbers.clear();
    }

    /// Walks the line items into a manifest and renders the document.
    pub fn compose(
        &self,
        products: &[Product],
        shipment: &ShipmentDetails,
    ) -> Result<ComposedDocument, ComposerWarning> {
        if self.items.is_empty() {
            warn!("compose rejected: no line items");
            return Err(ComposerWarning::EmptyDocument);
        }

        let manifest = build_manifest(&self.items, products);
        let resolved = shipment.resolve(Utc::now().date_naive());
        let html = render_document(&resolved, &manifest, &self.po_numbers);
        let filename = generated_filename();

        info!(
            filename = %filename,
            rows = manifest.rows.len(),
            handling_units = manifest.total_handling_units,
            packages = manifest.total_packages,
            "bill of lading composed"
        );

        Ok(ComposedDocument {
            filename,
            html,
            manifest,
        })
    }
}

pub(crate) fn total_weight(items: &[LineItem], products: &[Product]) -> Decimal {
    items
        .iter()
        .filter_map(|item| match &item.kind {
            LineKind::Product(line) => Some(line),
            LineKind::Pallet(_) => None,
        })
        .filter(|line| line.quantity > 0)
        .filter_map(|line| {
            let product = resolve_product(products, line.product_id?)?;
            Some(product.gross_weight.saturating_mul(Decimal::from(line.quantity)))
        })
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

pub(crate) fn packaging_for(product: &Product) -> String {
    if product.unit_of_measure.trim().is_empty() {
        DEFAULT_PACKAGING.to_string()
    } else {
        product.unit_of_measure.clone()
    }
}

fn parse_quantity(value: &str) -> Result<u32, ComposerWarning> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<u32>()
        .ok()
        .filter(|quantity| *quantity <= MAX_LINE_QUANTITY)
        .ok_or_else(|| ComposerWarning::InvalidQuantity(value.to_string()))
}

/// `BOL_<YYYYMMDD>_<n>.html` with `n` in `0..1000`.
pub fn generated_filename() -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1000);
    format!("BOL_{}_{}.html", Utc::now().format("%Y%m%d"), suffix)
}
