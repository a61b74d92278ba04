use rust_decimal::Decimal;
use serde::Serialize;

use super::composer::{packaging_for, total_weight, LineItem, LineKind, PalletItem, ProductItem};
use crate::models::Product;

/// Handling unit half of a manifest row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PalletCell {
    pub quantity: u32,
    pub dimensions: String,
}

/// Package half of a manifest row, resolved against the active catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCell {
    pub packaging: String,
    pub quantity: u32,
    pub hazardous: bool,
    pub code: String,
    pub name: String,
    pub hazmat_class: String,
    pub packing_group: String,
    pub net_weight: Decimal,
    pub gross_weight: Decimal,
    pub freight_class: String,
    pub nmfc_number: String,
    pub stackable: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestRow {
    pub pallet: Option<PalletCell>,
    pub product: Option<ProductCell>,
}

impl ManifestRow {
    pub fn is_fused(&self) -> bool {
        self.pallet.is_some() && self.product.is_some()
    }

    pub fn is_hazardous(&self) -> bool {
        self.product.as_ref().is_some_and(|cell| cell.hazardous)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manifest {
    pub rows: Vec<ManifestRow>,
    pub total_handling_units: u32,
    pub total_packages: u32,
    pub total_weight: Decimal,
}

pub fn resolve_product(products: &[Product], id: i64) -> Option<&Product> {
    products.iter().find(|product| product.id == Some(id))
}

fn pallet_cell(pallet: &PalletItem) -> PalletCell {
    PalletCell {
        quantity: pallet.quantity,
        dimensions: pallet.dimensions.clone(),
    }
}

fn product_cell(line: &ProductItem, products: &[Product]) -> Option<ProductCell> {
    let product = resolve_product(products, line.product_id?)?;
    let quantity = Decimal::from(line.quantity);
    Some(ProductCell {
        packaging: line
            .packaging
            .clone()
            .unwrap_or_else(|| packaging_for(product)),
        quantity: line.quantity,
        hazardous: product.hazardous,
        code: product.code.clone(),
        name: product.name.clone(),
        hazmat_class: product.hazmat_class.clone(),
        packing_group: product.packing_group.clone(),
        net_weight: product.net_weight.saturating_mul(quantity),
        gross_weight: product.gross_weight.saturating_mul(quantity),
        freight_class: product.freight_class.clone(),
        nmfc_number: product.nmfc_number.clone(),
        stackable: product.stackable.clone(),
    })
}

/// Walks the line items once, front to back.
///
/// A pallet directly followed by a product line fuses with it into one row
/// and both are consumed. Any other pallet gets a row of its own. A product
/// line with no pallet in front of it gets a product-only row when its
/// product resolves and no row otherwise. Fused rows whose product does not
/// resolve keep the pallet half only.
pub fn build_manifest(items: &[LineItem], products: &[Product]) -> Manifest {
    let mut rows = Vec::with_capacity(items.len());
    let mut total_handling_units = 0u32;
    let mut total_packages = 0u32;
    let mut cursor = 0;

    while cursor < items.len() {
        match &items[cursor].kind {
            LineKind::Pallet(pallet) => {
                total_handling_units = total_handling_units.saturating_add(pallet.quantity);
                let next_line = match items.get(cursor + 1).map(|next| &next.kind) {
                    Some(LineKind::Product(line)) => Some(line),
                    _ => None,
                };

                let product = next_line.and_then(|line| product_cell(line, products));
                if let Some(cell) = &product {
                    total_packages = total_packages.saturating_add(cell.quantity);
                }
                rows.push(ManifestRow {
                    pallet: Some(pallet_cell(pallet)),
                    product,
                });
                cursor += if next_line.is_some() { 2 } else { 1 };
            }
            LineKind::Product(line) => {
                if let Some(cell) = product_cell(line, products) {
                    total_packages = total_packages.saturating_add(cell.quantity);
                    rows.push(ManifestRow {
                        pallet: None,
                        product: Some(cell),
                    });
                }
                cursor += 1;
            }
        }
    }

    Manifest {
        rows,
        total_handling_units,
        total_packages,
        total_weight: total_weight(items, products),
    }
}
