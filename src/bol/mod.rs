//! Bill of Lading composition.
//!
//! [`BolComposer`] owns the ordered pallet and product lines of one shipment.
//! [`build_manifest`] walks those lines into table rows and totals, and
//! [`render::render_document`] turns a manifest plus the shipment header into
//! a standalone HTML page.

pub mod composer;
pub mod manifest;
pub mod render;
pub mod shipment;

pub use composer::{
    generated_filename, BolComposer, ComposedDocument, ComposerWarning, ItemField, ItemId,
    LineItem, LineKind, PalletItem, ProductItem,
};
pub use manifest::{build_manifest, resolve_product, Manifest, ManifestRow, PalletCell, ProductCell};
pub use shipment::{Address, ResolvedShipment, ShipmentDetails};
