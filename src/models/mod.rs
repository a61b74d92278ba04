//! Catalog records as they travel over the wire and through the stores.

pub mod client;
pub mod document;
pub mod product;
pub mod wire;

pub use client::{Client, ClientRecord, CLIENT_COLUMNS};
pub use document::{DocumentSummary, StoredDocument, DEFAULT_BOL_FILENAME};
pub use product::{Product, ProductRecord, PRODUCT_COLUMNS};

/// Status string marking a product or client as active.
pub const ACTIVE_STATUS: &str = "Active";
