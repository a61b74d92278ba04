pub mod bill_of_lading;
pub mod client;
pub mod product;
