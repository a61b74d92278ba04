//! Client-side view of the catalog: the cached lists and the table filters
//! applied to them.

pub mod directory;
pub mod filters;
pub mod state;

pub use directory::group_by_state;
pub use filters::{ClientFilter, ProductFilter};
pub use state::{CatalogState, DataSource};
