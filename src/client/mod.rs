//! HTTP client for the `/api` routes and the operator session built on it.

pub mod api;
pub mod session;

pub use api::{ApiClient, ClientError, DEFAULT_SERVER_URL};
pub use session::{Session, OFFLINE_READ_ONLY};
