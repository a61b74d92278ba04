//! Chemical product inventory, client roster and Bill of Lading composition.
//!
//! The server side ([`store`], [`services`], [`handlers`]) keeps products,
//! clients and generated documents. The client side ([`client`], [`catalog`],
//! [`bol`]) loads that data, filters it and composes shipping documents.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod bol;
pub mod catalog;
pub mod client;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod middleware_helpers;
#[allow(elided_lifetimes_in_paths)]
pub mod migrator;
pub mod models;
pub mod openapi;
pub mod seed;
pub mod services;
pub mod store;
pub mod tracing;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use std::time::Instant;
use tower_http::services::ServeDir;

use crate::config::AppConfig;
use crate::store::CatalogStore;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn CatalogStore>,
    pub services: handlers::AppServices,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn CatalogStore>) -> Self {
        let services = handlers::AppServices::new(store.clone(), config.bol_history_limit);
        Self {
            config,
            store,
            services,
            started_at: Instant::now(),
        }
    }
}

/// Every `/api` route.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/inventory", handlers::inventory::inventory_routes())
        .nest("/clients", handlers::clients::clients_routes())
        .merge(handlers::documents::documents_routes())
}

/// Full application router: API, health probe, OpenAPI docs, request ids,
/// HTTP tracing and the body size limit. CORS and compression are added by
/// the server binary.
pub fn app_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_size;
    let static_dir = state.config.static_dir.clone();

    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
        .merge(openapi::swagger_ui());

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(crate::tracing::configure_http_tracing())
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state)
}
